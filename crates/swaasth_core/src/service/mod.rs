//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Created records are read back so callers always see
//!   storage-assigned fields (`created_at`).

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod appointment_service;
pub mod dashboard_service;
pub mod family_service;
pub mod medicine_service;
pub mod message_service;
pub mod profile_service;
pub mod vital_service;

pub type ServiceResult<T> = Result<T, CareServiceError>;

/// Service error shared by care use-cases.
#[derive(Debug)]
pub enum CareServiceError {
    /// Target record does not exist.
    NotFound(Uuid),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for CareServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent record state: {details}"),
        }
    }
}

impl Error for CareServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CareServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}
