//! User profile domain model.
//!
//! # Responsibility
//! - Define the account record every other record kind references.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another profile.
//! - Core operations always receive the owning `UserId` explicitly;
//!   there is no process-wide "current user".

use crate::model::contact::is_valid_email;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a user account.
pub type UserId = Uuid;

/// Account record owning all care records on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable account ID referenced by every owned record.
    pub uuid: UserId,
    /// Display name.
    pub name: String,
    /// Contact e-mail; shape-checked when present.
    pub email: Option<String>,
    /// Contact phone, free shape.
    pub phone: Option<String>,
    /// Date of birth as entered (`YYYY-MM-DD` by convention).
    pub date_of_birth: Option<String>,
    /// Postal address, free text.
    pub address: Option<String>,
    /// Free-text medical history summary.
    pub medical_history: Option<String>,
    /// Epoch milliseconds, assigned by storage on insert; 0 until persisted.
    pub created_at: i64,
}

/// Validation failures for profile writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// Name is blank after trim.
    BlankName,
    /// E-mail is present but not e-mail shaped.
    InvalidEmail(String),
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "profile name must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid profile email: `{value}`"),
        }
    }
}

impl Error for ProfileValidationError {}

impl UserProfile {
    /// Creates a profile with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a profile with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: UserId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            email: None,
            phone: None,
            date_of_birth: None,
            address: None,
            medical_history: None,
            created_at: 0,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProfileValidationError::BlankName);
        }
        if let Some(email) = self.email.as_deref() {
            if !is_valid_email(email) {
                return Err(ProfileValidationError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }
}
