//! Family member domain model.
//!
//! # Invariants
//! - `emergency_contact` is a flag on the member record, not a separate
//!   contact list.
//! - Contact fields are shape-checked when present, never required.

use crate::model::contact::{is_valid_email, is_valid_phone};
use crate::model::profile::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a family member record.
pub type FamilyMemberId = Uuid;

/// Family/care-circle member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    /// Stable record ID.
    pub uuid: FamilyMemberId,
    /// Owning user account.
    pub user_uuid: UserId,
    /// Member name as entered.
    pub name: String,
    /// Relationship label, e.g. `daughter`.
    pub relationship: String,
    /// Contact phone; shape-checked when present.
    pub phone: Option<String>,
    /// Contact e-mail; shape-checked when present.
    pub email: Option<String>,
    /// Whether this member is flagged for urgent contact.
    pub emergency_contact: bool,
    /// Epoch milliseconds, assigned by storage on insert; 0 until persisted.
    pub created_at: i64,
}

/// Validation failures for family member writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyMemberValidationError {
    /// Name is blank after trim.
    BlankName,
    /// Relationship is blank after trim.
    BlankRelationship,
    /// Phone is present but not phone shaped.
    InvalidPhone(String),
    /// E-mail is present but not e-mail shaped.
    InvalidEmail(String),
}

impl Display for FamilyMemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "family member name must not be blank"),
            Self::BlankRelationship => {
                write!(f, "family member relationship must not be blank")
            }
            Self::InvalidPhone(value) => write!(f, "invalid family member phone: `{value}`"),
            Self::InvalidEmail(value) => write!(f, "invalid family member email: `{value}`"),
        }
    }
}

impl Error for FamilyMemberValidationError {}

impl FamilyMember {
    /// Creates a member with a generated stable ID.
    ///
    /// `emergency_contact` starts as `false`.
    pub fn new(
        user_uuid: UserId,
        name: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), user_uuid, name, relationship)
    }

    /// Creates a member with a caller-provided stable ID.
    pub fn with_id(
        uuid: FamilyMemberId,
        user_uuid: UserId,
        name: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            user_uuid,
            name: name.into(),
            relationship: relationship.into(),
            phone: None,
            email: None,
            emergency_contact: false,
            created_at: 0,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), FamilyMemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(FamilyMemberValidationError::BlankName);
        }
        if self.relationship.trim().is_empty() {
            return Err(FamilyMemberValidationError::BlankRelationship);
        }
        if let Some(phone) = self.phone.as_deref() {
            if !is_valid_phone(phone) {
                return Err(FamilyMemberValidationError::InvalidPhone(phone.to_string()));
            }
        }
        if let Some(email) = self.email.as_deref() {
            if !is_valid_email(email) {
                return Err(FamilyMemberValidationError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }
}
