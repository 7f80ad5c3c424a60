//! Medicine domain model.
//!
//! # Responsibility
//! - Define the medication record shown on the medicines tab and the
//!   dashboard "next medicine" selection.
//!
//! # Invariants
//! - `taken` is a plain toggle; no per-dose history survives a toggle.
//! - `next_dose_at` is optional and never derived inside core.

use crate::model::profile::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a medicine record.
pub type MedicineId = Uuid;

/// Medication record with reminder metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    /// Stable record ID.
    pub uuid: MedicineId,
    /// Owning user account.
    pub user_uuid: UserId,
    /// Medicine name as entered.
    pub name: String,
    /// Dose description, e.g. `500mg`.
    pub dosage: String,
    /// Intake frequency, e.g. `twice daily`.
    pub frequency: String,
    /// Free-text intake instructions.
    pub instructions: Option<String>,
    /// Whether the current dose was marked taken.
    pub taken: bool,
    /// Next scheduled dose in epoch milliseconds, when known.
    pub next_dose_at: Option<i64>,
    /// Epoch milliseconds, assigned by storage on insert; 0 until persisted.
    pub created_at: i64,
}

/// Validation failures for medicine writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicineValidationError {
    /// Name is blank after trim.
    BlankName,
    /// Dosage is blank after trim.
    BlankDosage,
    /// Frequency is blank after trim.
    BlankFrequency,
}

impl Display for MedicineValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "medicine name must not be blank"),
            Self::BlankDosage => write!(f, "medicine dosage must not be blank"),
            Self::BlankFrequency => write!(f, "medicine frequency must not be blank"),
        }
    }
}

impl Error for MedicineValidationError {}

impl Medicine {
    /// Creates a medicine with a generated stable ID.
    ///
    /// # Invariants
    /// - `taken` starts as `false`.
    /// - Optional fields are initialized to `None`.
    pub fn new(
        user_uuid: UserId,
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), user_uuid, name, dosage, frequency)
    }

    /// Creates a medicine with a caller-provided stable ID.
    pub fn with_id(
        uuid: MedicineId,
        user_uuid: UserId,
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            user_uuid,
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            instructions: None,
            taken: false,
            next_dose_at: None,
            created_at: 0,
        }
    }

    /// Sets the taken flag to an explicit value.
    pub fn set_taken(&mut self, taken: bool) {
        self.taken = taken;
    }

    /// Returns whether this medicine still needs its current dose.
    pub fn is_pending(&self) -> bool {
        !self.taken
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), MedicineValidationError> {
        if self.name.trim().is_empty() {
            return Err(MedicineValidationError::BlankName);
        }
        if self.dosage.trim().is_empty() {
            return Err(MedicineValidationError::BlankDosage);
        }
        if self.frequency.trim().is_empty() {
            return Err(MedicineValidationError::BlankFrequency);
        }
        Ok(())
    }
}
