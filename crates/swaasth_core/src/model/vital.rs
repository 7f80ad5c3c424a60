//! Health vital domain model.

use crate::model::profile::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a vital reading.
pub type VitalId = Uuid;

/// Kind of health reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    BloodPressure,
    HeartRate,
    Weight,
    BloodSugar,
    Temperature,
}

/// One recorded health reading, e.g. `120/80` blood pressure.
///
/// `value` stays free text because readings like blood pressure are not a
/// single number; the unit travels separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vital {
    /// Stable record ID.
    pub uuid: VitalId,
    /// Owning user account.
    pub user_uuid: UserId,
    /// Reading kind.
    pub kind: VitalKind,
    /// Reading value as entered.
    pub value: String,
    /// Measurement unit, e.g. `mmHg`.
    pub unit: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// When the reading was taken, epoch milliseconds (caller-supplied).
    pub recorded_at: i64,
    /// Epoch milliseconds, assigned by storage on insert; 0 until persisted.
    pub created_at: i64,
}

/// Validation failures for vital writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalValidationError {
    /// Value is blank after trim.
    BlankValue,
}

impl Display for VitalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankValue => write!(f, "vital value must not be blank"),
        }
    }
}

impl Error for VitalValidationError {}

impl Vital {
    /// Creates a reading with a generated stable ID.
    pub fn new(
        user_uuid: UserId,
        kind: VitalKind,
        value: impl Into<String>,
        recorded_at: i64,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), user_uuid, kind, value, recorded_at)
    }

    /// Creates a reading with a caller-provided stable ID.
    pub fn with_id(
        uuid: VitalId,
        user_uuid: UserId,
        kind: VitalKind,
        value: impl Into<String>,
        recorded_at: i64,
    ) -> Self {
        Self {
            uuid,
            user_uuid,
            kind,
            value: value.into(),
            unit: None,
            notes: None,
            recorded_at,
            created_at: 0,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), VitalValidationError> {
        if self.value.trim().is_empty() {
            return Err(VitalValidationError::BlankValue);
        }
        Ok(())
    }
}
