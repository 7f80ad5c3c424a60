//! Appointment domain model.
//!
//! # Responsibility
//! - Define the doctor-visit record used by the appointments tab and the
//!   upcoming/past dashboard partition.
//!
//! # Invariants
//! - Upcoming/past status is never stored; it is derived from `date`
//!   against a caller-supplied reference time at read time.
//! - `date` keeps the string as entered; parse failures are surfaced as
//!   data-quality issues during classification, not at write time.

use crate::model::profile::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an appointment record.
pub type AppointmentId = Uuid;

/// Doctor appointment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Stable record ID.
    pub uuid: AppointmentId,
    /// Owning user account.
    pub user_uuid: UserId,
    /// Provider name as entered.
    pub doctor_name: String,
    /// Medical specialty label.
    pub specialty: Option<String>,
    /// Calendar date as entered (`YYYY-MM-DD` or RFC 3339).
    pub date: String,
    /// Free-text time-of-day, e.g. `10:30 AM`.
    pub time: String,
    /// Clinic/hospital location.
    pub location: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Epoch milliseconds, assigned by storage on insert; 0 until persisted.
    pub created_at: i64,
}

/// Validation failures for appointment writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentValidationError {
    /// Doctor name is blank after trim.
    BlankDoctorName,
    /// Date is blank after trim.
    BlankDate,
}

impl Display for AppointmentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDoctorName => write!(f, "appointment doctor name must not be blank"),
            Self::BlankDate => write!(f, "appointment date must not be blank"),
        }
    }
}

impl Error for AppointmentValidationError {}

impl Appointment {
    /// Creates an appointment with a generated stable ID.
    pub fn new(
        user_uuid: UserId,
        doctor_name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), user_uuid, doctor_name, date, time)
    }

    /// Creates an appointment with a caller-provided stable ID.
    pub fn with_id(
        uuid: AppointmentId,
        user_uuid: UserId,
        doctor_name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            user_uuid,
            doctor_name: doctor_name.into(),
            specialty: None,
            date: date.into(),
            time: time.into(),
            location: None,
            notes: None,
            created_at: 0,
        }
    }

    /// Checks write-path invariants.
    ///
    /// Deliberately does not require `date` to parse: the stored string is
    /// kept as entered and classified defensively at read time.
    pub fn validate(&self) -> Result<(), AppointmentValidationError> {
        if self.doctor_name.trim().is_empty() {
            return Err(AppointmentValidationError::BlankDoctorName);
        }
        if self.date.trim().is_empty() {
            return Err(AppointmentValidationError::BlankDate);
        }
        Ok(())
    }
}
