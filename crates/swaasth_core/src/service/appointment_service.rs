//! Appointment use-case service.

use crate::model::appointment::{Appointment, AppointmentId};
use crate::model::profile::UserId;
use crate::repo::appointment_repo::AppointmentRepository;
use crate::service::{CareServiceError, ServiceResult};

/// Form input for scheduling one appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAppointmentRequest {
    /// Owning user account.
    pub user_uuid: UserId,
    pub doctor_name: String,
    pub specialty: Option<String>,
    /// Calendar date as entered (`YYYY-MM-DD` or RFC 3339).
    pub date: String,
    /// Free-text time-of-day.
    pub time: String,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Appointment service facade over repository implementations.
pub struct AppointmentService<R: AppointmentRepository> {
    repo: R,
}

impl<R: AppointmentRepository> AppointmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Schedules one appointment from form input and returns the stored
    /// record.
    ///
    /// The date string is stored as entered; parseability is checked at
    /// dashboard-classification time, not here.
    pub fn add_appointment(&self, request: &AddAppointmentRequest) -> ServiceResult<Appointment> {
        let mut appointment = Appointment::new(
            request.user_uuid,
            request.doctor_name.trim(),
            request.date.trim(),
            request.time.trim(),
        );
        appointment.specialty = request.specialty.clone();
        appointment.location = request.location.clone();
        appointment.notes = request.notes.clone();

        let id = self.repo.create_appointment(&appointment)?;
        self.repo
            .get_appointment(id)?
            .ok_or(CareServiceError::InconsistentState(
                "written appointment not found in read-back",
            ))
    }

    /// Replaces all fields of an existing appointment.
    pub fn update_appointment(&self, appointment: &Appointment) -> ServiceResult<()> {
        self.repo.update_appointment(appointment)?;
        Ok(())
    }

    /// Gets one appointment by ID.
    pub fn get_appointment(&self, id: AppointmentId) -> ServiceResult<Option<Appointment>> {
        Ok(self.repo.get_appointment(id)?)
    }

    /// Lists one user's appointments, newest first.
    pub fn list_appointments(&self, user_uuid: UserId) -> ServiceResult<Vec<Appointment>> {
        Ok(self.repo.list_appointments(user_uuid)?)
    }

    /// Permanently deletes one appointment.
    pub fn delete_appointment(&self, id: AppointmentId) -> ServiceResult<()> {
        self.repo.delete_appointment(id)?;
        Ok(())
    }
}
