//! Dashboard use-case service.
//!
//! # Responsibility
//! - Fetch one user's four record collections and delegate to the pure
//!   aggregation engine.
//! - Surface data-quality issues through structured logging.
//!
//! # Invariants
//! - The reference time is caller-supplied; this service never reads a
//!   system clock, keeping snapshots reproducible.

use crate::dashboard::{dashboard_snapshot, DashboardSnapshot};
use crate::model::profile::UserId;
use crate::repo::appointment_repo::AppointmentRepository;
use crate::repo::family_repo::FamilyMemberRepository;
use crate::repo::medicine_repo::MedicineRepository;
use crate::repo::message_repo::MessageRepository;
use crate::service::ServiceResult;
use log::{info, warn};

/// Dashboard service over the four record repositories.
pub struct DashboardService<M, A, F, S> {
    medicines: M,
    appointments: A,
    family: F,
    messages: S,
}

impl<M, A, F, S> DashboardService<M, A, F, S>
where
    M: MedicineRepository,
    A: AppointmentRepository,
    F: FamilyMemberRepository,
    S: MessageRepository,
{
    /// Creates a service using the provided repository implementations.
    pub fn new(medicines: M, appointments: A, family: F, messages: S) -> Self {
        Self {
            medicines,
            appointments,
            family,
            messages,
        }
    }

    /// Computes the dashboard snapshot for one user at the given
    /// reference time.
    ///
    /// Malformed records found during classification are logged at `warn`
    /// (record id and field only, never the raw value) and remain listed
    /// in the returned snapshot for the UI to surface.
    pub fn snapshot(&self, user_uuid: UserId, now_ms: i64) -> ServiceResult<DashboardSnapshot> {
        let medicines = self.medicines.list_medicines(user_uuid)?;
        let appointments = self.appointments.list_appointments(user_uuid)?;
        let family_members = self.family.list_family_members(user_uuid)?;
        let messages = self.messages.list_messages(user_uuid)?;

        let snapshot =
            dashboard_snapshot(now_ms, &medicines, &appointments, &family_members, &messages);

        for issue in &snapshot.issues {
            warn!(
                "event=dashboard_data_quality module=dashboard status=warn record={} field={}",
                issue.record_uuid, issue.field
            );
        }
        info!(
            "event=dashboard_snapshot module=dashboard status=ok user={user_uuid} medicines={} appointments={} family={} messages={} issues={}",
            snapshot.medicines.total,
            snapshot.appointments.total,
            snapshot.family.total,
            snapshot.messages.total,
            snapshot.issues.len()
        );

        Ok(snapshot)
    }
}
