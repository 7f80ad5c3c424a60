//! Core domain logic for swaasth, a family health care companion.
//! This crate is the single source of truth for business invariants.

pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dashboard::{
    classify_appointments, classify_medicines, classify_messages, dashboard_snapshot,
    emergency_contact_count, AppointmentClassification, AppointmentStats, DashboardSnapshot,
    DataQualityIssue, FamilyStats, MedicineClassification, MedicineStats, MessageStats,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentId, AppointmentValidationError};
pub use model::family_member::{FamilyMember, FamilyMemberId, FamilyMemberValidationError};
pub use model::medicine::{Medicine, MedicineId, MedicineValidationError};
pub use model::message::{Message, MessageDirection, MessageId, MessageValidationError};
pub use model::profile::{ProfileValidationError, UserId, UserProfile};
pub use model::vital::{Vital, VitalId, VitalKind, VitalValidationError};
pub use repo::appointment_repo::{AppointmentRepository, SqliteAppointmentRepository};
pub use repo::family_repo::{FamilyMemberRepository, SqliteFamilyMemberRepository};
pub use repo::medicine_repo::{MedicineRepository, SqliteMedicineRepository};
pub use repo::message_repo::{MessageRepository, SqliteMessageRepository};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use repo::vital_repo::{SqliteVitalRepository, VitalRepository};
pub use repo::{RepoError, RepoResult};
pub use service::appointment_service::{AddAppointmentRequest, AppointmentService};
pub use service::dashboard_service::DashboardService;
pub use service::family_service::{AddFamilyMemberRequest, FamilyService};
pub use service::medicine_service::{AddMedicineRequest, MedicineService};
pub use service::message_service::MessageService;
pub use service::profile_service::ProfileService;
pub use service::vital_service::{RecordVitalRequest, VitalService};
pub use service::{CareServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
