//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Record IDs cross the boundary as UUID strings.

use std::path::PathBuf;
use std::sync::OnceLock;
use swaasth_core::db::open_db;
use swaasth_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AddAppointmentRequest, AddFamilyMemberRequest, AddMedicineRequest, Appointment,
    AppointmentService, DashboardService, FamilyMember, FamilyService, Medicine, MedicineService,
    Message, MessageDirection, MessageService, ProfileService, RecordVitalRequest,
    SqliteAppointmentRepository, SqliteFamilyMemberRepository, SqliteMedicineRepository,
    SqliteMessageRepository, SqliteProfileRepository, SqliteVitalRepository, UserId, UserProfile,
    Vital, VitalKind, VitalService,
};
use uuid::Uuid;

const CARE_DB_FILE_NAME: &str = "swaasth_care.sqlite3";
static CARE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for care record commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created or affected record ID in string form.
    pub record_uuid: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl CareActionResponse {
    fn success(message: impl Into<String>, record_uuid: String) -> Self {
        Self {
            ok: true,
            record_uuid: Some(record_uuid),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_uuid: None,
            message: message.into(),
        }
    }
}

/// One malformed record surfaced by the dashboard aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQualityItem {
    pub record_uuid: String,
    pub field: String,
    pub value: String,
}

/// Dashboard counters envelope for the home screen cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStatsResponse {
    pub ok: bool,
    pub message: String,
    pub medicines_total: u32,
    pub medicines_taken: u32,
    pub medicines_pending: u32,
    /// Name of the pending medicine with the earliest scheduled dose.
    pub next_medicine_name: Option<String>,
    pub appointments_total: u32,
    pub appointments_upcoming: u32,
    pub appointments_past: u32,
    /// Doctor name of the earliest upcoming appointment.
    pub next_appointment_doctor: Option<String>,
    /// Stored date string of the earliest upcoming appointment.
    pub next_appointment_date: Option<String>,
    pub family_total: u32,
    pub emergency_contacts: u32,
    pub messages_total: u32,
    pub messages_unread: u32,
    /// Records whose stored data could not be interpreted.
    pub issues: Vec<DataQualityItem>,
}

impl DashboardStatsResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            medicines_total: 0,
            medicines_taken: 0,
            medicines_pending: 0,
            next_medicine_name: None,
            appointments_total: 0,
            appointments_upcoming: 0,
            appointments_past: 0,
            next_appointment_doctor: None,
            next_appointment_date: None,
            family_total: 0,
            emergency_contacts: 0,
            messages_total: 0,
            messages_unread: 0,
            issues: Vec::new(),
        }
    }
}

/// One user profile crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileItem {
    pub uuid: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub created_at: i64,
}

/// Profile lookup envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    pub ok: bool,
    pub message: String,
    /// Present when the profile exists and the lookup succeeded.
    pub profile: Option<ProfileItem>,
}

/// One medicine crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineItem {
    pub uuid: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub instructions: Option<String>,
    pub taken: bool,
    pub next_dose_at: Option<i64>,
    pub created_at: i64,
}

/// One appointment crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentItem {
    pub uuid: String,
    pub doctor_name: String,
    pub specialty: Option<String>,
    pub date: String,
    pub time: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// One family member crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMemberItem {
    pub uuid: String,
    pub name: String,
    pub relationship: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub emergency_contact: bool,
    pub created_at: i64,
}

/// One message crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageItem {
    pub uuid: String,
    pub sender_name: String,
    pub content: String,
    /// `sent` or `received`.
    pub direction: String,
    pub read: bool,
    pub created_at: i64,
}

/// One vital reading crossing the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalItem {
    pub uuid: String,
    pub kind: String,
    pub value: String,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub recorded_at: i64,
    pub created_at: i64,
}

// FRB cannot lower generic envelopes, so each list keeps its own
// concrete response struct.

/// Medicine list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<MedicineItem>,
}

/// Appointment list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<AppointmentItem>,
}

/// Family member list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<FamilyMemberItem>,
}

/// Message list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<MessageItem>,
}

/// Vital reading list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VitalListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<VitalItem>,
}

/// Creates a user profile.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created profile ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn create_profile(name: String, email: Option<String>, phone: Option<String>) -> CareActionResponse {
    let result = with_db(|conn| {
        let service = ProfileService::new(SqliteProfileRepository::try_new(conn)?);
        let mut profile = UserProfile::new(name.trim());
        profile.email = email.clone();
        profile.phone = phone.clone();
        let created = service.create_profile(&profile)?;
        Ok(created.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Profile created.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("create_profile failed: {err}")),
    }
}

/// Adds a medicine to one user's list.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created medicine ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn add_medicine(
    user_uuid: String,
    name: String,
    dosage: String,
    frequency: String,
    instructions: Option<String>,
    next_dose_at: Option<i64>,
) -> CareActionResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = MedicineService::new(SqliteMedicineRepository::try_new(conn)?);
        let created = service.add_medicine(&AddMedicineRequest {
            user_uuid: user,
            name: name.clone(),
            dosage: dosage.clone(),
            frequency: frequency.clone(),
            instructions: instructions.clone(),
            next_dose_at,
        })?;
        Ok(created.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Medicine added.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("add_medicine failed: {err}")),
    }
}

/// Sets the taken flag on one medicine.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn set_medicine_taken(medicine_uuid: String, taken: bool) -> CareActionResponse {
    let id = match parse_record_uuid(&medicine_uuid, "medicine_uuid") {
        Ok(id) => id,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = MedicineService::new(SqliteMedicineRepository::try_new(conn)?);
        let updated = service.set_taken(id, taken)?;
        Ok(updated.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Medicine updated.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("set_medicine_taken failed: {err}")),
    }
}

/// Adds an appointment to one user's list.
///
/// The date is stored as entered; parse problems surface later as
/// dashboard data-quality issues, never as a write failure.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created appointment ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn add_appointment(
    user_uuid: String,
    doctor_name: String,
    specialty: Option<String>,
    date: String,
    time: String,
    location: Option<String>,
    notes: Option<String>,
) -> CareActionResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = AppointmentService::new(SqliteAppointmentRepository::try_new(conn)?);
        let created = service.add_appointment(&AddAppointmentRequest {
            user_uuid: user,
            doctor_name: doctor_name.clone(),
            specialty: specialty.clone(),
            date: date.clone(),
            time: time.clone(),
            location: location.clone(),
            notes: notes.clone(),
        })?;
        Ok(created.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Appointment added.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("add_appointment failed: {err}")),
    }
}

/// Adds a family member to one user's circle.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created family member ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn add_family_member(
    user_uuid: String,
    name: String,
    relationship: String,
    phone: Option<String>,
    email: Option<String>,
    emergency_contact: bool,
) -> CareActionResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = FamilyService::new(SqliteFamilyMemberRepository::try_new(conn)?);
        let created = service.add_family_member(&AddFamilyMemberRequest {
            user_uuid: user,
            name: name.clone(),
            relationship: relationship.clone(),
            phone: phone.clone(),
            email: email.clone(),
            emergency_contact,
        })?;
        Ok(created.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Family member added.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("add_family_member failed: {err}")),
    }
}

/// Records a message written by the owning user; stored implicitly read.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn send_message(user_uuid: String, sender_name: String, content: String) -> CareActionResponse {
    message_op(&user_uuid, |service, user| {
        service.send_message(user, &sender_name, &content)
    })
}

/// Records a message delivered to the owning user; starts unread.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn receive_message(
    user_uuid: String,
    sender_name: String,
    content: String,
) -> CareActionResponse {
    message_op(&user_uuid, |service, user| {
        service.receive_message(user, &sender_name, &content)
    })
}

/// Marks one message read.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; marking an already-read message succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn mark_message_read(message_uuid: String) -> CareActionResponse {
    let id = match parse_record_uuid(&message_uuid, "message_uuid") {
        Ok(id) => id,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = MessageService::new(SqliteMessageRepository::try_new(conn)?);
        let updated = service.mark_read(id)?;
        Ok(updated.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Message marked read.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("mark_message_read failed: {err}")),
    }
}

/// Appends one vital reading to the user's history.
///
/// Input semantics:
/// - `kind`: one of `blood_pressure|heart_rate|weight|blood_sugar|temperature`.
/// - `recorded_at`: when the reading was taken, epoch milliseconds.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns the created reading ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn record_vital(
    user_uuid: String,
    kind: String,
    value: String,
    unit: Option<String>,
    notes: Option<String>,
    recorded_at: i64,
) -> CareActionResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return CareActionResponse::failure(message),
    };
    let kind = match parse_vital_kind_label(&kind) {
        Some(kind) => kind,
        None => {
            return CareActionResponse::failure(format!("record_vital failed: unknown kind `{kind}`"))
        }
    };
    let result = with_db(|conn| {
        let service = VitalService::new(SqliteVitalRepository::try_new(conn)?);
        let id = service.record_vital(&RecordVitalRequest {
            user_uuid: user,
            kind,
            value: value.clone(),
            unit: unit.clone(),
            notes: notes.clone(),
            recorded_at,
        })?;
        Ok(id)
    });
    match result {
        Ok(id) => CareActionResponse::success("Vital recorded.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("record_vital failed: {err}")),
    }
}

/// Gets one user profile by ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `ok=true` with `profile=None` means the profile does not exist.
#[flutter_rust_bridge::frb(sync)]
pub fn get_profile(user_uuid: String) -> ProfileResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => {
            return ProfileResponse {
                ok: false,
                message,
                profile: None,
            }
        }
    };
    let result = with_db(|conn| {
        let service = ProfileService::new(SqliteProfileRepository::try_new(conn)?);
        Ok(service.get_profile(user)?)
    });
    match result {
        Ok(profile) => ProfileResponse {
            ok: true,
            message: String::new(),
            profile: profile.map(to_profile_item),
        },
        Err(err) => ProfileResponse {
            ok: false,
            message: format!("get_profile failed: {err}"),
            profile: None,
        },
    }
}

/// Lists one user's medicines, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_medicines(user_uuid: String) -> MedicineListResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return MedicineListResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    };
    let result = with_db(|conn| {
        let service = MedicineService::new(SqliteMedicineRepository::try_new(conn)?);
        Ok(service.list_medicines(user)?)
    });
    match result {
        Ok(medicines) => MedicineListResponse {
            ok: true,
            message: String::new(),
            items: medicines.into_iter().map(to_medicine_item).collect(),
        },
        Err(err) => MedicineListResponse {
            ok: false,
            message: format!("list_medicines failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Permanently deletes one medicine.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; deleting a missing record fails with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_medicine(medicine_uuid: String) -> CareActionResponse {
    let id = match parse_record_uuid(&medicine_uuid, "medicine_uuid") {
        Ok(id) => id,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = MedicineService::new(SqliteMedicineRepository::try_new(conn)?);
        service.delete_medicine(id)?;
        Ok(id)
    });
    match result {
        Ok(id) => CareActionResponse::success("Medicine deleted.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("delete_medicine failed: {err}")),
    }
}

/// Lists one user's appointments, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_appointments(user_uuid: String) -> AppointmentListResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return AppointmentListResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    };
    let result = with_db(|conn| {
        let service = AppointmentService::new(SqliteAppointmentRepository::try_new(conn)?);
        Ok(service.list_appointments(user)?)
    });
    match result {
        Ok(appointments) => AppointmentListResponse {
            ok: true,
            message: String::new(),
            items: appointments.into_iter().map(to_appointment_item).collect(),
        },
        Err(err) => AppointmentListResponse {
            ok: false,
            message: format!("list_appointments failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Permanently deletes one appointment.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; deleting a missing record fails with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_appointment(appointment_uuid: String) -> CareActionResponse {
    let id = match parse_record_uuid(&appointment_uuid, "appointment_uuid") {
        Ok(id) => id,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = AppointmentService::new(SqliteAppointmentRepository::try_new(conn)?);
        service.delete_appointment(id)?;
        Ok(id)
    });
    match result {
        Ok(id) => CareActionResponse::success("Appointment deleted.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("delete_appointment failed: {err}")),
    }
}

/// Lists one user's family members, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_family_members(user_uuid: String) -> FamilyListResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return FamilyListResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    };
    let result = with_db(|conn| {
        let service = FamilyService::new(SqliteFamilyMemberRepository::try_new(conn)?);
        Ok(service.list_family_members(user)?)
    });
    match result {
        Ok(members) => FamilyListResponse {
            ok: true,
            message: String::new(),
            items: members.into_iter().map(to_family_member_item).collect(),
        },
        Err(err) => FamilyListResponse {
            ok: false,
            message: format!("list_family_members failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Permanently deletes one family member.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; deleting a missing record fails with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_family_member(member_uuid: String) -> CareActionResponse {
    let id = match parse_record_uuid(&member_uuid, "member_uuid") {
        Ok(id) => id,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = FamilyService::new(SqliteFamilyMemberRepository::try_new(conn)?);
        service.delete_family_member(id)?;
        Ok(id)
    });
    match result {
        Ok(id) => CareActionResponse::success("Family member deleted.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("delete_family_member failed: {err}")),
    }
}

/// Lists one user's messages, newest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_messages(user_uuid: String) -> MessageListResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return MessageListResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    };
    let result = with_db(|conn| {
        let service = MessageService::new(SqliteMessageRepository::try_new(conn)?);
        Ok(service.list_messages(user)?)
    });
    match result {
        Ok(messages) => MessageListResponse {
            ok: true,
            message: String::new(),
            items: messages.into_iter().map(to_message_item).collect(),
        },
        Err(err) => MessageListResponse {
            ok: false,
            message: format!("list_messages failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Lists one user's vital readings, most recent first.
///
/// Input semantics:
/// - `kind`: optional filter, same labels as [`record_vital`].
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn list_vitals(user_uuid: String, kind: Option<String>) -> VitalListResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return VitalListResponse {
            ok: false,
            message,
            items: Vec::new(),
        },
    };
    let kind_filter = match kind {
        None => None,
        Some(label) => match parse_vital_kind_label(&label) {
            Some(kind) => Some(kind),
            None => {
                return VitalListResponse {
                    ok: false,
                    message: format!("list_vitals failed: unknown kind `{label}`"),
                    items: Vec::new(),
                }
            }
        },
    };
    let result = with_db(|conn| {
        let service = VitalService::new(SqliteVitalRepository::try_new(conn)?);
        Ok(service.list_vitals(user, kind_filter)?)
    });
    match result {
        Ok(vitals) => VitalListResponse {
            ok: true,
            message: String::new(),
            items: vitals.into_iter().map(to_vital_item).collect(),
        },
        Err(err) => VitalListResponse {
            ok: false,
            message: format!("list_vitals failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Computes the dashboard counters for one user.
///
/// Input semantics:
/// - `now_ms`: caller-supplied reference time, epoch milliseconds UTC.
///   Passing the same time twice yields identical counters.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns zeroed counters with `ok=false` on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_stats(user_uuid: String, now_ms: i64) -> DashboardStatsResponse {
    let user = match parse_user_uuid(&user_uuid) {
        Ok(user) => user,
        Err(message) => return DashboardStatsResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = DashboardService::new(
            SqliteMedicineRepository::try_new(conn)?,
            SqliteAppointmentRepository::try_new(conn)?,
            SqliteFamilyMemberRepository::try_new(conn)?,
            SqliteMessageRepository::try_new(conn)?,
        );
        Ok(service.snapshot(user, now_ms)?)
    });
    match result {
        Ok(snapshot) => DashboardStatsResponse {
            ok: true,
            message: String::new(),
            medicines_total: snapshot.medicines.total as u32,
            medicines_taken: snapshot.medicines.taken as u32,
            medicines_pending: snapshot.medicines.pending as u32,
            next_medicine_name: snapshot
                .medicines
                .next_medicine
                .map(|medicine| medicine.name),
            appointments_total: snapshot.appointments.total as u32,
            appointments_upcoming: snapshot.appointments.upcoming as u32,
            appointments_past: snapshot.appointments.past as u32,
            next_appointment_doctor: snapshot
                .appointments
                .next
                .as_ref()
                .map(|appointment| appointment.doctor_name.clone()),
            next_appointment_date: snapshot
                .appointments
                .next
                .map(|appointment| appointment.date),
            family_total: snapshot.family.total as u32,
            emergency_contacts: snapshot.family.emergency_contacts as u32,
            messages_total: snapshot.messages.total as u32,
            messages_unread: snapshot.messages.unread as u32,
            issues: snapshot
                .issues
                .into_iter()
                .map(|issue| DataQualityItem {
                    record_uuid: issue.record_uuid.to_string(),
                    field: issue.field.to_string(),
                    value: issue.value,
                })
                .collect(),
        },
        Err(err) => DashboardStatsResponse::failure(format!("dashboard_stats failed: {err}")),
    }
}

fn message_op(
    user_uuid: &str,
    f: impl FnOnce(
        &MessageService<SqliteMessageRepository<'_>>,
        UserId,
    ) -> swaasth_core::ServiceResult<swaasth_core::Message>,
) -> CareActionResponse {
    let user = match parse_user_uuid(user_uuid) {
        Ok(user) => user,
        Err(message) => return CareActionResponse::failure(message),
    };
    let result = with_db(|conn| {
        let service = MessageService::new(SqliteMessageRepository::try_new(conn)?);
        let message = f(&service, user)?;
        Ok(message.uuid)
    });
    match result {
        Ok(id) => CareActionResponse::success("Message stored.", id.to_string()),
        Err(err) => CareActionResponse::failure(format!("message operation failed: {err}")),
    }
}

fn with_db<T>(f: impl FnOnce(&rusqlite::Connection) -> Result<T, FfiError>) -> Result<T, String> {
    let db_path = resolve_care_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("care DB open failed: {err}"))?;
    f(&conn).map_err(|err| err.0)
}

struct FfiError(String);

impl From<swaasth_core::RepoError> for FfiError {
    fn from(err: swaasth_core::RepoError) -> Self {
        Self(err.to_string())
    }
}

impl From<swaasth_core::CareServiceError> for FfiError {
    fn from(err: swaasth_core::CareServiceError) -> Self {
        Self(err.to_string())
    }
}

fn resolve_care_db_path() -> PathBuf {
    CARE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SWAASTH_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(CARE_DB_FILE_NAME)
        })
        .clone()
}

fn parse_user_uuid(value: &str) -> Result<UserId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid user_uuid `{value}`"))
}

fn parse_record_uuid(value: &str, field: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid {field} `{value}`"))
}

fn parse_vital_kind_label(value: &str) -> Option<VitalKind> {
    match value.trim() {
        "blood_pressure" => Some(VitalKind::BloodPressure),
        "heart_rate" => Some(VitalKind::HeartRate),
        "weight" => Some(VitalKind::Weight),
        "blood_sugar" => Some(VitalKind::BloodSugar),
        "temperature" => Some(VitalKind::Temperature),
        _ => None,
    }
}

fn vital_kind_label(kind: VitalKind) -> &'static str {
    match kind {
        VitalKind::BloodPressure => "blood_pressure",
        VitalKind::HeartRate => "heart_rate",
        VitalKind::Weight => "weight",
        VitalKind::BloodSugar => "blood_sugar",
        VitalKind::Temperature => "temperature",
    }
}

fn to_profile_item(profile: UserProfile) -> ProfileItem {
    ProfileItem {
        uuid: profile.uuid.to_string(),
        name: profile.name,
        email: profile.email,
        phone: profile.phone,
        date_of_birth: profile.date_of_birth,
        address: profile.address,
        medical_history: profile.medical_history,
        created_at: profile.created_at,
    }
}

fn to_medicine_item(medicine: Medicine) -> MedicineItem {
    MedicineItem {
        uuid: medicine.uuid.to_string(),
        name: medicine.name,
        dosage: medicine.dosage,
        frequency: medicine.frequency,
        instructions: medicine.instructions,
        taken: medicine.taken,
        next_dose_at: medicine.next_dose_at,
        created_at: medicine.created_at,
    }
}

fn to_appointment_item(appointment: Appointment) -> AppointmentItem {
    AppointmentItem {
        uuid: appointment.uuid.to_string(),
        doctor_name: appointment.doctor_name,
        specialty: appointment.specialty,
        date: appointment.date,
        time: appointment.time,
        location: appointment.location,
        notes: appointment.notes,
        created_at: appointment.created_at,
    }
}

fn to_family_member_item(member: FamilyMember) -> FamilyMemberItem {
    FamilyMemberItem {
        uuid: member.uuid.to_string(),
        name: member.name,
        relationship: member.relationship,
        phone: member.phone,
        email: member.email,
        emergency_contact: member.emergency_contact,
        created_at: member.created_at,
    }
}

fn to_message_item(message: Message) -> MessageItem {
    MessageItem {
        uuid: message.uuid.to_string(),
        sender_name: message.sender_name,
        content: message.content,
        direction: match message.direction {
            MessageDirection::Sent => "sent".to_string(),
            MessageDirection::Received => "received".to_string(),
        },
        read: message.read,
        created_at: message.created_at,
    }
}

fn to_vital_item(vital: Vital) -> VitalItem {
    VitalItem {
        uuid: vital.uuid.to_string(),
        kind: vital_kind_label(vital.kind).to_string(),
        value: vital.value,
        unit: vital.unit,
        notes: vital.notes,
        recorded_at: vital.recorded_at,
        created_at: vital.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_appointment, add_family_member, add_medicine, core_version, create_profile,
        dashboard_stats, delete_medicine, get_profile, init_logging, list_family_members,
        list_medicines, list_vitals, mark_message_read, ping, receive_message, record_vital,
        set_medicine_taken,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn malformed_user_uuid_is_rejected_without_touching_the_db() {
        let response = add_medicine(
            "not-a-uuid".to_string(),
            "Metformin".to_string(),
            "500mg".to_string(),
            "twice daily".to_string(),
            None,
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("invalid user_uuid"));

        let stats = dashboard_stats("not-a-uuid".to_string(), 0);
        assert!(!stats.ok);
    }

    #[test]
    fn full_flow_profile_records_and_dashboard() {
        let profile = create_profile("Asha".to_string(), None, None);
        assert!(profile.ok, "{}", profile.message);
        let user = profile.record_uuid.clone().expect("profile id");

        let medicine = add_medicine(
            user.clone(),
            "Metformin".to_string(),
            "500mg".to_string(),
            "twice daily".to_string(),
            None,
            Some(2_000_000_000_000),
        );
        assert!(medicine.ok, "{}", medicine.message);
        let medicine_id = medicine.record_uuid.expect("medicine id");

        let appointment = add_appointment(
            user.clone(),
            "Dr. Mehta".to_string(),
            None,
            "not a date".to_string(),
            "10:30 AM".to_string(),
            None,
            None,
        );
        assert!(appointment.ok, "{}", appointment.message);

        let received = receive_message(user.clone(), "Ravi".to_string(), "ping".to_string());
        assert!(received.ok, "{}", received.message);
        let message_id = received.record_uuid.expect("message id");

        let stats = dashboard_stats(user.clone(), 1_000_000_000_000);
        assert!(stats.ok, "{}", stats.message);
        assert_eq!(stats.medicines_total, 1);
        assert_eq!(stats.medicines_pending, 1);
        assert_eq!(stats.next_medicine_name.as_deref(), Some("Metformin"));
        assert_eq!(stats.appointments_total, 1);
        assert_eq!(stats.appointments_upcoming, 0);
        assert_eq!(stats.appointments_past, 0);
        assert_eq!(stats.messages_unread, 1);
        assert_eq!(stats.issues.len(), 1);
        assert_eq!(stats.issues[0].field, "date");

        let toggled = set_medicine_taken(medicine_id, true);
        assert!(toggled.ok, "{}", toggled.message);
        let read = mark_message_read(message_id);
        assert!(read.ok, "{}", read.message);

        let stats = dashboard_stats(user, 1_000_000_000_000);
        assert_eq!(stats.medicines_taken, 1);
        assert_eq!(stats.medicines_pending, 0);
        assert!(stats.next_medicine_name.is_none());
        assert_eq!(stats.messages_unread, 0);
    }

    #[test]
    fn profile_lookup_reports_existing_and_missing_accounts() {
        let created = create_profile(
            "Meera".to_string(),
            Some("meera@example.com".to_string()),
            None,
        );
        assert!(created.ok, "{}", created.message);
        let user = created.record_uuid.expect("profile id");

        let found = get_profile(user);
        assert!(found.ok, "{}", found.message);
        let profile = found.profile.expect("profile should exist");
        assert_eq!(profile.name, "Meera");
        assert_eq!(profile.email.as_deref(), Some("meera@example.com"));

        let missing = get_profile(uuid::Uuid::new_v4().to_string());
        assert!(missing.ok, "{}", missing.message);
        assert!(missing.profile.is_none());
    }

    #[test]
    fn medicine_list_and_delete_roundtrip() {
        let profile = create_profile("Asha".to_string(), None, None);
        assert!(profile.ok, "{}", profile.message);
        let user = profile.record_uuid.expect("profile id");

        let added = add_medicine(
            user.clone(),
            "Amlodipine".to_string(),
            "5mg".to_string(),
            "once daily".to_string(),
            None,
            None,
        );
        assert!(added.ok, "{}", added.message);
        let medicine_id = added.record_uuid.expect("medicine id");

        let listed = list_medicines(user.clone());
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].name, "Amlodipine");

        let deleted = delete_medicine(medicine_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(list_medicines(user).items.is_empty());

        let again = delete_medicine(medicine_id);
        assert!(!again.ok);
    }

    #[test]
    fn family_list_carries_emergency_flag() {
        let profile = create_profile("Asha".to_string(), None, None);
        assert!(profile.ok, "{}", profile.message);
        let user = profile.record_uuid.expect("profile id");

        let added = add_family_member(
            user.clone(),
            "Ravi".to_string(),
            "son".to_string(),
            None,
            None,
            true,
        );
        assert!(added.ok, "{}", added.message);

        let listed = list_family_members(user);
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(listed.items.len(), 1);
        assert!(listed.items[0].emergency_contact);
    }

    #[test]
    fn vital_list_filters_by_kind_label_and_rejects_unknown_labels() {
        let profile = create_profile("Asha".to_string(), None, None);
        assert!(profile.ok, "{}", profile.message);
        let user = profile.record_uuid.expect("profile id");

        let recorded = record_vital(
            user.clone(),
            "heart_rate".to_string(),
            "68".to_string(),
            Some("bpm".to_string()),
            None,
            1_700_000_000_000,
        );
        assert!(recorded.ok, "{}", recorded.message);

        let listed = list_vitals(user.clone(), Some("heart_rate".to_string()));
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].kind, "heart_rate");

        let empty = list_vitals(user.clone(), Some("weight".to_string()));
        assert!(empty.ok, "{}", empty.message);
        assert!(empty.items.is_empty());

        let unknown = list_vitals(user, Some("mood".to_string()));
        assert!(!unknown.ok);
        assert!(unknown.message.contains("unknown kind"));
    }
}
