//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per record kind.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must call the model's `validate()` before SQL
//!   mutations; read paths reject invalid persisted state instead of
//!   masking it.
//! - Every list/read is scoped by an explicit owning `user_uuid`; there
//!   is no implicit current user.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   DB transport errors.

use crate::db::DbError;
use crate::model::appointment::AppointmentValidationError;
use crate::model::family_member::FamilyMemberValidationError;
use crate::model::medicine::MedicineValidationError;
use crate::model::message::MessageValidationError;
use crate::model::profile::ProfileValidationError;
use crate::model::vital::VitalValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod appointment_repo;
pub mod family_repo;
pub mod medicine_repo;
pub mod message_repo;
pub mod profile_repo;
pub mod vital_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Model validation failure carried through the repository boundary.
#[derive(Debug)]
pub enum ValidationError {
    Profile(ProfileValidationError),
    Medicine(MedicineValidationError),
    Appointment(AppointmentValidationError),
    FamilyMember(FamilyMemberValidationError),
    Message(MessageValidationError),
    Vital(VitalValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile(err) => write!(f, "{err}"),
            Self::Medicine(err) => write!(f, "{err}"),
            Self::Appointment(err) => write!(f, "{err}"),
            Self::FamilyMember(err) => write!(f, "{err}"),
            Self::Message(err) => write!(f, "{err}"),
            Self::Vital(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ValidationError {}

/// Generic repository error for care-record persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
    /// Connection has no applied schema (`user_version` is 0).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not initialized (expected {expected_version})"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ProfileValidationError> for RepoError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Validation(ValidationError::Profile(value))
    }
}

impl From<MedicineValidationError> for RepoError {
    fn from(value: MedicineValidationError) -> Self {
        Self::Validation(ValidationError::Medicine(value))
    }
}

impl From<AppointmentValidationError> for RepoError {
    fn from(value: AppointmentValidationError) -> Self {
        Self::Validation(ValidationError::Appointment(value))
    }
}

impl From<FamilyMemberValidationError> for RepoError {
    fn from(value: FamilyMemberValidationError) -> Self {
        Self::Validation(ValidationError::FamilyMember(value))
    }
}

impl From<MessageValidationError> for RepoError {
    fn from(value: MessageValidationError) -> Self {
        Self::Validation(ValidationError::Message(value))
    }
}

impl From<VitalValidationError> for RepoError {
    fn from(value: VitalValidationError) -> Self {
        Self::Validation(ValidationError::Vital(value))
    }
}

/// Verifies that a connection carries an applied schema with the given
/// table and columns before a repository accepts it.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version == 0 {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }
    for column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn parse_record_uuid(value: &str, context: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {context}")))
}

pub(crate) fn parse_flag(value: i64, context: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {context}"
        ))),
    }
}

pub(crate) fn flag_to_int(value: bool) -> i64 {
    i64::from(value)
}
