//! User profile repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `UserProfile::validate()` before SQL mutations.
//! - Deleting a profile cascades to every owned care record
//!   (enforced by the schema's foreign keys).

use crate::model::profile::{UserId, UserProfile};
use crate::repo::{ensure_connection_ready, parse_record_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const PROFILE_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    email,
    phone,
    date_of_birth,
    address,
    medical_history,
    created_at
FROM users";

const PROFILE_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "email",
    "phone",
    "date_of_birth",
    "address",
    "medical_history",
    "created_at",
];

/// Repository interface for user profile operations.
pub trait ProfileRepository {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<UserId>;
    fn update_profile(&self, profile: &UserProfile) -> RepoResult<()>;
    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    fn delete_profile(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "users", PROFILE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<UserId> {
        profile.validate()?;

        self.conn.execute(
            "INSERT INTO users (
                uuid,
                name,
                email,
                phone,
                date_of_birth,
                address,
                medical_history
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                profile.uuid.to_string(),
                profile.name.as_str(),
                profile.email.as_deref(),
                profile.phone.as_deref(),
                profile.date_of_birth.as_deref(),
                profile.address.as_deref(),
                profile.medical_history.as_deref(),
            ],
        )?;

        Ok(profile.uuid)
    }

    fn update_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        profile.validate()?;

        let changed = self.conn.execute(
            "UPDATE users
             SET
                name = ?1,
                email = ?2,
                phone = ?3,
                date_of_birth = ?4,
                address = ?5,
                medical_history = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                profile.name.as_str(),
                profile.email.as_deref(),
                profile.phone.as_deref(),
                profile.date_of_birth.as_deref(),
                profile.address.as_deref(),
                profile.medical_history.as_deref(),
                profile.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(profile.uuid));
        }

        Ok(())
    }

    fn get_profile(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn delete_profile(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let uuid_text: String = row.get("uuid")?;

    let profile = UserProfile {
        uuid: parse_record_uuid(&uuid_text, "users.uuid")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        date_of_birth: row.get("date_of_birth")?,
        address: row.get("address")?,
        medical_history: row.get("medical_history")?,
        created_at: row.get("created_at")?,
    };
    profile.validate()?;
    Ok(profile)
}
