//! Family member repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `FamilyMember::validate()` before SQL mutations.
//! - `emergency_contact` is a plain flag column; counting flagged members
//!   is the dashboard engine's job.

use crate::model::family_member::{FamilyMember, FamilyMemberId};
use crate::model::profile::UserId;
use crate::repo::{
    ensure_connection_ready, flag_to_int, parse_flag, parse_record_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const FAMILY_SELECT_SQL: &str = "SELECT
    uuid,
    user_uuid,
    name,
    relationship,
    phone,
    email,
    emergency_contact,
    created_at
FROM family_members";

const FAMILY_COLUMNS: &[&str] = &[
    "uuid",
    "user_uuid",
    "name",
    "relationship",
    "phone",
    "email",
    "emergency_contact",
    "created_at",
];

/// Repository interface for family member CRUD operations.
pub trait FamilyMemberRepository {
    fn create_family_member(&self, member: &FamilyMember) -> RepoResult<FamilyMemberId>;
    fn update_family_member(&self, member: &FamilyMember) -> RepoResult<()>;
    fn get_family_member(&self, id: FamilyMemberId) -> RepoResult<Option<FamilyMember>>;
    /// Lists one user's family members, newest first.
    fn list_family_members(&self, user_uuid: UserId) -> RepoResult<Vec<FamilyMember>>;
    fn delete_family_member(&self, id: FamilyMemberId) -> RepoResult<()>;
}

/// SQLite-backed family member repository.
pub struct SqliteFamilyMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFamilyMemberRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "family_members", FAMILY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl FamilyMemberRepository for SqliteFamilyMemberRepository<'_> {
    fn create_family_member(&self, member: &FamilyMember) -> RepoResult<FamilyMemberId> {
        member.validate()?;

        self.conn.execute(
            "INSERT INTO family_members (
                uuid,
                user_uuid,
                name,
                relationship,
                phone,
                email,
                emergency_contact
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                member.uuid.to_string(),
                member.user_uuid.to_string(),
                member.name.as_str(),
                member.relationship.as_str(),
                member.phone.as_deref(),
                member.email.as_deref(),
                flag_to_int(member.emergency_contact),
            ],
        )?;

        Ok(member.uuid)
    }

    fn update_family_member(&self, member: &FamilyMember) -> RepoResult<()> {
        member.validate()?;

        let changed = self.conn.execute(
            "UPDATE family_members
             SET
                name = ?1,
                relationship = ?2,
                phone = ?3,
                email = ?4,
                emergency_contact = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                member.name.as_str(),
                member.relationship.as_str(),
                member.phone.as_deref(),
                member.email.as_deref(),
                flag_to_int(member.emergency_contact),
                member.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(member.uuid));
        }

        Ok(())
    }

    fn get_family_member(&self, id: FamilyMemberId) -> RepoResult<Option<FamilyMember>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FAMILY_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_family_member_row(row)?));
        }

        Ok(None)
    }

    fn list_family_members(&self, user_uuid: UserId) -> RepoResult<Vec<FamilyMember>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FAMILY_SELECT_SQL}
             WHERE user_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([user_uuid.to_string()])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_family_member_row(row)?);
        }

        Ok(members)
    }

    fn delete_family_member(&self, id: FamilyMemberId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM family_members WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_family_member_row(row: &Row<'_>) -> RepoResult<FamilyMember> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;

    let member = FamilyMember {
        uuid: parse_record_uuid(&uuid_text, "family_members.uuid")?,
        user_uuid: parse_record_uuid(&user_text, "family_members.user_uuid")?,
        name: row.get("name")?,
        relationship: row.get("relationship")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        emergency_contact: parse_flag(
            row.get("emergency_contact")?,
            "family_members.emergency_contact",
        )?,
        created_at: row.get("created_at")?,
    };
    member.validate()?;
    Ok(member)
}
