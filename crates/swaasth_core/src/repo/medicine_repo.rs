//! Medicine repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `medicines` storage.
//! - Own the taken-flag toggle write path.
//!
//! # Invariants
//! - Write paths call `Medicine::validate()` before SQL mutations.
//! - Deletes are permanent; there is no tombstone state.

use crate::model::medicine::{Medicine, MedicineId};
use crate::model::profile::UserId;
use crate::repo::{
    ensure_connection_ready, flag_to_int, parse_flag, parse_record_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const MEDICINE_SELECT_SQL: &str = "SELECT
    uuid,
    user_uuid,
    name,
    dosage,
    frequency,
    instructions,
    taken,
    next_dose_at,
    created_at
FROM medicines";

const MEDICINE_COLUMNS: &[&str] = &[
    "uuid",
    "user_uuid",
    "name",
    "dosage",
    "frequency",
    "instructions",
    "taken",
    "next_dose_at",
    "created_at",
];

/// Repository interface for medicine CRUD operations.
pub trait MedicineRepository {
    fn create_medicine(&self, medicine: &Medicine) -> RepoResult<MedicineId>;
    fn update_medicine(&self, medicine: &Medicine) -> RepoResult<()>;
    fn get_medicine(&self, id: MedicineId) -> RepoResult<Option<Medicine>>;
    /// Lists one user's medicines, newest first.
    fn list_medicines(&self, user_uuid: UserId) -> RepoResult<Vec<Medicine>>;
    /// Sets the taken flag to an explicit value.
    fn set_medicine_taken(&self, id: MedicineId, taken: bool) -> RepoResult<()>;
    fn delete_medicine(&self, id: MedicineId) -> RepoResult<()>;
}

/// SQLite-backed medicine repository.
pub struct SqliteMedicineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMedicineRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "medicines", MEDICINE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl MedicineRepository for SqliteMedicineRepository<'_> {
    fn create_medicine(&self, medicine: &Medicine) -> RepoResult<MedicineId> {
        medicine.validate()?;

        self.conn.execute(
            "INSERT INTO medicines (
                uuid,
                user_uuid,
                name,
                dosage,
                frequency,
                instructions,
                taken,
                next_dose_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                medicine.uuid.to_string(),
                medicine.user_uuid.to_string(),
                medicine.name.as_str(),
                medicine.dosage.as_str(),
                medicine.frequency.as_str(),
                medicine.instructions.as_deref(),
                flag_to_int(medicine.taken),
                medicine.next_dose_at,
            ],
        )?;

        Ok(medicine.uuid)
    }

    fn update_medicine(&self, medicine: &Medicine) -> RepoResult<()> {
        medicine.validate()?;

        let changed = self.conn.execute(
            "UPDATE medicines
             SET
                name = ?1,
                dosage = ?2,
                frequency = ?3,
                instructions = ?4,
                taken = ?5,
                next_dose_at = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                medicine.name.as_str(),
                medicine.dosage.as_str(),
                medicine.frequency.as_str(),
                medicine.instructions.as_deref(),
                flag_to_int(medicine.taken),
                medicine.next_dose_at,
                medicine.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(medicine.uuid));
        }

        Ok(())
    }

    fn get_medicine(&self, id: MedicineId) -> RepoResult<Option<Medicine>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEDICINE_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_medicine_row(row)?));
        }

        Ok(None)
    }

    fn list_medicines(&self, user_uuid: UserId) -> RepoResult<Vec<Medicine>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEDICINE_SELECT_SQL}
             WHERE user_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([user_uuid.to_string()])?;
        let mut medicines = Vec::new();
        while let Some(row) = rows.next()? {
            medicines.push(parse_medicine_row(row)?);
        }

        Ok(medicines)
    }

    fn set_medicine_taken(&self, id: MedicineId, taken: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE medicines
             SET
                taken = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![flag_to_int(taken), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_medicine(&self, id: MedicineId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM medicines WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_medicine_row(row: &Row<'_>) -> RepoResult<Medicine> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;

    let medicine = Medicine {
        uuid: parse_record_uuid(&uuid_text, "medicines.uuid")?,
        user_uuid: parse_record_uuid(&user_text, "medicines.user_uuid")?,
        name: row.get("name")?,
        dosage: row.get("dosage")?,
        frequency: row.get("frequency")?,
        instructions: row.get("instructions")?,
        taken: parse_flag(row.get("taken")?, "medicines.taken")?,
        next_dose_at: row.get("next_dose_at")?,
        created_at: row.get("created_at")?,
    };
    medicine.validate()?;
    Ok(medicine)
}
