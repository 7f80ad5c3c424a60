//! Appointment repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Appointment::validate()` before SQL mutations.
//! - No status column exists; upcoming/past is derived at read time by
//!   the dashboard engine.

use crate::model::appointment::{Appointment, AppointmentId};
use crate::model::profile::UserId;
use crate::repo::{ensure_connection_ready, parse_record_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const APPOINTMENT_SELECT_SQL: &str = "SELECT
    uuid,
    user_uuid,
    doctor_name,
    specialty,
    date,
    time,
    location,
    notes,
    created_at
FROM appointments";

const APPOINTMENT_COLUMNS: &[&str] = &[
    "uuid",
    "user_uuid",
    "doctor_name",
    "specialty",
    "date",
    "time",
    "location",
    "notes",
    "created_at",
];

/// Repository interface for appointment CRUD operations.
pub trait AppointmentRepository {
    fn create_appointment(&self, appointment: &Appointment) -> RepoResult<AppointmentId>;
    fn update_appointment(&self, appointment: &Appointment) -> RepoResult<()>;
    fn get_appointment(&self, id: AppointmentId) -> RepoResult<Option<Appointment>>;
    /// Lists one user's appointments, newest first.
    fn list_appointments(&self, user_uuid: UserId) -> RepoResult<Vec<Appointment>>;
    fn delete_appointment(&self, id: AppointmentId) -> RepoResult<()>;
}

/// SQLite-backed appointment repository.
pub struct SqliteAppointmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAppointmentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "appointments", APPOINTMENT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AppointmentRepository for SqliteAppointmentRepository<'_> {
    fn create_appointment(&self, appointment: &Appointment) -> RepoResult<AppointmentId> {
        appointment.validate()?;

        self.conn.execute(
            "INSERT INTO appointments (
                uuid,
                user_uuid,
                doctor_name,
                specialty,
                date,
                time,
                location,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                appointment.uuid.to_string(),
                appointment.user_uuid.to_string(),
                appointment.doctor_name.as_str(),
                appointment.specialty.as_deref(),
                appointment.date.as_str(),
                appointment.time.as_str(),
                appointment.location.as_deref(),
                appointment.notes.as_deref(),
            ],
        )?;

        Ok(appointment.uuid)
    }

    fn update_appointment(&self, appointment: &Appointment) -> RepoResult<()> {
        appointment.validate()?;

        let changed = self.conn.execute(
            "UPDATE appointments
             SET
                doctor_name = ?1,
                specialty = ?2,
                date = ?3,
                time = ?4,
                location = ?5,
                notes = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                appointment.doctor_name.as_str(),
                appointment.specialty.as_deref(),
                appointment.date.as_str(),
                appointment.time.as_str(),
                appointment.location.as_deref(),
                appointment.notes.as_deref(),
                appointment.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(appointment.uuid));
        }

        Ok(())
    }

    fn get_appointment(&self, id: AppointmentId) -> RepoResult<Option<Appointment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{APPOINTMENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_appointment_row(row)?));
        }

        Ok(None)
    }

    fn list_appointments(&self, user_uuid: UserId) -> RepoResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{APPOINTMENT_SELECT_SQL}
             WHERE user_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([user_uuid.to_string()])?;
        let mut appointments = Vec::new();
        while let Some(row) = rows.next()? {
            appointments.push(parse_appointment_row(row)?);
        }

        Ok(appointments)
    }

    fn delete_appointment(&self, id: AppointmentId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM appointments WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_appointment_row(row: &Row<'_>) -> RepoResult<Appointment> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;

    let appointment = Appointment {
        uuid: parse_record_uuid(&uuid_text, "appointments.uuid")?,
        user_uuid: parse_record_uuid(&user_text, "appointments.user_uuid")?,
        doctor_name: row.get("doctor_name")?,
        specialty: row.get("specialty")?,
        date: row.get("date")?,
        time: row.get("time")?,
        location: row.get("location")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };
    appointment.validate()?;
    Ok(appointment)
}
