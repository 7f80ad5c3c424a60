//! Health vital repository contract and SQLite implementation.

use crate::model::profile::UserId;
use crate::model::vital::{Vital, VitalId, VitalKind};
use crate::repo::{ensure_connection_ready, parse_record_uuid, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const VITAL_SELECT_SQL: &str = "SELECT
    uuid,
    user_uuid,
    kind,
    value,
    unit,
    notes,
    recorded_at,
    created_at
FROM health_vitals";

const VITAL_COLUMNS: &[&str] = &[
    "uuid",
    "user_uuid",
    "kind",
    "value",
    "unit",
    "notes",
    "recorded_at",
    "created_at",
];

/// Repository interface for vital readings.
///
/// Readings are append-only history; there is no update path.
pub trait VitalRepository {
    fn create_vital(&self, vital: &Vital) -> RepoResult<VitalId>;
    /// Lists one user's readings, most recent first, optionally filtered
    /// by kind.
    fn list_vitals(&self, user_uuid: UserId, kind: Option<VitalKind>) -> RepoResult<Vec<Vital>>;
    fn delete_vital(&self, id: VitalId) -> RepoResult<()>;
}

/// SQLite-backed vital repository.
pub struct SqliteVitalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVitalRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "health_vitals", VITAL_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl VitalRepository for SqliteVitalRepository<'_> {
    fn create_vital(&self, vital: &Vital) -> RepoResult<VitalId> {
        vital.validate()?;

        self.conn.execute(
            "INSERT INTO health_vitals (
                uuid,
                user_uuid,
                kind,
                value,
                unit,
                notes,
                recorded_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                vital.uuid.to_string(),
                vital.user_uuid.to_string(),
                vital_kind_to_db(vital.kind),
                vital.value.as_str(),
                vital.unit.as_deref(),
                vital.notes.as_deref(),
                vital.recorded_at,
            ],
        )?;

        Ok(vital.uuid)
    }

    fn list_vitals(&self, user_uuid: UserId, kind: Option<VitalKind>) -> RepoResult<Vec<Vital>> {
        let mut sql = format!("{VITAL_SELECT_SQL} WHERE user_uuid = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(user_uuid.to_string())];

        if let Some(kind) = kind {
            sql.push_str(" AND kind = ?");
            bind_values.push(Value::Text(vital_kind_to_db(kind).to_string()));
        }

        sql.push_str(" ORDER BY recorded_at DESC, uuid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut vitals = Vec::new();
        while let Some(row) = rows.next()? {
            vitals.push(parse_vital_row(row)?);
        }

        Ok(vitals)
    }

    fn delete_vital(&self, id: VitalId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM health_vitals WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_vital_row(row: &Row<'_>) -> RepoResult<Vital> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;
    let kind_text: String = row.get("kind")?;

    let vital = Vital {
        uuid: parse_record_uuid(&uuid_text, "health_vitals.uuid")?,
        user_uuid: parse_record_uuid(&user_text, "health_vitals.user_uuid")?,
        kind: parse_vital_kind(&kind_text)?,
        value: row.get("value")?,
        unit: row.get("unit")?,
        notes: row.get("notes")?,
        recorded_at: row.get("recorded_at")?,
        created_at: row.get("created_at")?,
    };
    vital.validate()?;
    Ok(vital)
}

fn vital_kind_to_db(kind: VitalKind) -> &'static str {
    match kind {
        VitalKind::BloodPressure => "blood_pressure",
        VitalKind::HeartRate => "heart_rate",
        VitalKind::Weight => "weight",
        VitalKind::BloodSugar => "blood_sugar",
        VitalKind::Temperature => "temperature",
    }
}

fn parse_vital_kind(value: &str) -> RepoResult<VitalKind> {
    match value {
        "blood_pressure" => Ok(VitalKind::BloodPressure),
        "heart_rate" => Ok(VitalKind::HeartRate),
        "weight" => Ok(VitalKind::Weight),
        "blood_sugar" => Ok(VitalKind::BloodSugar),
        "temperature" => Ok(VitalKind::Temperature),
        other => Err(RepoError::InvalidData(format!(
            "invalid vital kind `{other}` in health_vitals.kind"
        ))),
    }
}
