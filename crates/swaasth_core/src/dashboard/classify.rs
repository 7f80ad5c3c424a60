//! Pure classification passes over care-record collections.
//!
//! # Invariants
//! - Inputs are borrowed and never mutated.
//! - An appointment dated exactly at the reference time is upcoming.
//! - Unparseable appointment dates are excluded from both partitions and
//!   reported as data-quality issues; the record still counts in totals.

use crate::model::appointment::Appointment;
use crate::model::family_member::FamilyMember;
use crate::model::medicine::Medicine;
use crate::model::message::Message;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

/// One malformed record found while classifying a batch.
///
/// Classification skips the offending record and continues; callers decide
/// how to surface the anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityIssue {
    /// Record that carried the malformed value.
    pub record_uuid: Uuid,
    /// Offending field name.
    pub field: &'static str,
    /// Raw stored value.
    pub value: String,
}

/// Upcoming/past partition of one user's appointments.
#[derive(Debug, Clone)]
pub struct AppointmentClassification<'a> {
    /// Appointments dated at or after the reference time, ascending by
    /// parsed date.
    pub upcoming: Vec<&'a Appointment>,
    /// Appointments dated before the reference time, in input order.
    pub past: Vec<&'a Appointment>,
    /// Records excluded because their date failed to parse.
    pub issues: Vec<DataQualityIssue>,
}

impl<'a> AppointmentClassification<'a> {
    /// The next appointment to surface on the dashboard, when one exists.
    pub fn next(&self) -> Option<&'a Appointment> {
        self.upcoming.first().copied()
    }
}

/// Taken/pending partition of one user's medicines.
#[derive(Debug, Clone)]
pub struct MedicineClassification<'a> {
    /// Medicines whose current dose was marked taken.
    pub taken: Vec<&'a Medicine>,
    /// Medicines still waiting for their current dose, in input order.
    pub pending: Vec<&'a Medicine>,
    /// Pending medicine with the earliest known next dose; ties keep the
    /// earliest input position. Pending medicines without a scheduled
    /// dose are never selected here.
    pub next_medicine: Option<&'a Medicine>,
}

/// Parses a stored appointment date into epoch milliseconds UTC.
///
/// Accepted shapes: `YYYY-MM-DD` (interpreted as midnight UTC, matching
/// how the date was compared in the previous app generation) and full
/// RFC 3339 timestamps. Anything else is a data-quality problem for the
/// caller to report.
pub fn parse_appointment_date_ms(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(instant.timestamp_millis());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Partitions appointments around the caller-supplied reference time.
pub fn classify_appointments(
    appointments: &[Appointment],
    now_ms: i64,
) -> AppointmentClassification<'_> {
    let mut upcoming: Vec<(i64, &Appointment)> = Vec::new();
    let mut past = Vec::new();
    let mut issues = Vec::new();

    for appointment in appointments {
        match parse_appointment_date_ms(&appointment.date) {
            Some(date_ms) if date_ms >= now_ms => upcoming.push((date_ms, appointment)),
            Some(_) => past.push(appointment),
            None => issues.push(DataQualityIssue {
                record_uuid: appointment.uuid,
                field: "date",
                value: appointment.date.clone(),
            }),
        }
    }

    // Stable sort keeps input order between equal dates.
    upcoming.sort_by_key(|(date_ms, _)| *date_ms);

    AppointmentClassification {
        upcoming: upcoming
            .into_iter()
            .map(|(_, appointment)| appointment)
            .collect(),
        past,
        issues,
    }
}

/// Partitions medicines by the taken flag and selects the next dose.
pub fn classify_medicines(medicines: &[Medicine]) -> MedicineClassification<'_> {
    let mut taken = Vec::new();
    let mut pending = Vec::new();
    let mut next_medicine: Option<(i64, &Medicine)> = None;

    for medicine in medicines {
        if medicine.taken {
            taken.push(medicine);
            continue;
        }
        pending.push(medicine);

        if let Some(dose_ms) = medicine.next_dose_at {
            // Strict comparison keeps the earliest input position on ties.
            let earlier = match next_medicine {
                Some((best_ms, _)) => dose_ms < best_ms,
                None => true,
            };
            if earlier {
                next_medicine = Some((dose_ms, medicine));
            }
        }
    }

    MedicineClassification {
        taken,
        pending,
        next_medicine: next_medicine.map(|(_, medicine)| medicine),
    }
}

/// Counts messages toward the unread badge.
///
/// Only received messages are counted; sent messages are implicitly read
/// whatever their stored flag says.
pub fn classify_messages(messages: &[Message]) -> usize {
    messages
        .iter()
        .filter(|message| message.is_unread())
        .count()
}

/// Counts family members flagged for urgent contact.
pub fn emergency_contact_count(family_members: &[FamilyMember]) -> usize {
    family_members
        .iter()
        .filter(|member| member.emergency_contact)
        .count()
}

#[cfg(test)]
mod tests {
    use super::parse_appointment_date_ms;

    #[test]
    fn parses_plain_calendar_dates_as_midnight_utc() {
        assert_eq!(parse_appointment_date_ms("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_appointment_date_ms(" 1970-01-02 "), Some(86_400_000));
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        assert_eq!(
            parse_appointment_date_ms("1970-01-01T01:00:00Z"),
            Some(3_600_000)
        );
        assert_eq!(
            parse_appointment_date_ms("1970-01-01T02:00:00+01:00"),
            Some(3_600_000)
        );
    }

    #[test]
    fn rejects_unparseable_values() {
        assert_eq!(parse_appointment_date_ms("next tuesday"), None);
        assert_eq!(parse_appointment_date_ms("2026-13-40"), None);
        assert_eq!(parse_appointment_date_ms(""), None);
    }
}
