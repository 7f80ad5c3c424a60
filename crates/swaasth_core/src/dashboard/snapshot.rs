//! Bundled dashboard aggregate over all four record kinds.

use crate::dashboard::classify::{
    classify_appointments, classify_medicines, classify_messages, emergency_contact_count,
    DataQualityIssue,
};
use crate::model::appointment::Appointment;
use crate::model::family_member::FamilyMember;
use crate::model::medicine::Medicine;
use crate::model::message::Message;
use serde::Serialize;

/// Medicine counters for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicineStats {
    pub total: usize,
    pub taken: usize,
    pub pending: usize,
    /// Pending medicine with the earliest scheduled dose, when one exists.
    pub next_medicine: Option<Medicine>,
}

/// Appointment counters for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentStats {
    /// All appointments, including ones whose date failed to parse.
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
    /// Earliest upcoming appointment, when one exists.
    pub next: Option<Appointment>,
}

/// Family counters for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyStats {
    pub total: usize,
    pub emergency_contacts: usize,
}

/// Message counters for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageStats {
    pub total: usize,
    pub unread: usize,
}

/// Bundled aggregate consumed by summary/stat displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSnapshot {
    pub medicines: MedicineStats,
    pub appointments: AppointmentStats,
    pub family: FamilyStats,
    pub messages: MessageStats,
    /// Malformed records found while classifying; empty on clean data.
    pub issues: Vec<DataQualityIssue>,
}

/// Computes the full dashboard aggregate.
///
/// Pure function: identical inputs (including `now_ms`) always produce an
/// identical snapshot; no side effects, no I/O, no clock reads.
pub fn dashboard_snapshot(
    now_ms: i64,
    medicines: &[Medicine],
    appointments: &[Appointment],
    family_members: &[FamilyMember],
    messages: &[Message],
) -> DashboardSnapshot {
    let medicine_split = classify_medicines(medicines);
    let appointment_split = classify_appointments(appointments, now_ms);

    DashboardSnapshot {
        medicines: MedicineStats {
            total: medicines.len(),
            taken: medicine_split.taken.len(),
            pending: medicine_split.pending.len(),
            next_medicine: medicine_split.next_medicine.cloned(),
        },
        appointments: AppointmentStats {
            total: appointments.len(),
            upcoming: appointment_split.upcoming.len(),
            past: appointment_split.past.len(),
            next: appointment_split.next().cloned(),
        },
        family: FamilyStats {
            total: family_members.len(),
            emergency_contacts: emergency_contact_count(family_members),
        },
        messages: MessageStats {
            total: messages.len(),
            unread: classify_messages(messages),
        },
        issues: appointment_split.issues,
    }
}
