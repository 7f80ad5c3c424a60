//! Dashboard aggregation engine.
//!
//! # Responsibility
//! - Derive read-only counts and "next relevant item" selections over a
//!   user's care records for summary display and filter tabs.
//!
//! # Invariants
//! - Every operation is a pure function over its inputs; the reference
//!   time is always caller-supplied, never read from a system clock.
//! - Empty collections are not errors; all aggregates degrade to zero.
//! - Malformed records are skipped and reported, never fatal.

mod classify;
mod snapshot;

pub use classify::{
    classify_appointments, classify_medicines, classify_messages, emergency_contact_count,
    parse_appointment_date_ms, AppointmentClassification, DataQualityIssue, MedicineClassification,
};
pub use snapshot::{
    dashboard_snapshot, AppointmentStats, DashboardSnapshot, FamilyStats, MedicineStats,
    MessageStats,
};
