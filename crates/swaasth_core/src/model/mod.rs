//! Domain model for family health care records.
//!
//! # Responsibility
//! - Define the canonical record shapes owned by a user account.
//! - Keep per-record validation next to the data it guards.
//!
//! # Invariants
//! - Every record is identified by a stable uuid and owned by one user.
//! - Deletion is permanent; no record carries tombstone state.

pub mod appointment;
pub mod contact;
pub mod family_member;
pub mod medicine;
pub mod message;
pub mod profile;
pub mod vital;
