//! Shared shape checks for contact fields.
//!
//! # Responsibility
//! - Validate e-mail and phone inputs before persistence.
//!
//! # Invariants
//! - Checks are shape-only; no network or directory lookups.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-()]{5,19}$").expect("valid phone regex"));

/// Returns whether `value` has a plausible e-mail shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Returns whether `value` has a plausible phone-number shape.
///
/// Accepts an optional leading `+` and common separators; does not try to
/// verify country-specific numbering plans.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}
