//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `swaasth_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Why: keep a tiny CLI probe to validate core crate wiring independently
    // from Flutter/FFI runtime setup.
    println!("swaasth_core ping={}", swaasth_core::ping());
    println!("swaasth_core version={}", swaasth_core::core_version());
}
