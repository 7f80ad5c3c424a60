//! Flutter-facing bindings for the swaasth core crate.

pub mod api;
