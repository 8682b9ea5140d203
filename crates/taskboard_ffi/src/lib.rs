//! Flutter-facing bindings for the board core.

pub mod api;
