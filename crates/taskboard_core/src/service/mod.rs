//! Board use-case services.
//!
//! # Responsibility
//! - Turn UI intents into validated engine calls.
//! - Keep rendering layers decoupled from ordering and filtering logic.

pub mod board_controller;
pub mod intent;
