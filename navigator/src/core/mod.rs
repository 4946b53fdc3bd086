//! Deterministic data model and conversions for configuration post-processing.
//!
//! Core modules perform no filesystem or process I/O. They describe entries,
//! values, and diagnostics and provide the pure conversions rules rely on.

pub mod configuration;
pub mod convert;
pub mod definitions;
pub mod entry;
pub mod inventory;
pub mod messages;
pub mod value;
