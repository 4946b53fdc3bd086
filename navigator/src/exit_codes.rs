//! Stable exit codes for the ansible-navigator binary.

/// Configuration resolved without exit messages.
pub const OK: i32 = 0;
/// Post-processing produced at least one exit message.
pub const INVALID: i32 = 1;
/// Sources could not be read (settings file missing, unparsable, or off-schema).
pub const ERROR: i32 = 2;
