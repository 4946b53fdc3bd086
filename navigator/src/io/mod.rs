//! Side-effecting helpers: filesystem, executable lookup, child processes.

pub mod host;
pub mod log_file;
pub mod process;
pub mod sanity;
pub mod settings;
