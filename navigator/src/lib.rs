//! Configuration post-processing for ansible-navigator.
//!
//! Settings file, environment, and command-line values are layered over the
//! entry defaults, then every entry is normalized and cross-validated in one
//! pass that collects diagnostics instead of stopping at the first problem.
//!
//! - **[`core`]**: Pure data and conversions (entries, values, messages, catalog).
//! - **[`io`]**: Side effects (settings files, log files, executable lookup,
//!   child processes).
//! - **[`actions`]**: Subcommand handler packages and their mode support.
//!
//! [`post_process`] holds the per-entry rules; [`configurator`] layers the
//! sources and drives a pass.

pub mod actions;
pub mod configurator;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod post_process;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
