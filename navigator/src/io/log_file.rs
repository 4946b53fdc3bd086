//! Log file provisioning.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Create the parent directory of `path` and touch the file.
///
/// Existing content is left alone.
pub fn provision_log_file(path: &Path) -> Result<()> {
    debug!(path = %path.display(), "provisioning log file");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok(())
}
