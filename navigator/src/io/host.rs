//! Host lookups the post-processing rules depend on.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::messages::Diagnostics;
use crate::io::sanity::check_for_ansible;

pub const DEFAULT_SANITY_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_OUTPUT_LIMIT_BYTES: usize = 64 * 1024;

/// Questions a rule may ask about the machine it runs on.
pub trait Host {
    /// Resolve `program` on the executable search path.
    fn find_executable(&self, program: &str) -> Option<PathBuf>;

    /// Verify ansible works without an execution environment.
    fn ansible_sanity_check(&self) -> Diagnostics;
}

/// The real machine: `PATH` lookups and child processes.
#[derive(Debug, Clone)]
pub struct SystemHost {
    pub sanity_timeout: Duration,
    pub output_limit_bytes: usize,
}

impl Default for SystemHost {
    fn default() -> Self {
        Self {
            sanity_timeout: DEFAULT_SANITY_TIMEOUT,
            output_limit_bytes: DEFAULT_OUTPUT_LIMIT_BYTES,
        }
    }
}

impl Host for SystemHost {
    fn find_executable(&self, program: &str) -> Option<PathBuf> {
        if program.is_empty() {
            return None;
        }
        which::which(program).ok()
    }

    fn ansible_sanity_check(&self) -> Diagnostics {
        let ansible = self.find_executable("ansible");
        check_for_ansible(
            ansible.as_deref(),
            self.sanity_timeout,
            self.output_limit_bytes,
        )
    }
}
