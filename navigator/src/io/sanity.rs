//! Check that ansible is usable without an execution environment.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::core::messages::Diagnostics;
use crate::io::process::run_command_with_timeout;

/// Verify that the `ansible` found on the search path answers `--version`.
///
/// `ansible` is the resolved executable, or `None` when it is not installed.
pub fn check_for_ansible(
    ansible: Option<&Path>,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let Some(ansible) = ansible else {
        diagnostics.exit("'ansible' could not be found on the executable search path");
        diagnostics.hint(
            "Install ansible-core or try again with '--ee true' to use an execution environment",
        );
        return diagnostics;
    };
    diagnostics.debug(format!("ansible found at {}", ansible.display()));

    let mut cmd = Command::new(ansible);
    cmd.arg("--version");
    match run_command_with_timeout(cmd, timeout, output_limit_bytes) {
        Ok(output) if output.timed_out => {
            diagnostics.exit(format!(
                "'{} --version' did not complete within {} seconds",
                ansible.display(),
                timeout.as_secs()
            ));
        }
        Ok(output) if !output.success() => {
            diagnostics.exit(format!(
                "'{} --version' failed: {}{}",
                ansible.display(),
                output.stderr_text().trim(),
                omitted_note(output.omitted_bytes())
            ));
        }
        Ok(output) => {
            let stdout = output.stdout_text();
            let version = stdout.lines().next().unwrap_or_default().trim();
            debug!(version, omitted_bytes = output.omitted_bytes(), "ansible sanity check passed");
            diagnostics.debug(format!(
                "ansible version: {version}{}",
                omitted_note(output.omitted_bytes())
            ));
        }
        Err(err) => {
            diagnostics.exit(format!(
                "'{} --version' could not be run: {err:#}",
                ansible.display()
            ));
        }
    }
    diagnostics
}

fn omitted_note(bytes: usize) -> String {
    if bytes == 0 {
        String::new()
    } else {
        format!(" ({bytes} bytes of output omitted)")
    }
}
