//! Mode resolution against the active subcommand's handler.

use crate::actions::Action;
use crate::core::configuration::Configuration;
use crate::core::convert::oxford_comma;
use crate::core::definitions::{INTERACTIVE, STDOUT};
use crate::core::entry::Entry;
use crate::core::messages::Diagnostics;
use crate::post_process::PostProcessor;

fn supported_modes(action: &dyn Action) -> Vec<&'static str> {
    let mut modes = Vec::new();
    if action.supports_stdout() {
        modes.push(STDOUT);
    }
    if action.supports_interactive() {
        modes.push(INTERACTIVE);
    }
    modes
}

impl PostProcessor<'_> {
    /// Find the subcommand's handler in the configured action packages and
    /// confirm it can run in the requested mode.
    ///
    /// Packages are tried in priority order; the first one providing the
    /// handler wins. Packages that fail to load are skipped.
    pub(super) fn mode(&self, entry: &mut Entry, config: &Configuration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let app = config.app();
        let subcommand = config.subcommand(app).map_or(app, |sub| sub.name.as_str());
        let handler_name = subcommand.replace('-', "_");
        let packages = &config.internals.action_packages;

        let mut supported = None;
        for package_id in packages {
            let package = match self.actions.load(package_id) {
                Ok(package) => package,
                Err(err) => {
                    diagnostics.error(format!(
                        "Unable to load action package: '{package_id}': {err:#}"
                    ));
                    continue;
                }
            };
            match package.get(&handler_name) {
                Ok(action) => {
                    supported = Some(supported_modes(action));
                    break;
                }
                Err(err) => diagnostics.debug(format!(
                    "Unable to load subcommand '{subcommand}' from action package: '{package_id}': {err:#}"
                )),
            }
        }

        let Some(supported) = supported else {
            diagnostics.exit(format!(
                "Unable to find an action for '{subcommand}', tried: {}",
                oxford_comma(packages, "and")
            ));
            return diagnostics;
        };

        let requested = entry.value.current.to_string();
        if supported.iter().any(|mode| *mode == requested) {
            return diagnostics;
        }
        diagnostics.exit(format!(
            "Subcommand '{app}' does not support mode '{requested}'. Supported modes: {}.",
            oxford_comma(&supported, "and")
        ));
        if let Some(short) = entry.short_flag() {
            let alternatives: Vec<String> = supported
                .iter()
                .filter(|mode| **mode != requested)
                .map(|mode| format!("{short} {mode}"))
                .collect();
            diagnostics.hint(format!(
                "Try again with {}",
                oxford_comma(&alternatives, "or")
            ));
        }
        diagnostics
    }
}
