//! Handlers for the subcommands shipped with ansible-navigator.

use anyhow::{Result, anyhow};

use super::{Action, ActionPackage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinAction {
    name: &'static str,
    stdout: bool,
    interactive: bool,
}

impl Action for BuiltinAction {
    fn name(&self) -> &str {
        self.name
    }

    fn supports_stdout(&self) -> bool {
        self.stdout
    }

    fn supports_interactive(&self) -> bool {
        self.interactive
    }
}

const fn action(name: &'static str, stdout: bool, interactive: bool) -> BuiltinAction {
    BuiltinAction {
        name,
        stdout,
        interactive,
    }
}

static BUILTIN: [BuiltinAction; 9] = [
    action("collections", false, true),
    action("config", true, true),
    action("doc", true, true),
    action("ee_details", true, false),
    action("images", false, true),
    action("inventory", true, true),
    action("replay", false, true),
    action("run", true, true),
    action("welcome", false, true),
];

#[derive(Debug, Default)]
pub struct BuiltinActions;

impl BuiltinActions {
    pub fn new() -> Self {
        Self
    }
}

impl ActionPackage for BuiltinActions {
    fn get(&self, name: &str) -> Result<&dyn Action> {
        BUILTIN
            .iter()
            .find(|action| action.name == name)
            .map(|action| action as &dyn Action)
            .ok_or_else(|| anyhow!("no action named '{name}'"))
    }
}
