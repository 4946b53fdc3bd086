//! Action packages: named providers of subcommand implementations.
//!
//! A package is loaded from the [`ActionRegistry`] by identifier, then asked for
//! the handler of a subcommand. Handlers declare which user-interface modes they
//! can run in. Packages are consulted in the priority order configured in
//! `Configuration::internals.action_packages`.

pub mod builtin;

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};

/// A subcommand implementation.
pub trait Action {
    fn name(&self) -> &str;

    /// Can run once and write its result to stdout.
    fn supports_stdout(&self) -> bool;

    /// Can run as an interactive session.
    fn supports_interactive(&self) -> bool;
}

/// A loaded provider of subcommand handlers.
pub trait ActionPackage {
    /// Look up a handler by its normalized name (`ee_details`, not `ee-details`).
    fn get(&self, name: &str) -> Result<&dyn Action>;
}

type PackageLoader = Box<dyn Fn() -> Result<Box<dyn ActionPackage>>>;

/// Identifier-to-loader lookup standing in for dynamic module imports.
#[derive(Default)]
pub struct ActionRegistry {
    loaders: BTreeMap<String, PackageLoader>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry containing the package compiled into this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(crate::core::definitions::BUILTIN_ACTION_PACKAGE, || {
            Ok(Box::new(builtin::BuiltinActions::new()))
        });
        registry
    }

    pub fn register<F>(&mut self, identifier: &str, loader: F)
    where
        F: Fn() -> Result<Box<dyn ActionPackage>> + 'static,
    {
        self.loaders.insert(identifier.to_string(), Box::new(loader));
    }

    /// Load the package registered under `identifier`.
    pub fn load(&self, identifier: &str) -> Result<Box<dyn ActionPackage>> {
        let loader = self
            .loaders
            .get(identifier)
            .ok_or_else(|| anyhow!("no action package named '{identifier}' is registered"))?;
        loader()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("packages", &self.loaders.keys().collect::<Vec<_>>())
            .finish()
    }
}
