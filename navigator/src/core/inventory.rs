//! Classification of inventory arguments.

use crate::core::convert::abs_user_path;

/// One inventory argument as passed to ansible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventorySource {
    /// Inline comma-separated hosts, e.g. `web1,web2,`.
    HostList(String),
    /// Inventory file or directory, stored as an absolute path.
    Path(String),
}

impl InventorySource {
    /// A comma marks a host list; anything else is a path.
    ///
    /// Host list syntax is not validated beyond the comma.
    pub fn classify(raw: &str) -> Self {
        if raw.contains(',') {
            Self::HostList(raw.to_string())
        } else {
            Self::Path(abs_user_path(raw))
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::HostList(hosts) => hosts,
            Self::Path(path) => path,
        }
    }
}
