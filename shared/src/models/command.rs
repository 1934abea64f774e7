//! Command Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single ad-hoc command offered by a zone or scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Commands available to a remote, grouped by category
///
/// Keys are command identifiers, used verbatim in `/command/{remote}/{category}/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCatalog {
    #[serde(default)]
    pub zone: BTreeMap<String, CommandInfo>,
    #[serde(default)]
    pub scene: BTreeMap<String, CommandInfo>,
}

impl CommandCatalog {
    pub fn is_empty(&self) -> bool {
        self.zone.is_empty() && self.scene.is_empty()
    }
}
