//! Scene Model

use serde::{Deserialize, Serialize};

/// Scene entity (a source or activity, e.g. a streaming service)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneInfo {
    #[serde(default)]
    pub scene: String,
    pub name: String,
    /// Type tag, older services publish it as `ux-hint`
    #[serde(default, rename = "type", alias = "ux-hint")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SceneInfo {
    pub fn new(scene: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            name: name.into(),
            kind: None,
            description: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}
