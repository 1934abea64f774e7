// remote-client/src/settings.rs
// Remote settings - JSON file storage

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, ClientResult};
use crate::session::Remote;

/// The three settings a remote needs before it may talk to the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Display name ("Livingroom")
    #[serde(default)]
    pub name: String,
    /// Remote identifier used in request paths ("livingroom")
    #[serde(default)]
    pub id: String,
    /// Zone the remote belongs to
    #[serde(default)]
    pub home: String,
}

impl RemoteSettings {
    pub fn new(name: impl Into<String>, id: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            home: home.into(),
        }
    }

    /// Names of the settings that are absent or blank
    pub fn missing(&self) -> Vec<&'static str> {
        [("name", &self.name), ("id", &self.id), ("home", &self.home)]
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Turn complete settings into the session's remote identity
    pub fn require(self) -> ClientResult<Remote> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ClientError::MissingSettings(missing));
        }
        Ok(Remote::new(self.id, self.name, self.home))
    }
}

/// Settings storage
#[derive(Debug, Clone)]
pub struct SettingsStorage {
    path: PathBuf,
}

impl SettingsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Make sure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, settings: &RemoteSettings) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Saved remote settings");
        Ok(())
    }

    /// Load whatever is stored, `None` if nothing readable is there
    pub fn load(&self) -> Option<RemoteSettings> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable settings");
                None
            }
        }
    }

    /// Load the remote identity, failing with the list of missing settings
    pub fn load_remote(&self) -> ClientResult<Remote> {
        self.load().unwrap_or_default().require()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reports_blank_fields() {
        let settings = RemoteSettings::new("Kitchen", "  ", "");
        assert_eq!(settings.missing(), vec!["id", "home"]);
        assert!(!settings.is_complete());
    }

    #[test]
    fn test_require_builds_remote() {
        let remote = RemoteSettings::new("Kitchen", "kitchen", "zone2")
            .require()
            .unwrap();
        assert_eq!(remote.id(), "kitchen");
        assert_eq!(remote.name(), "Kitchen");
        assert_eq!(remote.home(), "zone2");
    }
}
