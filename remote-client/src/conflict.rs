//! Conflict presentation.
//!
//! When an assignment would disturb other zones the service answers with the
//! list of those zones. This module turns that list into something a person
//! can decide on and defines the seam ([`ConflictPresenter`]) through which
//! a front end returns the decision.

use async_trait::async_trait;

/// What the user chose in the conflict dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Play the scene in the requesting zone as well; other zones keep theirs.
    Clone,
    /// Put the conflicting zones in standby and play here only.
    Displace,
    /// Do nothing.
    Cancel,
}

/// One zone disturbed by the requested assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictEntry {
    pub zone: String,
    pub zone_name: String,
    /// Display name of what the zone plays now
    pub scene_name: String,
}

/// Conflicting zones resolved to display names, in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictDetails {
    pub entries: Vec<ConflictEntry>,
}

impl ConflictDetails {
    pub fn push(
        &mut self,
        zone: impl Into<String>,
        zone_name: impl Into<String>,
        scene_name: impl Into<String>,
    ) {
        self.entries.push(ConflictEntry {
            zone: zone.into(),
            zone_name: zone_name.into(),
            scene_name: scene_name.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zone names joined with " and ".
    pub fn zone_list(&self) -> String {
        if self.entries.is_empty() {
            return "other zones".to_string();
        }
        self.entries
            .iter()
            .map(|e| e.zone_name.as_str())
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Distinct occupying scene names, first-seen order, joined with " and ".
    pub fn scene_list(&self) -> String {
        let mut distinct: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !distinct.contains(&entry.scene_name.as_str()) {
                distinct.push(&entry.scene_name);
            }
        }
        distinct.join(" and ")
    }

    /// Whether any conflicting zone plays something other than `scene_name`.
    pub fn differs_from(&self, scene_name: &str) -> bool {
        self.entries.iter().any(|e| e.scene_name != scene_name)
    }
}

/// Text of the conflict dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPrompt {
    /// Display name of the requested scene
    pub scene_name: String,
    pub details: ConflictDetails,
    pub message: String,
    pub clone_label: String,
    pub displace_label: String,
}

impl ConflictPrompt {
    pub const CANCEL_LABEL: &'static str = "Cancel";

    pub fn build(details: ConflictDetails, scene_name: &str) -> Self {
        let zones = details.zone_list();
        let (they, are) = if details.len() == 1 {
            ("it's", "is")
        } else {
            ("they are", "are")
        };

        let (message, clone_label, displace_label) = if details.differs_from(scene_name) {
            (
                format!(
                    "Selecting {} will cause problems for {} since {} using {}",
                    scene_name,
                    zones,
                    they,
                    details.scene_list()
                ),
                format!("Play {} in {} as well", scene_name, zones),
                format!("Place {} in standby and play here only", zones),
            )
        } else {
            (
                format!("{} {} already playing {}", zones, are, scene_name),
                format!("Play {} here as well", scene_name),
                format!("Place {} in standby and play {} here only", zones, scene_name),
            )
        };

        Self {
            scene_name: scene_name.to_string(),
            details,
            message,
            clone_label,
            displace_label,
        }
    }
}

/// Presentation seam: show a conflict, return the user's decision.
#[async_trait]
pub trait ConflictPresenter: Send + Sync {
    async fn choose(&self, prompt: &ConflictPrompt) -> ConflictDecision;
}

/// A fixed decision answers every conflict the same way (non-interactive use).
#[async_trait]
impl ConflictPresenter for ConflictDecision {
    async fn choose(&self, prompt: &ConflictPrompt) -> ConflictDecision {
        tracing::info!(message = %prompt.message, decision = ?self, "Conflict answered by policy");
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(entries: &[(&str, &str)]) -> ConflictDetails {
        let mut details = ConflictDetails::default();
        for (zone, scene) in entries {
            details.push(zone.to_lowercase(), *zone, *scene);
        }
        details
    }

    #[test]
    fn test_single_zone_playing_other_scene() {
        let prompt = ConflictPrompt::build(details(&[("Kitchen", "Netflix")]), "Spotify");
        assert_eq!(
            prompt.message,
            "Selecting Spotify will cause problems for Kitchen since it's using Netflix"
        );
        assert_eq!(prompt.clone_label, "Play Spotify in Kitchen as well");
        assert_eq!(prompt.displace_label, "Place Kitchen in standby and play here only");
    }

    #[test]
    fn test_zones_already_playing_requested_scene() {
        let prompt = ConflictPrompt::build(
            details(&[("Kitchen", "Spotify"), ("Patio", "Spotify")]),
            "Spotify",
        );
        assert_eq!(prompt.message, "Kitchen and Patio are already playing Spotify");
        assert_eq!(prompt.clone_label, "Play Spotify here as well");
        assert_eq!(
            prompt.displace_label,
            "Place Kitchen and Patio in standby and play Spotify here only"
        );
    }

    #[test]
    fn test_single_zone_already_playing_uses_is() {
        let prompt = ConflictPrompt::build(details(&[("Kitchen", "Spotify")]), "Spotify");
        assert_eq!(prompt.message, "Kitchen is already playing Spotify");
    }

    #[test]
    fn test_distinct_scenes_listed_once() {
        let prompt = ConflictPrompt::build(
            details(&[("Kitchen", "Netflix"), ("Patio", "Plex"), ("Garage", "Netflix")]),
            "Spotify",
        );
        assert_eq!(
            prompt.message,
            "Selecting Spotify will cause problems for Kitchen and Patio and Garage \
             since they are using Netflix and Plex"
        );
    }

    #[test]
    fn test_mixed_scenes_count_as_differing() {
        let prompt = ConflictPrompt::build(
            details(&[("Kitchen", "Spotify"), ("Patio", "Plex")]),
            "Spotify",
        );
        assert!(prompt.message.starts_with("Selecting Spotify will cause problems"));
        assert!(prompt.message.ends_with("using Spotify and Plex"));
    }

    #[tokio::test]
    async fn test_fixed_decision_presenter() {
        let prompt = ConflictPrompt::build(details(&[("Kitchen", "Netflix")]), "Spotify");
        assert_eq!(
            ConflictDecision::Displace.choose(&prompt).await,
            ConflictDecision::Displace
        );
    }
}
