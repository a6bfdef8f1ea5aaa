//! Dialogue configuration: preset plus optional overrides

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialogue::{DialogueConfig, DialoguePreset, PayloadMode};
use crate::domain::events::EventKind;

/// Dialogue settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogueSettings {
    /// Named preset (`game_invite` | `question_relay`)
    #[serde(default)]
    pub preset: DialoguePreset,

    /// Overrides the preset's payload mode
    pub payload_mode: Option<PayloadMode>,

    /// Overrides the preset's accepted kinds (comma-separated)
    pub event_kinds: Option<String>,
}

impl DialogueSettings {
    /// Parsed `event_kinds` override, if set
    pub fn event_kinds(&self) -> Result<Option<Vec<EventKind>>, ValidationError> {
        let Some(raw) = self.event_kinds.as_deref() else {
            return Ok(None);
        };

        let kinds = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<EventKind>()
                    .map_err(|_| ValidationError::InvalidEventKind(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if kinds.is_empty() {
            return Err(ValidationError::NoEventKinds);
        }
        Ok(Some(kinds))
    }

    /// Effective payload mode after overrides
    pub fn payload_mode(&self) -> PayloadMode {
        self.payload_mode
            .unwrap_or(DialogueConfig::from_preset(self.preset).payload_mode)
    }

    /// Builds the dialogue configuration
    pub fn to_dialogue_config(&self) -> Result<DialogueConfig, ValidationError> {
        let mut config = DialogueConfig::from_preset(self.preset);
        if let Some(mode) = self.payload_mode {
            config = config.with_payload_mode(mode);
        }
        if let Some(kinds) = self.event_kinds()? {
            config = config.with_event_kinds(kinds);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.event_kinds().map(|_| ())
    }
}
