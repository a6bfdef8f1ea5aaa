//! Dialogue configuration: accepted event kinds, reply wording and payload mode.
//!
//! The bot ships two presets that differ only in these three knobs.

use serde::Deserialize;

use crate::domain::events::EventKind;

/// How the final payload becomes the outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadMode {
    /// Send the payload text as typed.
    Verbatim,
    /// Ask the composer to write the message from the payload.
    Composed,
}

/// Named preset selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialoguePreset {
    /// Direct-message flow that composes a game invitation.
    #[default]
    GameInvite,
    /// Mention flow that forwards a question verbatim.
    QuestionRelay,
}

/// Reply and prompt wording.
///
/// Templates use `{placeholder}` substitution; see each method for the
/// placeholders it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    pub greeting: String,
    pub empty_recipients: String,
    /// `{unmatched}`, `{valid}`
    pub unmatched: String,
    /// `{recipients}`
    pub recipients_confirmed: String,
    /// `{sender}`, `{recipients}`, `{payload}`
    pub composer_prompt: String,
    /// `{error}`
    pub directory_error: String,
    /// `{error}`
    pub composer_error: String,
    pub delivery_succeeded: String,
    /// `{failures}`
    pub delivery_failed: String,
}

impl PromptTemplates {
    pub fn game_invite() -> Self {
        Self {
            greeting: "Hi! Who do you want to message? Please provide a comma separated list of names.".to_string(),
            empty_recipients: "Please provide at least one name, separated by commas.".to_string(),
            unmatched: "Could not match: {unmatched}.\nValid names are: {valid}.\nPlease send the list of names again.".to_string(),
            recipients_confirmed: "Matched recipients: {recipients}.\nPlease enter the name of the game you'd like to play.".to_string(),
            composer_prompt: "You are a game invitation generator. Write a friendly invitation from {sender} to {recipients} for playing the game {payload}.".to_string(),
            directory_error: "Error fetching users for matching: {error}".to_string(),
            composer_error: "Error contacting the message composer: {error}".to_string(),
            delivery_succeeded: "Invitation sent successfully!".to_string(),
            delivery_failed: "Failed to send invitations to some recipients: {failures}".to_string(),
        }
    }

    pub fn question_relay() -> Self {
        Self {
            greeting: "Hi! Who should I forward your question to? Please provide a comma separated list of names.".to_string(),
            recipients_confirmed: "Matched recipients: {recipients}.\nWhat question would you like to send them?".to_string(),
            composer_prompt: "Rewrite this question from {sender} to {recipients} so it reads clearly and politely: {payload}".to_string(),
            delivery_succeeded: "Question forwarded successfully!".to_string(),
            delivery_failed: "Failed to forward the question to some recipients: {failures}".to_string(),
            ..Self::game_invite()
        }
    }

    pub fn render_unmatched(&self, unmatched: &[String], valid: &[String]) -> String {
        let unmatched = unmatched.join(", ");
        let valid = valid.join(", ");
        render(
            &self.unmatched,
            &[("unmatched", unmatched.as_str()), ("valid", valid.as_str())],
        )
    }

    pub fn render_recipients_confirmed(&self, names: &[String]) -> String {
        let names = names.join(", ");
        render(&self.recipients_confirmed, &[("recipients", names.as_str())])
    }

    pub fn render_composer_prompt(&self, sender: &str, names: &[String], payload: &str) -> String {
        let names = names.join(", ");
        render(
            &self.composer_prompt,
            &[
                ("sender", sender),
                ("recipients", names.as_str()),
                ("payload", payload),
            ],
        )
    }

    pub fn render_directory_error(&self, error: &str) -> String {
        render(&self.directory_error, &[("error", error)])
    }

    pub fn render_composer_error(&self, error: &str) -> String {
        render(&self.composer_error, &[("error", error)])
    }

    pub fn render_delivery_failed(&self, failures: &[String]) -> String {
        let failures = failures.join("; ");
        render(&self.delivery_failed, &[("failures", failures.as_str())])
    }
}

/// Substitutes every `{key}` in `template` in a single left-to-right pass.
///
/// Substituted values are copied out verbatim and never rescanned, so user
/// text that looks like a placeholder stays as typed. Unknown keys are kept.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Full parameterisation of the dialogue handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueConfig {
    pub accepted_event_kinds: Vec<EventKind>,
    pub templates: PromptTemplates,
    pub payload_mode: PayloadMode,
}

impl DialogueConfig {
    pub fn from_preset(preset: DialoguePreset) -> Self {
        match preset {
            DialoguePreset::GameInvite => Self {
                accepted_event_kinds: vec![EventKind::DirectMessage, EventKind::Message],
                templates: PromptTemplates::game_invite(),
                payload_mode: PayloadMode::Composed,
            },
            DialoguePreset::QuestionRelay => Self {
                accepted_event_kinds: vec![EventKind::Mention],
                templates: PromptTemplates::question_relay(),
                payload_mode: PayloadMode::Verbatim,
            },
        }
    }

    pub fn with_payload_mode(mut self, mode: PayloadMode) -> Self {
        self.payload_mode = mode;
        self
    }

    pub fn with_event_kinds(mut self, kinds: Vec<EventKind>) -> Self {
        self.accepted_event_kinds = kinds;
        self
    }

    pub fn accepts(&self, kind: EventKind) -> bool {
        self.accepted_event_kinds.contains(&kind)
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self::from_preset(DialoguePreset::default())
    }
}
