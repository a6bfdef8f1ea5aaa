//! AdvanceDialogueHandler - moves one user's dialogue forward by one event.
//!
//! Step flow:
//!
//! 1. No state: create it and ask for recipient names.
//! 2. `AwaitingRecipients`: fetch a fresh directory, match the comma-separated
//!    names. Any miss re-prompts with the valid names; a full match stores the
//!    recipients and asks for the payload.
//! 3. `AwaitingPayload`: optionally compose the message, fan it out, delete
//!    the state and report the outcome.
//!
//! The store is only touched between I/O calls, never across one.

use std::sync::Arc;

use crate::application::handlers::delivery::FanOutDispatcher;
use crate::domain::delivery::DeliveryOutcome;
use crate::domain::dialogue::{
    ConversationState, DialogueConfig, DialogueStep, PayloadMode, PromptTemplates,
};
use crate::domain::directory::{match_names, parse_fragments};
use crate::domain::foundation::{ChannelId, UserId};
use crate::ports::{
    Composer, ComposerError, ConversationStore, DirectoryProvider, Messenger, StoreError,
    StoreLookup,
};

/// One inbound dialogue message from a user.
#[derive(Debug, Clone)]
pub struct AdvanceDialogueCommand {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    /// Message text with any mention token already stripped.
    pub text: String,
}

/// What the event did to the dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueTurn {
    /// First contact; state created at `AwaitingRecipients`.
    Started,
    /// Blank recipient input; state unchanged.
    ///
    /// Answered before the directory is fetched, so all-blank text never
    /// reaches the matcher (where an empty fragment would bind the first entry).
    EmptyRecipients,
    /// Directory fetch failed; state unchanged so the user can retry.
    DirectoryUnavailable(String),
    /// Some names did not match; state unchanged.
    RecipientsUnresolved {
        unmatched: Vec<String>,
        valid_names: Vec<String>,
    },
    /// All names matched; state advanced to `AwaitingPayload`.
    RecipientsResolved { recipients: Vec<String> },
    /// Composer failed; state deleted, nothing delivered.
    ComposeFailed(String),
    /// Delivery attempted; state deleted.
    Completed(DeliveryOutcome),
    /// The state disappeared or moved on between two store calls.
    Abandoned,
}

/// Result of handling one dialogue message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceDialogueResult {
    pub turn: DialogueTurn,
    /// Reply posted to the originating channel, if any.
    pub reply: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvanceDialogueError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Conversation state machine.
pub struct AdvanceDialogueHandler {
    store: Arc<dyn ConversationStore>,
    directory: Arc<dyn DirectoryProvider>,
    messenger: Arc<dyn Messenger>,
    composer: Option<Arc<dyn Composer>>,
    dispatcher: FanOutDispatcher,
    config: DialogueConfig,
}

impl AdvanceDialogueHandler {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        directory: Arc<dyn DirectoryProvider>,
        messenger: Arc<dyn Messenger>,
        composer: Option<Arc<dyn Composer>>,
        config: DialogueConfig,
    ) -> Self {
        let dispatcher = FanOutDispatcher::new(messenger.clone());
        Self {
            store,
            directory,
            messenger,
            composer,
            dispatcher,
            config,
        }
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    fn templates(&self) -> &PromptTemplates {
        &self.config.templates
    }

    pub async fn handle(
        &self,
        cmd: AdvanceDialogueCommand,
    ) -> Result<AdvanceDialogueResult, AdvanceDialogueError> {
        let state = match self.store.get_or_create(&cmd.user_id).await? {
            StoreLookup::Created(state) => {
                tracing::info!(
                    user_id = %cmd.user_id,
                    dialogue_id = %state.id(),
                    "Dialogue started"
                );
                let greeting = self.templates().greeting.clone();
                return Ok(self.reply(&cmd.channel_id, DialogueTurn::Started, greeting).await);
            }
            StoreLookup::Existing(state) => state,
        };

        tracing::debug!(
            user_id = %cmd.user_id,
            dialogue_id = %state.id(),
            step = %state.step(),
            "Advancing dialogue"
        );

        match state.step() {
            DialogueStep::AwaitingRecipients => self.collect_recipients(&cmd).await,
            DialogueStep::AwaitingPayload => self.deliver_payload(&cmd, &state).await,
        }
    }

    async fn collect_recipients(
        &self,
        cmd: &AdvanceDialogueCommand,
    ) -> Result<AdvanceDialogueResult, AdvanceDialogueError> {
        if cmd.text.trim().is_empty() {
            let prompt = self.templates().empty_recipients.clone();
            return Ok(self
                .reply(&cmd.channel_id, DialogueTurn::EmptyRecipients, prompt)
                .await);
        }

        let fragments = parse_fragments(&cmd.text);

        let directory = match self.directory.list_active_users().await {
            Ok(directory) => directory,
            Err(e) => {
                tracing::warn!(user_id = %cmd.user_id, error = %e, "Directory fetch failed");
                let reply = self.templates().render_directory_error(&e.to_string());
                return Ok(self
                    .reply(
                        &cmd.channel_id,
                        DialogueTurn::DirectoryUnavailable(e.to_string()),
                        reply,
                    )
                    .await);
            }
        };

        let report = match_names(&fragments, &directory);
        if !report.is_complete() {
            tracing::info!(
                user_id = %cmd.user_id,
                unmatched = ?report.unmatched,
                "Some recipient names did not match"
            );
            let reply = self
                .templates()
                .render_unmatched(&report.unmatched, &report.valid_names);
            let turn = DialogueTurn::RecipientsUnresolved {
                unmatched: report.unmatched,
                valid_names: report.valid_names,
            };
            return Ok(self.reply(&cmd.channel_id, turn, reply).await);
        }

        let sender_name = directory
            .iter()
            .find(|entry| entry.identifier == cmd.user_id.as_str())
            .map(|entry| entry.display_name.clone());
        let matched = report.matched;

        let updated = self
            .store
            .update(
                &cmd.user_id,
                Box::new(move |state: &mut ConversationState| {
                    state.resolve_recipients(&matched, sender_name)
                }),
            )
            .await;

        match updated {
            Ok(Some(state)) => {
                let names = state.recipient_names();
                tracing::info!(
                    user_id = %cmd.user_id,
                    dialogue_id = %state.id(),
                    recipients = ?state.recipient_ids(),
                    "Recipients resolved"
                );
                let reply = self.templates().render_recipients_confirmed(&names);
                Ok(self
                    .reply(
                        &cmd.channel_id,
                        DialogueTurn::RecipientsResolved { recipients: names },
                        reply,
                    )
                    .await)
            }
            Ok(None) => {
                tracing::warn!(user_id = %cmd.user_id, "Dialogue vanished while resolving recipients");
                Ok(Self::silent(DialogueTurn::Abandoned))
            }
            Err(StoreError::Rejected(e)) => {
                tracing::warn!(user_id = %cmd.user_id, error = %e, "Dialogue moved on concurrently");
                Ok(Self::silent(DialogueTurn::Abandoned))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn deliver_payload(
        &self,
        cmd: &AdvanceDialogueCommand,
        state: &ConversationState,
    ) -> Result<AdvanceDialogueResult, AdvanceDialogueError> {
        let payload = cmd.text.trim();
        let recipient_ids = state.recipient_ids();

        let message = match self.config.payload_mode {
            PayloadMode::Verbatim => payload.to_string(),
            PayloadMode::Composed => match self.compose(cmd, state, payload).await {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(
                        user_id = %cmd.user_id,
                        dialogue_id = %state.id(),
                        error = %e,
                        "Composer failed, ending dialogue"
                    );
                    self.finish(&cmd.user_id).await;
                    let reply = self.templates().render_composer_error(&e.to_string());
                    return Ok(self
                        .reply(&cmd.channel_id, DialogueTurn::ComposeFailed(e.to_string()), reply)
                        .await);
                }
            },
        };

        let outcome = self.dispatcher.deliver(&recipient_ids, &message).await;
        self.finish(&cmd.user_id).await;

        tracing::info!(
            user_id = %cmd.user_id,
            dialogue_id = %state.id(),
            attempted = outcome.attempted,
            failed = outcome.failures.len(),
            "Dialogue completed"
        );

        let reply = if outcome.is_success() {
            self.templates().delivery_succeeded.clone()
        } else {
            self.templates()
                .render_delivery_failed(&outcome.error_descriptions())
        };
        Ok(self
            .reply(&cmd.channel_id, DialogueTurn::Completed(outcome), reply)
            .await)
    }

    async fn compose(
        &self,
        cmd: &AdvanceDialogueCommand,
        state: &ConversationState,
        payload: &str,
    ) -> Result<String, ComposerError> {
        let composer = self.composer.as_ref().ok_or_else(|| {
            ComposerError::NotConfigured("no composer provider is configured".to_string())
        })?;

        let sender = state.sender_name().unwrap_or(cmd.user_id.as_str());
        let prompt =
            self.templates()
                .render_composer_prompt(sender, &state.recipient_names(), payload);
        composer.generate(&prompt).await
    }

    /// Deletes the dialogue. Terminal regardless of what happened before.
    async fn finish(&self, user_id: &UserId) {
        if let Err(e) = self.store.remove(user_id).await {
            tracing::error!(user_id = %user_id, error = %e, "Failed to delete dialogue state");
        }
    }

    async fn reply(
        &self,
        channel_id: &ChannelId,
        turn: DialogueTurn,
        text: String,
    ) -> AdvanceDialogueResult {
        if let Err(e) = self.messenger.send(channel_id.as_str(), &text).await {
            tracing::warn!(channel_id = %channel_id, error = %e, "Failed to post reply");
        }
        AdvanceDialogueResult {
            turn,
            reply: Some(text),
        }
    }

    fn silent(turn: DialogueTurn) -> AdvanceDialogueResult {
        AdvanceDialogueResult { turn, reply: None }
    }
}
