//! SendInviteHandler - Command handler for the direct invitation API.

use crate::application::handlers::delivery::FanOutDispatcher;
use crate::domain::delivery::DeliveryOutcome;

/// Command to invite a fixed list of users to a game.
#[derive(Debug, Clone)]
pub struct SendInviteCommand {
    pub game_name: String,
    pub user_ids: Vec<String>,
    pub description: Option<String>,
}

impl SendInviteCommand {
    /// Header line, followed by the description when one was given.
    pub fn message(&self) -> String {
        let header = format!("Game Invitation: {}", self.game_name);
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => {
                format!("{}\n{}", header, description)
            }
            _ => header,
        }
    }
}

/// Result of sending invitations.
pub type SendInviteResult = DeliveryOutcome;

/// Handler for sending invitations without a dialogue.
///
/// Uses the same fan-out as the dialogue's final step, so partial failure
/// is reported rather than retried.
pub struct SendInviteHandler {
    dispatcher: FanOutDispatcher,
}

impl SendInviteHandler {
    pub fn new(dispatcher: FanOutDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, cmd: SendInviteCommand) -> SendInviteResult {
        let message = cmd.message();
        tracing::info!(
            game = %cmd.game_name,
            recipients = cmd.user_ids.len(),
            "Sending direct invitations"
        );
        self.dispatcher.deliver(&cmd.user_ids, &message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Messenger, MessengerError};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingMessenger {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl Messenger for RecordingMessenger {
        async fn send(&self, recipient: &str, text: &str) -> Result<(), MessengerError> {
            if recipient.starts_with('X') {
                return Err(MessengerError::Rejected("channel_not_found".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), text.to_string()));
            Ok(())
        }
    }

    fn command(ids: &[&str], description: Option<&str>) -> SendInviteCommand {
        SendInviteCommand {
            game_name: "Chess".to_string(),
            user_ids: ids.iter().map(|s| s.to_string()).collect(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn message_includes_description_when_present() {
        assert_eq!(
            command(&[], Some("Quick game?")).message(),
            "Game Invitation: Chess\nQuick game?"
        );
        assert_eq!(command(&[], None).message(), "Game Invitation: Chess");
        assert_eq!(command(&[], Some("  ")).message(), "Game Invitation: Chess");
    }

    #[tokio::test]
    async fn sends_to_every_user() {
        let messenger = Arc::new(RecordingMessenger::default());
        let handler = SendInviteHandler::new(FanOutDispatcher::new(messenger.clone()));

        let outcome = handler.handle(command(&["U1", "U2"], None)).await;

        assert!(outcome.is_success());
        assert_eq!(messenger.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reports_each_failed_user() {
        let messenger = Arc::new(RecordingMessenger::default());
        let handler = SendInviteHandler::new(FanOutDispatcher::new(messenger.clone()));

        let outcome = handler.handle(command(&["U1", "X2", "X3"], None)).await;

        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.error_descriptions()[0].contains("X2"));
    }
}
