//! Invite Bot - Slack dialogue bot for group invitations
//!
//! A user messages the bot, names the people to reach in a comma-separated
//! list, then supplies the payload (a game name or a question). The bot
//! resolves the names against the workspace directory, optionally has a
//! language model compose the message, and fans it out to every recipient.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
