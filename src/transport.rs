//! Chat transport boundary
//!
//! The transport delivers inbound events (commands, free text, interaction
//! activations) and accepts outbound sends plus interaction
//! acknowledgments. Every interaction must be acknowledged exactly once,
//! regardless of outcome, to clear its pending indicator.

mod telegram;
#[cfg(test)]
pub mod testing;

pub use telegram::Telegram;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Identity of a chat on the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound chat event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A typed command such as `/search dune` (name without the slash,
    /// remainder possibly empty)
    Command {
        chat: ChatId,
        name: String,
        remainder: String,
    },
    /// Plain free text
    Text { chat: ChatId, text: String },
    /// A rendered option was activated
    Interaction {
        chat: ChatId,
        token: String,
        interaction_id: String,
    },
}

/// A selectable option attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Network(String),
    #[error("transport rejected request: {0}")]
    Api(String),
}

/// Outbound transport operations
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a plain text message to a chat
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError>;

    /// Send a text message with a set of selectable options
    async fn send_options(
        &self,
        chat: ChatId,
        text: &str,
        options: &[Button],
    ) -> Result<(), TransportError>;

    /// Acknowledge an interaction; must be called exactly once per
    /// interaction event
    async fn ack_interaction(&self, interaction_id: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        (**self).send_text(chat, text).await
    }

    async fn send_options(
        &self,
        chat: ChatId,
        text: &str,
        options: &[Button],
    ) -> Result<(), TransportError> {
        (**self).send_options(chat, text, options).await
    }

    async fn ack_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        (**self).ack_interaction(interaction_id).await
    }
}
