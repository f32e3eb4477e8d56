//! Recording transport mock

use super::{Button, ChatId, ChatTransport, TransportError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// One outbound call made through the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text {
        chat: ChatId,
        text: String,
    },
    Options {
        chat: ChatId,
        text: String,
        options: Vec<Button>,
    },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Outbound::Text { text, .. } | Outbound::Options { text, .. } => text,
        }
    }
}

/// Mock transport that records every send and ack
#[derive(Default)]
pub struct MockTransport {
    pub sent: Mutex<Vec<Outbound>>,
    pub acks: Mutex<Vec<String>>,
    fail_sends: AtomicBool,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with a network error
    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    pub fn acks(&self) -> Vec<String> {
        self.acks.lock().unwrap().clone()
    }

    /// All outbound message texts, in send order
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .iter()
            .map(|o| o.text().to_string())
            .collect()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Network("mock send failure".to_string()));
        }
        self.sent.lock().unwrap().push(Outbound::Text {
            chat,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_options(
        &self,
        chat: ChatId,
        text: &str,
        options: &[Button],
    ) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Network("mock send failure".to_string()));
        }
        self.sent.lock().unwrap().push(Outbound::Options {
            chat,
            text: text.to_string(),
            options: options.to_vec(),
        });
        Ok(())
    }

    async fn ack_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        self.acks.lock().unwrap().push(interaction_id.to_string());
        Ok(())
    }
}
