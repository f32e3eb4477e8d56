//! Telegram Bot API transport
//!
//! Long polling via `getUpdates`; outbound messages via `sendMessage`
//! (inline keyboards for selectable options) and `answerCallbackQuery`
//! for interaction acknowledgment.

use super::{Button, ChatId, ChatTransport, InboundEvent, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 25;

/// Telegram long-polling transport
pub struct Telegram {
    client: Client,
    /// `<base>/bot<token>`
    api_root: String,
    /// Next `getUpdates` offset; advanced past every update we have seen
    offset: AtomicI64,
}

impl Telegram {
    pub fn new(token: &str, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // The HTTP timeout must outlast the long-poll hold time.
        let client = Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_root: format!("{base}/bot{token}"),
            offset: AtomicI64::new(0),
        }
    }

    /// Long-poll for the next batch of inbound events. Blocks up to the
    /// poll timeout; an empty batch is normal.
    pub async fn poll_events(&self) -> Result<Vec<InboundEvent>, TransportError> {
        let offset = self.offset.load(Ordering::SeqCst);
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                &json!({ "offset": offset, "timeout": POLL_TIMEOUT_SECS }),
            )
            .await?;

        let mut events = Vec::new();
        for update in updates {
            self.offset.store(update.update_id + 1, Ordering::SeqCst);
            if let Some(event) = map_update(update) {
                events.push(event);
            }
        }
        Ok(events)
    }

    async fn call<T: DeserializeOwned + Default>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, TransportError> {
        let url = format!("{}/{method}", self.api_root);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let envelope: ApiEnvelope<T> = resp
            .json()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !envelope.ok {
            return Err(TransportError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(envelope.result.unwrap_or_default())
    }
}

#[async_trait]
impl ChatTransport for Telegram {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        // The result payload (the sent Message, or a bare `true` for acks)
        // is not inspected.
        self.call::<serde_json::Value>("sendMessage", &json!({ "chat_id": chat.0, "text": text }))
            .await?;
        Ok(())
    }

    async fn send_options(
        &self,
        chat: ChatId,
        text: &str,
        options: &[Button],
    ) -> Result<(), TransportError> {
        // One button per row, like the original layout
        let keyboard: Vec<Vec<serde_json::Value>> = options
            .iter()
            .map(|b| vec![json!({ "text": b.label, "callback_data": b.token })])
            .collect();

        self.call::<serde_json::Value>(
            "sendMessage",
            &json!({
                "chat_id": chat.0,
                "text": text,
                "reply_markup": { "inline_keyboard": keyboard },
            }),
        )
        .await?;
        Ok(())
    }

    async fn ack_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        self.call::<serde_json::Value>(
            "answerCallbackQuery",
            &json!({ "callback_query_id": interaction_id }),
        )
        .await?;
        Ok(())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    #[serde(default)]
    message: Option<TgMessage>,
    #[serde(default)]
    callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct TgMessage {
    chat: TgChat,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TgChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TgUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    id: String,
    from: TgUser,
    #[serde(default)]
    message: Option<TgMessage>,
    #[serde(default)]
    data: Option<String>,
}

/// Map one raw update to an inbound event. Updates we do not understand
/// (no text, no callback data) are dropped.
fn map_update(update: Update) -> Option<InboundEvent> {
    if let Some(cb) = update.callback_query {
        // Replies go to the chat the button was rendered in; fall back to
        // a direct chat with the pressing user.
        let chat = cb
            .message
            .as_ref()
            .map_or(ChatId(cb.from.id), |m| ChatId(m.chat.id));
        let token = cb.data?;
        return Some(InboundEvent::Interaction {
            chat,
            token,
            interaction_id: cb.id,
        });
    }

    let message = update.message?;
    let chat = ChatId(message.chat.id);
    let text = message.text?;

    if let Some(stripped) = text.strip_prefix('/') {
        let (head, remainder) = match stripped.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (stripped, ""),
        };
        // Group chats address commands as /search@botname
        let name = head.split('@').next().unwrap_or(head);
        return Some(InboundEvent::Command {
            chat,
            name: name.to_string(),
            remainder: remainder.to_string(),
        });
    }

    Some(InboundEvent::Text { chat, text })
}
