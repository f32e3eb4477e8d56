//! Per-chat conversation state

use crate::transport::ChatId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Which multi-step workflow a chat is in the middle of.
///
/// Exactly one workflow is active per chat; starting a new one overwrites
/// (and thereby cancels) whatever was pending. There is no expiry — a
/// stale pending workflow persists until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingWorkflow {
    #[default]
    None,

    /// `/search` was issued without a query; the next free text is the query
    AwaitingSearchText,

    /// Shelf options for `book_id` are on screen. While `naming_new_shelf`
    /// is set, the next free text names the shelf to create; otherwise free
    /// text is ignored and only a button press advances the workflow.
    AwaitingShelfChoice { book_id: u64, naming_new_shelf: bool },
}

/// A chat's conversation state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSession {
    pub pending: PendingWorkflow,
}

/// Keyed store of chat sessions.
///
/// Sessions are created lazily on first lookup and never destroyed. One
/// chat's session is not reachable through another chat's lookup.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<ChatId, ChatSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chat's session, or a default empty one. Never fails.
    pub fn get(&self, chat: ChatId) -> ChatSession {
        self.sessions
            .lock()
            .unwrap()
            .get(&chat)
            .cloned()
            .unwrap_or_default()
    }

    /// Full replace, idempotent
    pub fn set(&self, chat: ChatId, session: ChatSession) {
        self.sessions.lock().unwrap().insert(chat, session);
    }

    pub fn set_pending(&self, chat: ChatId, pending: PendingWorkflow) {
        self.set(chat, ChatSession { pending });
    }
}
