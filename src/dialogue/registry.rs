//! Token → continuation bindings for rendered options

use std::collections::HashMap;
use std::sync::Mutex;

/// What runs when a rendered option is activated, plus the data it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// "Add to shelf" on a search result: offer the shelf choices
    PickShelf { book_id: u64 },
    /// A specific shelf was chosen for a book
    FinalizeAdd { book_id: u64, shelf_name: String },
    /// "Create new shelf": prompt for a name before finalizing
    CreateShelf { book_id: u64 },
    /// A shelf from `/list` was chosen
    ShowShelf { shelf_name: String },
}

/// Dynamic mapping from interaction tokens to continuations.
///
/// Tokens are derived from a namespace plus the entity id they represent,
/// so re-rendering the same entity overwrites its binding instead of
/// leaking a new entry. Bindings are never evicted, and a live token
/// resolves any number of times with identical context — an old button
/// keeps working, running whatever was most recently bound to its token.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    bindings: Mutex<HashMap<String, Continuation>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the binding for `token`
    pub fn bind(&self, token: impl Into<String>, continuation: Continuation) {
        self.bindings
            .lock()
            .unwrap()
            .insert(token.into(), continuation);
    }

    pub fn resolve(&self, token: &str) -> Option<Continuation> {
        self.bindings.lock().unwrap().get(token).cloned()
    }
}

/// Token for the "Add to shelf" option on a search result
pub fn book_token(book_id: u64) -> String {
    format!("shelf:{book_id}")
}

/// Token for a shelf-choice option
pub fn shelf_token(shelf_id: u64) -> String {
    format!("pick:{shelf_id}")
}

/// Token for the "Create new shelf" option. Fixed, so only the most
/// recently offered book owns the create flow.
pub const NEW_SHELF_TOKEN: &str = "pick:new";

/// Token for a shelf listed by `/list`
pub fn show_shelf_token(shelf_id: u64) -> String {
    format!("show:{shelf_id}")
}
