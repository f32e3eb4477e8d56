//! Dialogue controller
//!
//! The orchestrator behind every inbound event. Consults the session
//! store and action registry, calls the catalog, renders replies through
//! the transport. No failure here may escape an event handler: catalog
//! and transport errors are logged and turned into user-visible messages,
//! and the process stays available for the next event.

use super::registry::{self, ActionRegistry, Continuation};
use super::session::{PendingWorkflow, SessionStore};
use crate::catalog::{Book, CatalogApi, CatalogError};
use crate::transport::{Button, ChatId, ChatTransport, InboundEvent};

/// At most this many search results are rendered, in catalog order
const MAX_RESULTS: usize = 5;

const BOOK_URL_BASE: &str = "https://goodreads.com/book/show";

pub struct DialogueController<C, T> {
    catalog: C,
    transport: T,
    sessions: SessionStore,
    actions: ActionRegistry,
}

impl<C: CatalogApi, T: ChatTransport> DialogueController<C, T> {
    pub fn new(catalog: C, transport: T) -> Self {
        Self {
            catalog,
            transport,
            sessions: SessionStore::new(),
            actions: ActionRegistry::new(),
        }
    }

    /// Process one inbound event to completion
    pub async fn handle_event(&self, event: InboundEvent) {
        match event {
            InboundEvent::Command {
                chat,
                name,
                remainder,
            } => self.on_command(chat, &name, &remainder).await,
            InboundEvent::Text { chat, text } => self.on_text(chat, &text).await,
            InboundEvent::Interaction {
                chat,
                token,
                interaction_id,
            } => self.on_interaction(chat, &token, &interaction_id).await,
        }
    }

    async fn on_command(&self, chat: ChatId, name: &str, remainder: &str) {
        tracing::debug!(%chat, command = name, "Inbound command");
        match name {
            "start" => {
                self.send(chat, "Hi! Use /search to find a book or /list to see your shelves.")
                    .await;
            }
            "search" if remainder.is_empty() => {
                self.sessions
                    .set_pending(chat, PendingWorkflow::AwaitingSearchText);
                self.send(chat, "Which book do you want to search for?").await;
            }
            "search" => {
                // A new workflow cancels whatever was pending.
                self.sessions.set_pending(chat, PendingWorkflow::None);
                self.run_search(chat, remainder).await;
            }
            "list" => self.show_shelves(chat).await,
            _ => tracing::debug!(%chat, command = name, "Ignoring unknown command"),
        }
    }

    async fn on_text(&self, chat: ChatId, text: &str) {
        match self.sessions.get(chat).pending {
            PendingWorkflow::AwaitingSearchText => {
                self.sessions.set_pending(chat, PendingWorkflow::None);
                self.run_search(chat, text).await;
            }
            PendingWorkflow::AwaitingShelfChoice {
                book_id,
                naming_new_shelf: true,
            } => {
                self.sessions.set_pending(chat, PendingWorkflow::None);
                self.finalize_add(chat, book_id, text.trim()).await;
            }
            // Free text with shelf buttons on screen, or with nothing
            // pending, is a no-op.
            _ => tracing::debug!(%chat, "Ignoring free text with no pending workflow"),
        }
    }

    async fn on_interaction(&self, chat: ChatId, token: &str, interaction_id: &str) {
        match self.actions.resolve(token) {
            Some(continuation) => {
                tracing::debug!(%chat, token, ?continuation, "Resolved interaction");
                self.run_continuation(chat, continuation).await;
            }
            None => {
                tracing::debug!(%chat, token, "Unknown interaction token");
                self.send(chat, "This option is no longer available.").await;
            }
        }
        // Exactly one ack per interaction, success or not, so the
        // transport clears its loading indicator.
        if let Err(e) = self.transport.ack_interaction(interaction_id).await {
            tracing::warn!(error = %e, "Failed to acknowledge interaction");
        }
    }

    async fn run_continuation(&self, chat: ChatId, continuation: Continuation) {
        match continuation {
            Continuation::PickShelf { book_id } => self.offer_shelves(chat, book_id).await,
            Continuation::FinalizeAdd {
                book_id,
                shelf_name,
            } => {
                self.sessions.set_pending(chat, PendingWorkflow::None);
                self.finalize_add(chat, book_id, &shelf_name).await;
            }
            Continuation::CreateShelf { book_id } => {
                self.sessions.set_pending(
                    chat,
                    PendingWorkflow::AwaitingShelfChoice {
                        book_id,
                        naming_new_shelf: true,
                    },
                );
                self.send(chat, "What should the new shelf be called?").await;
            }
            Continuation::ShowShelf { shelf_name } => {
                self.send(chat, &format!("Shelf: {shelf_name}")).await;
            }
        }
    }

    async fn run_search(&self, chat: ChatId, query: &str) {
        tracing::info!(%chat, query, "Searching catalog");
        let books = match self.catalog.search(query).await {
            Ok(books) => books,
            Err(e) => {
                self.report_catalog_failure(chat, "Search failed", &e).await;
                return;
            }
        };

        if books.is_empty() {
            self.send(chat, &format!("No results for \"{query}\".")).await;
            return;
        }

        for book in books.into_iter().take(MAX_RESULTS) {
            let token = registry::book_token(book.id);
            self.actions
                .bind(token.as_str(), Continuation::PickShelf { book_id: book.id });
            let button = Button::new("Add to shelf", token);
            if let Err(e) = self
                .transport
                .send_options(chat, &render_book(&book), &[button])
                .await
            {
                tracing::error!(error = %e, book_id = book.id, "Failed to send search result");
            }
        }
    }

    async fn offer_shelves(&self, chat: ChatId, book_id: u64) {
        let shelves = match self.catalog.list_shelves().await {
            Ok(shelves) => shelves,
            Err(e) => {
                self.report_catalog_failure(chat, "Could not load your shelves", &e)
                    .await;
                return;
            }
        };

        let mut buttons = Vec::with_capacity(shelves.len() + 1);
        for shelf in &shelves {
            let token = registry::shelf_token(shelf.id);
            self.actions.bind(
                token.as_str(),
                Continuation::FinalizeAdd {
                    book_id,
                    shelf_name: shelf.name.clone(),
                },
            );
            buttons.push(Button::new(shelf.name.clone(), token));
        }
        self.actions
            .bind(registry::NEW_SHELF_TOKEN, Continuation::CreateShelf { book_id });
        buttons.push(Button::new("Create new shelf", registry::NEW_SHELF_TOKEN));

        self.sessions.set_pending(
            chat,
            PendingWorkflow::AwaitingShelfChoice {
                book_id,
                naming_new_shelf: false,
            },
        );
        if let Err(e) = self
            .transport
            .send_options(chat, "Which shelf should it go on?", &buttons)
            .await
        {
            tracing::error!(error = %e, "Failed to send shelf choices");
        }
    }

    async fn finalize_add(&self, chat: ChatId, book_id: u64, shelf_name: &str) {
        tracing::info!(%chat, book_id, shelf_name, "Adding book to shelf");
        match self.catalog.add_to_shelf(book_id, shelf_name).await {
            Ok(()) => {
                self.send(chat, &format!("Added the book to shelf {shelf_name}."))
                    .await;
            }
            Err(e) => {
                self.report_catalog_failure(
                    chat,
                    &format!("Could not add the book to {shelf_name}"),
                    &e,
                )
                .await;
            }
        }
    }

    async fn show_shelves(&self, chat: ChatId) {
        let shelves = match self.catalog.list_shelves().await {
            Ok(shelves) => shelves,
            Err(e) => {
                self.report_catalog_failure(chat, "Could not load your shelves", &e)
                    .await;
                return;
            }
        };

        if shelves.is_empty() {
            self.send(chat, "You have no shelves yet.").await;
            return;
        }

        let buttons: Vec<Button> = shelves
            .iter()
            .map(|shelf| {
                let token = registry::show_shelf_token(shelf.id);
                self.actions.bind(
                    token.as_str(),
                    Continuation::ShowShelf {
                        shelf_name: shelf.name.clone(),
                    },
                );
                Button::new(shelf.name.clone(), token)
            })
            .collect();

        if let Err(e) = self
            .transport
            .send_options(chat, "Your shelves:", &buttons)
            .await
        {
            tracing::error!(error = %e, "Failed to send shelf list");
        }
    }

    async fn report_catalog_failure(&self, chat: ChatId, what: &str, error: &CatalogError) {
        tracing::error!(error = %error, kind = ?error.kind, "Catalog call failed");
        self.send(chat, &format!("{what}: {error}. Please try again."))
            .await;
    }

    /// Best-effort text send; transport failures are logged, never propagated
    async fn send(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.transport.send_text(chat, text).await {
            tracing::error!(error = %e, %chat, "Failed to send message");
        }
    }
}

fn render_book(book: &Book) -> String {
    format!(
        "Title: {}\nAuthor: {}\nAverage rating: {:.2}\n{BOOK_URL_BASE}/{}",
        book.title, book.author, book.average_rating, book.id
    )
}
