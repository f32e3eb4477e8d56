//! shelfbot - a chat bot that searches a book catalog and files books
//! onto shelves
//!
//! The transport delivers inbound events one batch at a time; the
//! dialogue controller processes each event to completion before the
//! next, so per-chat workflow state never sees partial updates.

mod catalog;
mod config;
mod dialogue;
mod transport;

use catalog::HttpCatalog;
use config::BotConfig;
use dialogue::DialogueController;
use std::sync::Arc;
use std::time::Duration;
use transport::Telegram;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_BACKOFF: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelfbot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration is read once at startup; failure is fatal.
    let config_path = BotConfig::path_from_env();
    tracing::info!(path = %config_path, "Loading configuration");
    let config = BotConfig::load(&config_path)?;

    let catalog = HttpCatalog::new(
        config.catalog_key,
        config.catalog_secret,
        config.catalog_user_id,
        config.catalog_base_url,
    );
    let transport = Arc::new(Telegram::new(&config.bot_token, config.transport_base_url));
    let controller = DialogueController::new(catalog, Arc::clone(&transport));

    tracing::info!("shelfbot started, polling for updates");
    loop {
        match transport.poll_events().await {
            Ok(events) => {
                for event in events {
                    controller.handle_event(event).await;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Polling failed, backing off");
                tokio::time::sleep(POLL_BACKOFF).await;
            }
        }
    }
}
