//! Conversation core
//!
//! The chat transport delivers each event independently, with no session
//! concept of its own. This module supplies one: per-chat workflow state
//! (`SessionStore`), token → continuation bindings for rendered options
//! (`ActionRegistry`), and the controller that drives the
//! search → pick result → pick shelf → confirm workflow across events.

mod controller;
mod registry;
mod session;

pub use controller::DialogueController;
pub use registry::{ActionRegistry, Continuation};
pub use session::{ChatSession, PendingWorkflow, SessionStore};
