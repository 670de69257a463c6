//! Movne chat widget
//!
//! A floating chat bubble that relays visitor messages to an external chat
//! backend (`POST {backend}/api/chat`) and keeps the conversation going by
//! echoing the backend-assigned `conversation_id` on every later turn.
//!
//! # Modules
//!
//! - [`widget`]: the [`ChatRelayWidget`] state machine and submit cycle
//! - [`session`]: per-page-view conversation state
//! - [`relay`]: the [`ChatBackend`] seam and its HTTP implementation
//! - [`routes`]: axum handlers serving the embed snippet and a stub backend
//! - [`terminal`]: the widget driven from stdin/stdout

pub mod config;
pub mod errors;
pub mod models;
pub mod relay;
pub mod routes;
pub mod session;
pub mod terminal;
pub mod widget;

pub use relay::{ChatBackend, HttpChatBackend};
pub use widget::ChatRelayWidget;
