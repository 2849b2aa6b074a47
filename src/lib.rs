//! Conversation and message synchronization for the trip-planning chat
//! client.
//!
//! [`application::services::ConversationStore`] and
//! [`application::services::MessageStore`] sit between a front end and the
//! remote chat backend, reached through the [`application::ports::ChatGateway`]
//! port.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
