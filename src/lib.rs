//! Warm-up bot — a scripted Telegram menu with per-user conversation state.

pub mod catalog;
pub mod channels;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod menu;
pub mod notify;
pub mod session;
