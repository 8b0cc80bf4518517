//! Telegram Bot API adapter: HTTP client, wire types and the long-polling loop.

pub mod client;
pub mod polling;
pub mod types;

pub use client::TelegramClient;
pub use polling::Poller;
