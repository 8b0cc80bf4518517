pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use adapters::lookup::standard_registry;
pub use adapters::telegram::{Poller, TelegramClient};
pub use config::toml_config::TomlConfig;
pub use core::{menu::MenuController, services::ServiceRegistry, session::SessionStore};
pub use utils::error::{BotError, Result};
