pub mod toml_config;

use crate::core::BotSettings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_secret, validate_url};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
use std::time::Duration;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_NUMVERIFY_ENDPOINT: &str = "http://apilayer.net/api/validate";
pub const DEFAULT_ABSTRACTAPI_ENDPOINT: &str = "https://phonevalidation.abstractapi.com/v1/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Checks shared by every settings source.
pub fn validate_settings<S: BotSettings + ?Sized>(settings: &S) -> Result<()> {
    validate_secret("bot_token", settings.bot_token())?;
    validate_secret("numverify_key", settings.numverify_key())?;
    validate_secret("abstractapi_key", settings.abstractapi_key())?;

    validate_url("telegram_api_base", settings.telegram_api_base())?;
    validate_url("numverify_endpoint", settings.numverify_endpoint())?;
    validate_url("abstractapi_endpoint", settings.abstractapi_endpoint())?;

    validate_range(
        "request_timeout_secs",
        settings.request_timeout().as_secs(),
        1,
        120,
    )?;
    validate_range("poll_timeout_secs", settings.poll_timeout().as_secs(), 0, 50)?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Clone, Parser)]
#[command(name = "phone-lookup-bot")]
#[command(about = "Telegram bot that looks up phone numbers via third-party APIs")]
pub struct CliConfig {
    #[arg(short, long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub bot_token: String,

    #[arg(long, env = "NUMVERIFY_API_KEY", default_value = "", hide_env_values = true)]
    pub numverify_key: String,

    #[arg(long, env = "ABSTRACTAPI_KEY", default_value = "", hide_env_values = true)]
    pub abstractapi_key: String,

    #[arg(long, default_value = DEFAULT_TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    #[arg(long, default_value = DEFAULT_NUMVERIFY_ENDPOINT)]
    pub numverify_endpoint: String,

    #[arg(long, default_value = DEFAULT_ABSTRACTAPI_ENDPOINT)]
    pub abstractapi_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS, help = "Lookup timeout in seconds")]
    pub request_timeout: u64,

    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS, help = "Long-poll timeout in seconds")]
    pub poll_timeout: u64,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("config", &self.config)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("numverify_endpoint", &self.numverify_endpoint)
            .field("abstractapi_endpoint", &self.abstractapi_endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("poll_timeout", &self.poll_timeout)
            .field("log_format", &self.log_format)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "cli")]
impl BotSettings for CliConfig {
    fn bot_token(&self) -> &str {
        &self.bot_token
    }

    fn telegram_api_base(&self) -> &str {
        &self.telegram_api_base
    }

    fn numverify_endpoint(&self) -> &str {
        &self.numverify_endpoint
    }

    fn numverify_key(&self) -> &str {
        &self.numverify_key
    }

    fn abstractapi_endpoint(&self) -> &str {
        &self.abstractapi_endpoint
    }

    fn abstractapi_key(&self) -> &str {
        &self.abstractapi_key
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout)
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::utils::error::BotError;
    use crate::utils::validation::Validate;
    use clap::Parser;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["phone-lookup-bot"];
        argv.extend_from_slice(args);
        CliConfig::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--bot-token", "1:abc"]);
        assert_eq!(config.telegram_api_base(), DEFAULT_TELEGRAM_API_BASE);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.poll_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_full_config_validates() {
        let config = parse(&[
            "--bot-token",
            "1:abc",
            "--numverify-key",
            "nv",
            "--abstractapi-key",
            "ab",
        ]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let config = parse(&["--bot-token", "1:abc", "--numverify-key", "nv"]);
        match config.validate() {
            Err(BotError::MissingConfigError { field }) => assert_eq!(field, "abstractapi_key"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        let config = parse(&[
            "--bot-token",
            "1:abc",
            "--numverify-key",
            "nv",
            "--abstractapi-key",
            "ab",
            "--request-timeout",
            "0",
        ]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = parse(&["--bot-token", "1:super-secret"]);
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
