use super::{
    validate_settings, DEFAULT_ABSTRACTAPI_ENDPOINT, DEFAULT_NUMVERIFY_ENDPOINT,
    DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TELEGRAM_API_BASE,
};
use crate::core::BotSettings;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub telegram: TelegramConfig,
    pub providers: ProvidersConfig,
    pub http: Option<HttpConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub token: String,
    pub api_base: Option<String>,
    pub poll_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub numverify: ProviderConfig,
    pub abstractapi: ProviderConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub request_timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_base", &self.api_base)
            .field("poll_timeout_seconds", &self.poll_timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings, substituting `${VAR}` from the environment first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BotError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unset variables are left as `${VAR}` so validation can name them.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl BotSettings for TomlConfig {
    fn bot_token(&self) -> &str {
        &self.telegram.token
    }

    fn telegram_api_base(&self) -> &str {
        self.telegram
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_TELEGRAM_API_BASE)
    }

    fn numverify_endpoint(&self) -> &str {
        self.providers
            .numverify
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_NUMVERIFY_ENDPOINT)
    }

    fn numverify_key(&self) -> &str {
        &self.providers.numverify.api_key
    }

    fn abstractapi_endpoint(&self) -> &str {
        self.providers
            .abstractapi
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ABSTRACTAPI_ENDPOINT)
    }

    fn abstractapi_key(&self) -> &str {
        &self.providers.abstractapi.api_key
    }

    fn request_timeout(&self) -> Duration {
        let secs = self
            .http
            .as_ref()
            .and_then(|h| h.request_timeout_seconds)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    fn poll_timeout(&self) -> Duration {
        Duration::from_secs(
            self.telegram
                .poll_timeout_seconds
                .unwrap_or(DEFAULT_POLL_TIMEOUT_SECS),
        )
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
