//! Telegram transport settings.

use config::ConfigError;
use instainfo_core::config::LookupSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token.
    #[serde(default)]
    pub telegram_token: String,
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Instagram lookup settings.
    pub lookup: Arc<LookupSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(lookup: LookupSettings, telegram: TelegramSettings) -> Self {
        Self {
            lookup: Arc::new(lookup),
            telegram: Arc::new(telegram),
        }
    }

    /// Load lookup and Telegram settings from the shared config layers.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if either part fails to load or the bot token
    /// is empty.
    pub fn load() -> Result<Self, ConfigError> {
        let lookup = LookupSettings::new()?;
        let telegram = TelegramSettings::new()?;
        Ok(Self::new(lookup, telegram))
    }
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or the token is missing.
    pub fn new() -> Result<Self, ConfigError> {
        let settings: Self = instainfo_core::config::build_config()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that a bot token was supplied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the token is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram_token.trim().is_empty() {
            return Err(ConfigError::NotFound("telegram_token".to_string()));
        }
        Ok(())
    }
}
