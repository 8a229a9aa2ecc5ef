//! Configuration and settings management
//!
//! Loads settings from config files and environment variables and defines
//! the Instagram endpoint defaults.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Default base URL of the Instagram private web API.
pub const INSTAGRAM_API_BASE: &str = "https://i.instagram.com";
/// App id sent by the Instagram web client in the `x-ig-app-id` header.
pub const INSTAGRAM_WEB_APP_ID: &str = "936619743392459";
/// Desktop browser user agent used for profile requests.
pub const INSTAGRAM_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Profile lookup settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LookupSettings {
    /// Base URL for the `web_profile_info` endpoint
    #[serde(default = "default_instagram_api_base")]
    pub instagram_api_base: String,
    /// Value of the `x-ig-app-id` header
    #[serde(default = "default_instagram_app_id")]
    pub instagram_app_id: String,
    /// Value of the `User-Agent` header
    #[serde(default = "default_instagram_user_agent")]
    pub instagram_user_agent: String,
}

fn default_instagram_api_base() -> String {
    INSTAGRAM_API_BASE.to_string()
}

fn default_instagram_app_id() -> String {
    INSTAGRAM_WEB_APP_ID.to_string()
}

fn default_instagram_user_agent() -> String {
    INSTAGRAM_USER_AGENT.to_string()
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            instagram_api_base: default_instagram_api_base(),
            instagram_app_id: default_instagram_app_id(),
            instagram_user_agent: default_instagram_user_agent(),
        }
    }
}

impl LookupSettings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        build_config()?.try_deserialize()
    }
}

/// Build the layered configuration shared by every settings struct.
///
/// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
/// `config/local`, `APP__*` variables, plain environment variables.
///
/// # Errors
///
/// Returns a `ConfigError` if a present config file cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // UPPER_SNAKE_CASE is mapped to snake_case; empty values count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}
