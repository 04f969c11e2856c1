//! # lex-config
//!
//! Layered configuration loading for Lex using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LEX_*` prefix, `__` as separator)
//! 2. Project-level `.lex/config.toml`
//! 3. User-level `~/.config/lex/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LEX_AUTH__JWT_SECRET` -> `auth.jwt_secret`,
//! `LEX_LLM__API_KEY` -> `llm.api_key`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lex_config::LexConfig;
//!
//! let config = LexConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.llm.has_assistant() {
//!     println!("Assistant: {}", config.llm.assistant_id);
//! }
//! ```

mod auth;
mod client;
mod database;
mod error;
mod general;
mod llm;
mod server;

pub use auth::AuthConfig;
pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use llm::LlmConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LexConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LexConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the normal case in production.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lex/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LEX_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.llm.max_attempts == 0 {
            return Err(invalid("llm.max_attempts", "must be at least 1"));
        }
        if self.llm.max_polls == 0 {
            return Err(invalid("llm.max_polls", "must be at least 1"));
        }
        if self.client.max_polls == 0 {
            return Err(invalid("client.max_polls", "must be at least 1"));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(invalid("auth.token_ttl_secs", "must be positive"));
        }
        if self.auth.cookie_name.is_empty()
            || self
                .auth
                .cookie_name
                .contains(|c: char| c.is_whitespace() || matches!(c, ';' | '=' | ','))
        {
            return Err(invalid(
                "auth.cookie_name",
                "must be a non-empty cookie token",
            ));
        }
        Ok(())
    }

    /// Server-side startup requirements: validated config plus a signing secret.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `auth.jwt_secret` is empty.
    pub fn require_server(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if !self.auth.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "auth".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lex").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
