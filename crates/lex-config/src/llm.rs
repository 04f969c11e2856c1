//! LLM provider configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_temperature() -> f32 {
    0.3
}

const fn default_max_attempts() -> u32 {
    2
}

const fn default_poll_interval_ms() -> u64 {
    1000
}

const fn default_max_polls() -> u32 {
    60
}

const fn default_request_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Provider API key (`LEX_LLM__API_KEY`).
    #[serde(default)]
    pub api_key: String,

    /// OpenAI-compatible API root, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat completion model.
    #[serde(default = "default_model")]
    pub model: String,

    /// Assistant ID for the stateful assistant API. Empty disables it.
    #[serde(default)]
    pub assistant_id: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Total sequential drafting attempts across providers.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between assistant run status checks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Assistant run status checks before giving up.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            assistant_id: String::new(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn has_assistant(&self) -> bool {
        !self.assistant_id.is_empty()
    }

    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// API root with any trailing `/` removed.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = LlmConfig::default();
        assert!(!config.is_configured());
        assert!(!config.has_assistant());
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.max_polls, 60);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn api_root_strips_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:8080/v1/".into(),
            ..Default::default()
        };
        assert_eq!(config.api_root(), "http://localhost:8080/v1");
    }
}
