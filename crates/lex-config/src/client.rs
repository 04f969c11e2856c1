//! Settings for the `lex` command-line client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

const fn default_poll_interval_secs() -> u64 {
    3
}

const fn default_max_polls() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Fixed delay between generation status checks.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Status checks before the client stops waiting.
    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval_secs: default_poll_interval_secs(),
            max_polls: default_max_polls(),
        }
    }
}

impl ClientConfig {
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
