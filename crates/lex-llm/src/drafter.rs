//! Sequential drafting with provider fallback.

use std::sync::Arc;

use lex_config::LlmConfig;

use crate::assistant::OpenAiAssistantProvider;
use crate::chat::OpenAiChatProvider;
use crate::error::LlmError;
use crate::prompt::Prompt;
use crate::provider::LlmProvider;

/// A successful draft and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    /// Name of the provider that produced `text`.
    pub provider: String,
    /// Attempts consumed, including the successful one.
    pub attempts: u32,
}

/// Runs drafting attempts one after another, rotating through providers.
///
/// Attempt *n* (zero-based) goes to provider `n % providers.len()`, so with
/// `[assistant, chat]` the assistant gets the first try and chat the second.
/// A non-retryable error ends the sequence early.
pub struct PetitionDrafter {
    providers: Vec<Arc<dyn LlmProvider>>,
    max_attempts: u32,
}

impl PetitionDrafter {
    /// `max_attempts` below 1 is raised to 1.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>, max_attempts: u32) -> Self {
        Self {
            providers,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Wire providers from configuration: the assistant first when an
    /// assistant ID is set, then chat completions.
    ///
    /// # Errors
    ///
    /// `LlmError::NotConfigured` without an API key; `LlmError::Http` if a
    /// client cannot be built.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.is_configured() {
            return Err(LlmError::NotConfigured("llm.api_key is empty".into()));
        }

        let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();
        if config.has_assistant() {
            providers.push(Arc::new(OpenAiAssistantProvider::new(
                config.api_root(),
                &config.api_key,
                &config.assistant_id,
                config.poll_interval(),
                config.max_polls,
                config.request_timeout(),
            )?));
        }
        providers.push(Arc::new(OpenAiChatProvider::new(
            config.api_root(),
            &config.api_key,
            &config.model,
            config.temperature,
            config.request_timeout(),
        )?));

        Ok(Self::new(providers, config.max_attempts))
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// # Errors
    ///
    /// `LlmError::Exhausted` carrying the last attempt's error, or
    /// `LlmError::NotConfigured` when there are no providers.
    pub async fn draft(&self, prompt: &Prompt) -> Result<Draft, LlmError> {
        if self.providers.is_empty() {
            return Err(LlmError::NotConfigured("no LLM providers".into()));
        }

        let mut last = None;
        let mut attempts = 0;
        for index in 0..self.max_attempts as usize {
            let provider = &self.providers[index % self.providers.len()];
            attempts += 1;

            match provider.complete(prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    tracing::info!(provider = provider.name(), attempts, "draft generated");
                    return Ok(Draft {
                        text,
                        provider: provider.name().to_string(),
                        attempts,
                    });
                }
                Ok(_) => {
                    tracing::warn!(provider = provider.name(), attempt = attempts, "empty draft");
                    last = Some(LlmError::EmptyResponse);
                }
                Err(error) => {
                    tracing::warn!(provider = provider.name(), attempt = attempts, %error, "drafting attempt failed");
                    let retryable = error.is_retryable();
                    last = Some(error);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(LlmError::Exhausted {
            attempts,
            last: Box::new(last.unwrap_or(LlmError::EmptyResponse)),
        })
    }
}
