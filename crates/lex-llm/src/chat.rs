//! Chat completions provider (`POST /chat/completions`).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{LlmError, check_status};
use crate::prompt::Prompt;
use crate::provider::LlmProvider;

pub struct OpenAiChatProvider {
    http: reqwest::Client,
    api_root: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiChatProvider {
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the HTTP client cannot be built.
    pub fn new(
        api_root: &str,
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_root: api_root.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
        })
    }

    fn request_body(&self, prompt: &Prompt) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user},
            ],
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiChatProvider {
    fn name(&self) -> &'static str {
        "openai-chat"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_root);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;
        let body: Value = check_status(resp).await?.json().await?;
        parse_chat_response(&body)
    }
}

/// Extract `choices[0].message.content`, trimmed.
///
/// # Errors
///
/// `LlmError::Parse` when the path is missing, `LlmError::EmptyResponse` when
/// the content is null or blank.
pub fn parse_chat_response(body: &Value) -> Result<String, LlmError> {
    let message = body
        .pointer("/choices/0/message")
        .ok_or_else(|| LlmError::Parse("missing choices[0].message".into()))?;
    let text = message
        .get("content")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text.to_string())
}
