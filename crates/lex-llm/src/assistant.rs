//! Stateful assistant provider.
//!
//! One `POST /threads/runs` creates a thread holding the user message and
//! starts a run on it. The run is then polled until it reaches a terminal
//! status, and the newest assistant message on the thread is the draft.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{LlmError, check_status};
use crate::prompt::Prompt;
use crate::provider::LlmProvider;

const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Lifecycle of an assistant run as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Incomplete,
    Unknown(String),
}

impl RunStatus {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "requires_action" => Self::RequiresAction,
            "cancelling" => Self::Cancelling,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            "incomplete" => Self::Incomplete,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Terminal statuses that mean the run produced nothing usable.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Failed | Self::Cancelled | Self::Expired | Self::Incomplete
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::RequiresAction => "requires_action",
            Self::Cancelling => "cancelling",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::Incomplete => "incomplete",
            Self::Unknown(s) => s,
        }
    }
}

/// A run as returned by create/retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub id: String,
    pub thread_id: String,
    pub status: RunStatus,
    /// `last_error.message`, when the API reports one.
    pub error: Option<String>,
}

/// # Errors
///
/// `LlmError::Parse` if `id`, `thread_id`, or `status` is missing.
pub fn parse_run(body: &Value) -> Result<RunState, LlmError> {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| LlmError::Parse(format!("run response missing '{name}'")))
    };
    Ok(RunState {
        id: field("id")?,
        thread_id: field("thread_id")?,
        status: RunStatus::parse(&field("status")?),
        error: body
            .pointer("/last_error/message")
            .and_then(Value::as_str)
            .map(String::from),
    })
}

/// Text of the newest assistant message in a `GET /messages?order=desc` list.
///
/// # Errors
///
/// `LlmError::EmptyResponse` when no assistant message carries text.
pub fn parse_latest_assistant_text(body: &Value) -> Result<String, LlmError> {
    let messages = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::Parse("message list missing 'data'".into()))?;

    let newest = messages
        .iter()
        .find(|m| m.get("role").and_then(Value::as_str) == Some("assistant"))
        .ok_or(LlmError::EmptyResponse)?;

    let text: Vec<&str> = newest
        .get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|part| part.pointer("/text/value").and_then(Value::as_str))
        .collect();

    let text = text.join("\n").trim().to_string();
    if text.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

/// Poll `fetch` until the run leaves its active states.
///
/// Checks at most `max_polls` times, sleeping `interval` before each check.
///
/// # Errors
///
/// `LlmError::RunFailed` for failure states, `LlmError::PollLimit` when the
/// run is still active after the last check, or whatever `fetch` returns.
pub async fn wait_for_run<F, Fut>(
    mut fetch: F,
    interval: Duration,
    max_polls: u32,
) -> Result<RunState, LlmError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<RunState, LlmError>>,
{
    for poll in 1..=max_polls {
        tokio::time::sleep(interval).await;
        let run = fetch().await?;
        tracing::debug!(run_id = %run.id, status = run.status.as_str(), poll, "assistant run status");

        if run.status == RunStatus::Completed {
            return Ok(run);
        }
        if run.status.is_failure() {
            return Err(LlmError::RunFailed {
                status: run.status.as_str().to_string(),
                message: run.error.unwrap_or_default(),
            });
        }
    }
    Err(LlmError::PollLimit { polls: max_polls })
}

pub struct OpenAiAssistantProvider {
    http: reqwest::Client,
    api_root: String,
    api_key: String,
    assistant_id: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl OpenAiAssistantProvider {
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the HTTP client cannot be built.
    pub fn new(
        api_root: &str,
        api_key: &str,
        assistant_id: &str,
        poll_interval: Duration,
        max_polls: u32,
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
            assistant_id: assistant_id.to_string(),
            poll_interval,
            max_polls,
        })
    }

    fn create_body(&self, prompt: &Prompt) -> Value {
        json!({
            "assistant_id": self.assistant_id,
            "instructions": prompt.system,
            "thread": {
                "messages": [{"role": "user", "content": prompt.user}],
            },
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value, LlmError> {
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<RunState, LlmError> {
        let url = format!("{}/threads/{thread_id}/runs/{run_id}", self.api_root);
        parse_run(&self.get_json(&url).await?)
    }
}

#[async_trait]
impl LlmProvider for OpenAiAssistantProvider {
    fn name(&self) -> &'static str {
        "openai-assistant"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let url = format!("{}/threads/runs", self.api_root);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(BETA_HEADER.0, BETA_HEADER.1)
            .json(&self.create_body(prompt))
            .send()
            .await?;
        let created = parse_run(&check_status(resp).await?.json().await?)?;
        tracing::debug!(run_id = %created.id, thread_id = %created.thread_id, "assistant run created");

        let run = if created.status == RunStatus::Completed {
            created
        } else {
            let (thread_id, run_id) = (created.thread_id.clone(), created.id.clone());
            wait_for_run(
                || self.retrieve_run(&thread_id, &run_id),
                self.poll_interval,
                self.max_polls,
            )
            .await?
        };

        let url = format!(
            "{}/threads/{}/messages?order=desc&limit=20",
            self.api_root, run.thread_id
        );
        parse_latest_assistant_text(&self.get_json(&url).await?)
    }
}
