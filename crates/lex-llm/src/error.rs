//! LLM error types and retry classification.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401/403: bad or revoked API key.
    #[error("provider rejected credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 429 Too Many Requests.
    #[error("rate limited by provider")]
    RateLimited { retry_after_secs: Option<u64> },

    /// 5xx from the provider.
    #[error("provider unavailable ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Any other non-success status.
    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("unexpected provider response: {0}")]
    Parse(String),

    /// The provider answered but produced no text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// An assistant run ended in a non-success terminal state.
    #[error("assistant run ended as {status}: {message}")]
    RunFailed { status: String, message: String },

    /// The assistant run was still active after the last status check.
    #[error("assistant run did not finish after {polls} status checks")]
    PollLimit { polls: u32 },

    #[error("LLM provider not configured: {0}")]
    NotConfigured(String),

    /// Every drafting attempt failed; `last` is the final attempt's error.
    #[error("drafting failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: Box<LlmError> },
}

impl LlmError {
    /// Whether another attempt (possibly on another provider) may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            Self::RateLimited { .. }
            | Self::Upstream { .. }
            | Self::Parse(_)
            | Self::EmptyResponse
            | Self::RunFailed { .. }
            | Self::PollLimit { .. } => true,
            Self::Unauthorized { .. }
            | Self::Api { .. }
            | Self::NotConfigured(_)
            | Self::Exhausted { .. } => false,
        }
    }

    /// Client-facing (pt-BR) summary stored on failed generation jobs.
    /// Provider details stay in the logs.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Exhausted { last, .. } => last.client_message(),
            Self::RateLimited { .. } => {
                "O serviço de geração está sobrecarregado. Tente novamente em instantes.".into()
            }
            Self::Unauthorized { .. } | Self::NotConfigured(_) => {
                "O serviço de geração não está configurado corretamente.".into()
            }
            Self::EmptyResponse => "O serviço de geração retornou uma resposta vazia.".into(),
            _ => "Não foi possível gerar a petição. Tente novamente.".into(),
        }
    }
}

/// Map a non-success HTTP status to an error.
pub(crate) fn error_for_status(status: u16, body: String, retry_after_secs: Option<u64>) -> LlmError {
    let message = truncate(body);
    match status {
        401 | 403 => LlmError::Unauthorized { status, message },
        429 => LlmError::RateLimited { retry_after_secs },
        500..=599 => LlmError::Upstream { status, message },
        _ => LlmError::Api { status, message },
    }
}

/// Turn a response into an error unless its status is 2xx.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let retry_after = resp
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok());
    let body = resp.text().await.unwrap_or_default();
    Err(error_for_status(status, body, retry_after))
}

fn truncate(mut body: String) -> String {
    const MAX: usize = 500;
    if body.len() > MAX {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
