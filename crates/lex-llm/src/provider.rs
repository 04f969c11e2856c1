use async_trait::async_trait;

use crate::error::LlmError;
use crate::prompt::Prompt;

/// A text generation backend.
///
/// Object-safe so the drafter can hold a heterogeneous provider list.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identifier recorded with each draft (e.g. `openai-chat`).
    fn name(&self) -> &str;

    /// Generate text for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns `LlmError` for transport, status, or response-shape failures.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}
