//! # lex-llm
//!
//! Petition drafting through OpenAI-compatible text generation APIs.
//!
//! Two providers implement [`LlmProvider`]: the stateful assistant API
//! (thread + run, polled to completion) and plain chat completions. The
//! [`PetitionDrafter`] alternates between them for a bounded number of
//! sequential attempts.

pub mod assistant;
pub mod chat;
pub mod drafter;
pub mod error;
pub mod prompt;
pub mod provider;

pub use assistant::OpenAiAssistantProvider;
pub use chat::OpenAiChatProvider;
pub use drafter::{Draft, PetitionDrafter};
pub use error::LlmError;
pub use prompt::{Prompt, build_prompt};
pub use provider::LlmProvider;
