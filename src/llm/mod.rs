//! Model transports.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatModel;

use async_trait::async_trait;

use crate::core::{AgentResult, Prompt};

/// A chat-completion backend.
///
/// `complete` returns the raw response text, or `None` when the
/// provider produced an empty completion. Transport failures are fatal
/// to the run that issued them.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Run one completion for the prompt.
    async fn complete(&self, prompt: &Prompt) -> AgentResult<Option<String>>;
}
