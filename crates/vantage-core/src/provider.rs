use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::messages::ChatMessage;
use crate::tokens::TokenUsage;

/// A buffered chat-completion result.
///
/// `text` is the first candidate's content when the response parsed cleanly,
/// otherwise the raw response body so the caller can inspect the error.
#[derive(Clone, Debug)]
pub struct Completion {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }
}

/// Trait implemented by each chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    /// Send one ordered message sequence and wait for the full response.
    /// Errors are transport-level only; HTTP error bodies surface as
    /// `Completion::text` through the lenient parse path.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_text_constructor() {
        let c = Completion::text("2: the left door is open");
        assert_eq!(c.text, "2: the left door is open");
        assert!(c.usage.is_none());
    }
}
