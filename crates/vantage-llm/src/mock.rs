use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use vantage_core::errors::ProviderError;
use vantage_core::messages::ChatMessage;
use vantage_core::provider::{ChatProvider, Completion};
use vantage_core::tokens::TokenUsage;

/// Pre-programmed responses for deterministic testing without API calls.
#[derive(Clone)]
pub enum MockResponse {
    /// A parsed completion text (optionally with usage).
    Text(String, Option<TokenUsage>),
    /// A raw body as surfaced by the lenient parse path.
    RawBody(String),
    /// A transport-level error from the `complete()` call itself.
    Error(ProviderError),
    /// Wait a duration, then yield the inner response.
    Delay(Duration, Box<MockResponse>),
}

impl MockResponse {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string(), None)
    }

    pub fn text_with_usage(text: &str, usage: TokenUsage) -> Self {
        Self::Text(text.to_string(), Some(usage))
    }

    pub fn delayed(delay: Duration, inner: MockResponse) -> Self {
        Self::Delay(delay, Box::new(inner))
    }
}

/// Mock provider that returns pre-programmed responses in sequence.
pub struct MockProvider {
    responses: Vec<MockResponse>,
    call_count: AtomicUsize,
}

impl MockProvider {
    pub fn new(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _messages: &[ChatMessage]) -> Result<Completion, ProviderError> {
        let idx = self.call_count.fetch_add(1, Ordering::Relaxed);

        let Some(response) = self.responses.get(idx).cloned() else {
            return Err(ProviderError::InvalidRequest(format!(
                "MockProvider: no response configured for call {idx}"
            )));
        };

        let mut current = response;
        loop {
            match current {
                MockResponse::Text(text, usage) => return Ok(Completion { text, usage }),
                MockResponse::RawBody(body) => return Ok(Completion::text(body)),
                MockResponse::Error(e) => return Err(e),
                MockResponse::Delay(duration, inner) => {
                    tokio::time::sleep(duration).await;
                    current = *inner;
                }
            }
        }
    }
}
