use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::{instrument, warn};

use vantage_core::errors::ProviderError;
use vantage_core::messages::ChatMessage;
use vantage_core::provider::{ChatProvider, Completion};

use crate::credentials::ApiKey;
use crate::wire;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions client for the OpenAI API.
pub struct OpenAiProvider {
    client: Client,
    api_key: Option<ApiKey>,
    model: String,
}

impl OpenAiProvider {
    /// A `None` credential still sends requests (with an empty bearer token);
    /// the API's error body then flows through the lenient parse path.
    pub fn new(api_key: Option<ApiKey>, model: Option<&str>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }

    fn bearer_token(&self) -> String {
        self.api_key
            .as_ref()
            .map(|key| key.0.expose_secret().to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, ProviderError> {
        let body = wire::build_request_body(&self.model, messages);

        let resp = self
            .client
            .post(API_URL)
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token()))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let classified = ProviderError::from_status(status.as_u16(), String::new());
            warn!(
                status = status.as_u16(),
                kind = classified.error_kind(),
                "chat completion request failed; surfacing raw body"
            );
        }

        let (text, usage) = wire::response_text(&body);
        Ok(Completion { text, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_properties() {
        let provider = OpenAiProvider::new(Some(ApiKey::new("sk-test")), Some("gpt-4o-mini"));
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn default_model_used_when_none() {
        let provider = OpenAiProvider::new(None, None);
        assert_eq!(provider.model(), DEFAULT_MODEL);
    }

    #[test]
    fn missing_key_yields_empty_bearer_token() {
        let provider = OpenAiProvider::new(None, None);
        assert_eq!(provider.bearer_token(), "");
    }

    #[test]
    fn bearer_token_exposes_configured_key() {
        let provider = OpenAiProvider::new(Some(ApiKey::new("sk-abc")), None);
        assert_eq!(provider.bearer_token(), "sk-abc");
    }

    #[test]
    fn timeout_constants() {
        assert_eq!(CONNECT_TIMEOUT, Duration::from_secs(30));
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(120));
    }
}
