use serde::Deserialize;
use serde_json::{json, Value};

use vantage_core::messages::ChatMessage;
use vantage_core::tokens::TokenUsage;

/// Build the chat-completions request body: model name plus the ordered
/// role/content pairs.
pub fn build_request_body(model: &str, messages: &[ChatMessage]) -> Value {
    json!({
        "model": model,
        "messages": messages,
    })
}

/// Wire shape of a chat-completions response. Every field is defaulted so a
/// partial body still deserializes as far as it can.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResponseMessage {
    pub role: String,
    pub content: String,
}

/// Extract the first candidate's content. A malformed body or an empty
/// candidate list surfaces the raw body instead of failing, so error
/// payloads stay inspectable downstream.
pub fn response_text(body: &str) -> (String, Option<TokenUsage>) {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(response) if !response.choices.is_empty() => {
            let usage = response.usage;
            let text = response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .unwrap_or_else(|| body.to_string());
            (text, usage)
        }
        _ => (body.to_string(), None),
    }
}
