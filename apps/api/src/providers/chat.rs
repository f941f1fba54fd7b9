//! Shared wire types and call path for OpenAI-compatible chat completions.
//! Both the OpenAI and Mistral adapters speak this dialect.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{status_error, ProviderError};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// System instruction as the system turn, composed prompt as the user turn.
    pub fn new(model: &'a str, system: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if the backend sent one.
    pub fn into_text(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or(ProviderError::MissingText)
    }
}

/// POSTs a chat-completions request with bearer auth and extracts the text.
pub(crate) async fn complete(
    client: &Client,
    url: &str,
    api_key: &str,
    request: &ChatRequest<'_>,
) -> Result<String, ProviderError> {
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    let body = response.text().await?;
    let parsed: ChatResponse =
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    if let Some(usage) = &parsed.usage {
        debug!(
            "Chat completion succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    parsed.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_first_choice_content() {
        let body = json!({"choices": [{"message": {"content": "  Hello world  "}}]});
        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.into_text().unwrap(), "  Hello world  ");
    }

    #[test]
    fn test_missing_choices_is_missing_text() {
        let parsed: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(parsed.into_text(), Err(ProviderError::MissingText)));
    }

    #[test]
    fn test_null_content_is_missing_text() {
        let body = json!({"choices": [{"message": {"content": null}}]});
        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        assert!(matches!(parsed.into_text(), Err(ProviderError::MissingText)));
    }

    #[test]
    fn test_request_omits_unset_sampling_fields() {
        let req = ChatRequest::new("m", "sys", "hi");
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("max_tokens").is_none());
        assert!(v.get("temperature").is_none());
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_partial_usage_block_keeps_text() {
        let body = json!({
            "choices": [{"message": {"content": "Hello world"}}],
            "usage": {"total_tokens": 5}
        });
        let parsed: ChatResponse = serde_json::from_value(body).unwrap();
        let usage = parsed.usage.as_ref().unwrap();
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 0);
        assert_eq!(parsed.into_text().unwrap(), "Hello world");
    }
}
