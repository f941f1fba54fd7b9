//! OpenAI chat-completions adapter. Role-separated turns; token budget and
//! temperature fixed per content type.

use async_trait::async_trait;
use reqwest::Client;

use super::chat::{self, ChatRequest};
use super::{GenerationParams, LlmProvider, ProviderError};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
/// Hardcoded so output style does not drift between deployments.
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    /// Points the adapter at an OpenAI-compatible gateway.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let mut request = ChatRequest::new(MODEL, system, prompt);
        request.max_tokens = Some(params.max_tokens);
        request.temperature = Some(params.temperature);

        chat::complete(&self.client, &self.endpoint(), &self.api_key, &request).await
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        MODEL
    }
}
