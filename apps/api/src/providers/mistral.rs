//! Mistral chat-completions adapter. Same dialect as OpenAI, but the backend's
//! own defaults are used for token budget and temperature.

use async_trait::async_trait;
use reqwest::Client;

use super::chat::{self, ChatRequest};
use super::{GenerationParams, LlmProvider, ProviderError};

const MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
pub const MODEL: &str = "mistral-small-latest";

#[derive(Clone)]
pub struct MistralProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MistralProvider {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: MISTRAL_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LlmProvider for MistralProvider {
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest::new(MODEL, system, prompt);
        let url = format!("{}/chat/completions", self.base_url);

        chat::complete(&self.client, &url, &self.api_key, &request).await
    }

    fn name(&self) -> &'static str {
        "mistral"
    }

    fn model(&self) -> &str {
        MODEL
    }
}
