/// Provider adapters — the single point of entry for all LLM backend calls.
///
/// ARCHITECTURAL RULE: No other module may call a model API directly.
/// Exactly one adapter is built per deployment (see `build_provider`); there is
/// no runtime fallback across providers for the same request.
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::Config;
use crate::templates::ContentType;

mod chat;
pub mod gemini;
pub mod mistral;
pub mod openai;

pub use gemini::GeminiProvider;
pub use mistral::MistralProvider;
pub use openai::OpenAiProvider;

/// Upper bound on a single outbound call. A hung backend fails the request
/// instead of pinning it forever.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode provider response: {0}")]
    Decode(String),

    #[error("Provider response did not contain generated text")]
    MissingText,
}

/// Sampling knobs for backends that accept them. Fixed per content type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::CoverLetter => Self {
                max_tokens: 1000,
                temperature: 0.7,
            },
            ContentType::Email => Self {
                max_tokens: 600,
                temperature: 0.7,
            },
            // Casual messages get a little more variety.
            ContentType::Message => Self {
                max_tokens: 400,
                temperature: 0.8,
            },
        }
    }
}

/// A text-generation backend. Implement this to add a provider without
/// touching the pipeline or the handlers.
///
/// Carried in `AppState` as `Arc<dyn LlmProvider>`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends `prompt` as the user turn and `system` as the system turn (or
    /// both in one turn when the backend has no role separation).
    /// Returns the raw generated text, never the full response body.
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        params: &GenerationParams,
    ) -> Result<String, ProviderError>;

    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Mistral,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Mistral => "mistral",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Mistral => "MISTRAL_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "mistral" => Ok(ProviderKind::Mistral),
            other => anyhow::bail!(
                "Unknown LLM provider '{other}' (expected gemini, openai or mistral)"
            ),
        }
    }
}

/// Builds the HTTP client shared by every adapter call.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Chooses the adapter for this deployment. Called once at startup.
pub fn build_provider(config: &Config) -> Result<Arc<dyn LlmProvider>> {
    let client = http_client()?;
    let api_key = config.llm_api_key.clone();
    let base_url = config.llm_base_url.clone();

    let provider: Arc<dyn LlmProvider> = match config.llm_provider {
        ProviderKind::Gemini => {
            let p = GeminiProvider::new(client, api_key, config.gemini_model.clone());
            Arc::new(match base_url {
                Some(url) => p.with_base_url(url),
                None => p,
            })
        }
        ProviderKind::OpenAi => {
            let p = OpenAiProvider::new(client, api_key);
            Arc::new(match base_url {
                Some(url) => p.with_base_url(url),
                None => p,
            })
        }
        ProviderKind::Mistral => {
            let p = MistralProvider::new(client, api_key);
            Arc::new(match base_url {
                Some(url) => p.with_base_url(url),
                None => p,
            })
        }
    };

    Ok(provider)
}

/// Reads a non-success response into a `ProviderError::Status`, preferring the
/// backend's own error message when the body is the usual `{error:{message}}`.
async fn status_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .or_else(|| v.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or(body);
    ProviderError::Status { status, message }
}
