//! Request orchestration — sequences one generation request end to end.
//!
//! Flow: validate → rate limit → resolve template → compose prompt →
//!       provider call → normalize.
//!
//! Validation runs first so malformed submissions never consume rate-limit
//! budget or reach a paid provider. No step is retried: a provider failure is
//! returned to the caller immediately.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::normalizer::normalize;
use crate::generation::prompts::{compose, effective_language, system_instruction};
use crate::generation::validation::validate;
use crate::models::generation::{GenerationRequest, GenerationResult};
use crate::providers::{GenerationParams, LlmProvider, ProviderError};
use crate::rate_limit::{RateLimitDecision, RateLimiter};
use crate::templates::{get_template, ContentType};

/// A successful generation plus the rate-limit state it left behind.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub result: GenerationResult,
    pub rate_limit: RateLimitDecision,
}

/// Runs the full pipeline for one request.
pub async fn generate(
    provider: &dyn LlmProvider,
    limiter: &RateLimiter,
    client_key: &str,
    content_type: ContentType,
    request: GenerationRequest,
) -> Result<GenerationOutcome, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "generate",
        %request_id,
        content_type = content_type.as_str(),
        provider = provider.name()
    );

    run(provider, limiter, client_key, content_type, request)
        .instrument(span)
        .await
}

async fn run(
    provider: &dyn LlmProvider,
    limiter: &RateLimiter,
    client_key: &str,
    content_type: ContentType,
    request: GenerationRequest,
) -> Result<GenerationOutcome, AppError> {
    // Step 1: Validate
    let validated = validate(content_type, &request)?;

    // Step 2: Rate limit
    let decision = limiter.check_and_consume(client_key).await?;
    if !decision.allowed {
        return Err(AppError::RateLimited {
            retry_after_secs: decision.retry_after_secs(chrono::Utc::now()),
        });
    }

    // Step 3: Resolve template and compose
    let template = get_template(content_type, validated.template_id);
    let language = effective_language(template, request.language);
    let prompt = compose(template, &validated, language);
    let system = system_instruction(content_type, language);
    let params = GenerationParams::for_content_type(content_type);
    info!(
        "Composed prompt: template={}, chars={}, window_count={}/{}",
        template.id,
        prompt.chars().count(),
        decision.count,
        decision.limit
    );

    // Step 4: Provider call
    let raw = match provider.generate(&prompt, system, &params).await {
        Ok(text) => text,
        Err(ProviderError::MissingText) => return Err(AppError::EmptyGeneration(content_type)),
        Err(e) => return Err(e.into()),
    };

    // Step 5: Normalize
    let result = normalize(&raw, template, language)?;
    info!(
        "Generated {} words with {} ({})",
        result.metadata.words_count,
        provider.name(),
        provider.model()
    );

    Ok(GenerationOutcome {
        result,
        rate_limit: decision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::generation::PersonalInfo;
    use crate::providers::testing::MockProvider;
    use crate::rate_limit::{InMemoryRateLimitStore, RateLimitPolicy};
    use crate::templates::Language;
    use std::sync::Arc;

    fn request() -> GenerationRequest {
        GenerationRequest {
            resume_content: Some("r".repeat(60)),
            job_description: Some("j".repeat(120)),
            personal_info: Some(PersonalInfo {
                name: Some("Dana".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn limiter_with(store: Arc<InMemoryRateLimitStore>) -> RateLimiter {
        RateLimiter::new(store, RateLimitPolicy::default())
    }

    #[tokio::test]
    async fn test_short_input_skips_limiter_and_provider() {
        let provider = MockProvider::replying("unused");
        let store = Arc::new(InMemoryRateLimitStore::new());
        let limiter = limiter_with(store.clone());

        let mut req = request();
        req.resume_content = Some("too short".into());
        let err = generate(&provider, &limiter, "1.2.3.4", ContentType::CoverLetter, req)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(store.len(), 0, "rate limiter must not be touched");
    }

    #[tokio::test]
    async fn test_success_normalizes_provider_text() {
        let provider = MockProvider::replying("  Hello world  ");
        let limiter = RateLimiter::in_memory(RateLimitPolicy::default());

        let outcome = generate(&provider, &limiter, "k", ContentType::CoverLetter, request())
            .await
            .unwrap();

        assert_eq!(outcome.result.text, "Hello world");
        assert_eq!(outcome.result.metadata.words_count, 2);
        assert_eq!(outcome.result.metadata.template_used, "professional");
        assert_eq!(outcome.rate_limit.count, 1);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_request_never_reaches_provider() {
        let provider = MockProvider::replying("ok");
        let limiter = RateLimiter::in_memory(RateLimitPolicy {
            max_requests: 1,
            ..Default::default()
        });

        generate(&provider, &limiter, "k", ContentType::Email, request())
            .await
            .unwrap();
        let err = generate(&provider, &limiter, "k", ContentType::Email, request())
            .await
            .unwrap_err();

        match err {
            AppError::RateLimited { retry_after_secs } => assert!(retry_after_secs > 0),
            other => panic!("expected rate limit, got {other:?}"),
        }
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_text_is_empty_generation() {
        let provider = MockProvider::replying("   ");
        let limiter = RateLimiter::in_memory(RateLimitPolicy::default());
        let err = generate(&provider, &limiter, "k", ContentType::Message, request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyGeneration(ContentType::Message)));
    }

    #[tokio::test]
    async fn test_missing_text_is_empty_generation() {
        let provider = MockProvider::failing(ProviderError::MissingText);
        let limiter = RateLimiter::in_memory(RateLimitPolicy::default());
        let err = generate(&provider, &limiter, "k", ContentType::CoverLetter, request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyGeneration(ContentType::CoverLetter)));
    }

    #[tokio::test]
    async fn test_status_failure_is_provider_error() {
        let provider = MockProvider::failing(ProviderError::Status {
            status: 500,
            message: "boom".into(),
        });
        let limiter = RateLimiter::in_memory(RateLimitPolicy::default());
        let err = generate(&provider, &limiter, "k", ContentType::CoverLetter, request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Provider(ProviderError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_hebrew_email_uses_hebrew_system_and_metadata() {
        let provider = MockProvider::replying("שלום רב, שמי דנה");
        let limiter = RateLimiter::in_memory(RateLimitPolicy::default());
        let mut req = request();
        req.template_id = Some("email-hebrew".into());
        req.language = Some(Language::Hebrew);

        let outcome = generate(&provider, &limiter, "k", ContentType::Email, req)
            .await
            .unwrap();

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("Write the entire email in Hebrew"));
        assert!(prompt.contains("Name: Dana"));
        assert_eq!(
            provider.last_system().unwrap(),
            crate::generation::prompts::EMAIL_SYSTEM_HEBREW
        );
        assert_eq!(outcome.result.metadata.language, Some(Language::Hebrew));
        assert_eq!(outcome.result.template.id, "email-hebrew");
    }

    #[tokio::test]
    async fn test_params_follow_content_type() {
        let provider = MockProvider::replying("hi");
        let limiter = RateLimiter::in_memory(RateLimitPolicy::default());
        generate(&provider, &limiter, "k", ContentType::Message, request())
            .await
            .unwrap();
        let params = provider.calls.lock().last().unwrap().2;
        assert_eq!(params, GenerationParams::for_content_type(ContentType::Message));
    }
}
