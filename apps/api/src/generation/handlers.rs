//! Axum route handlers for the generation API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::generation::pipeline::{generate, GenerationOutcome};
use crate::models::generation::{GenerationMetadata, GenerationRequest};
use crate::rate_limit::{ClientKey, RateLimitDecision};
use crate::state::AppState;
use crate::templates::{templates, ContentType, Language, Template};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Template fields echoed back with a generation. Which optional fields appear
/// depends on the content type.
#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<&'static str>,
    pub tone: &'static str,
}

impl TemplateSummary {
    fn of(template: &'static Template) -> Self {
        let (language, platform) = match template.content_type {
            ContentType::CoverLetter => (None, None),
            ContentType::Email => (Some(template.language), None),
            ContentType::Message => (Some(template.language), template.platform),
        };
        Self {
            id: template.id,
            name: template.name,
            language,
            platform,
            tone: template.tone,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub template: TemplateSummary,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub email: String,
    pub template: TemplateSummary,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub template: TemplateSummary,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesQuery {
    pub content_type: Option<ContentType>,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

fn rate_limit_headers(decision: &RateLimitDecision) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(decision.remaining()));
    headers
}

async fn run(
    state: &AppState,
    client: &ClientKey,
    content_type: ContentType,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<GenerationOutcome, AppError> {
    let Json(request) = payload?;
    generate(
        state.provider.as_ref(),
        &state.rate_limiter,
        client.as_str(),
        content_type,
        request,
    )
    .await
}

fn status_payload(service: &str) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": service,
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    client: ClientKey,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let outcome = run(&state, &client, ContentType::CoverLetter, payload).await?;
    let result = outcome.result;

    let body = CoverLetterResponse {
        cover_letter: result.text,
        template: TemplateSummary::of(result.template),
        metadata: result.metadata,
    };
    Ok((rate_limit_headers(&outcome.rate_limit), Json(body)).into_response())
}

/// POST /api/generate-email
pub async fn handle_generate_email(
    State(state): State<AppState>,
    client: ClientKey,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let outcome = run(&state, &client, ContentType::Email, payload).await?;
    let result = outcome.result;

    let body = EmailResponse {
        email: result.text,
        template: TemplateSummary::of(result.template),
        metadata: result.metadata,
    };
    Ok((rate_limit_headers(&outcome.rate_limit), Json(body)).into_response())
}

/// POST /api/generate-message
pub async fn handle_generate_message(
    State(state): State<AppState>,
    client: ClientKey,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let outcome = run(&state, &client, ContentType::Message, payload).await?;
    let result = outcome.result;

    let body = MessageResponse {
        message: result.text,
        template: TemplateSummary::of(result.template),
        metadata: result.metadata,
    };
    Ok((rate_limit_headers(&outcome.rate_limit), Json(body)).into_response())
}

/// GET /api/generate-cover-letter
pub async fn handle_cover_letter_status() -> Json<Value> {
    status_payload("cover-letter-generation")
}

/// GET /api/generate-email
pub async fn handle_email_status() -> Json<Value> {
    status_payload("email-generation")
}

/// GET /api/generate-message
pub async fn handle_message_status() -> Json<Value> {
    status_payload("message-generation")
}

/// GET /api/templates?contentType=email
///
/// Lists a catalog for template pickers. Without `contentType`, returns all
/// three catalogs keyed by content type.
pub async fn handle_list_templates(
    query: Result<Query<TemplatesQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;

    let body = match query.content_type {
        Some(content_type) => json!({
            "contentType": content_type,
            "templates": templates(content_type),
        }),
        None => json!({
            "cover-letter": templates(ContentType::CoverLetter),
            "email": templates(ContentType::Email),
            "message": templates(ContentType::Message),
        }),
    };

    Ok(Json(body))
}
