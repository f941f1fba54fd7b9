use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::providers::ProviderError;
use crate::rate_limit::RateLimitStoreError;
use crate::templates::ContentType;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant becomes a `{ "error": string }` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("No {} generated", .0.noun())]
    EmptyGeneration(ContentType),

    #[error("Rate limit store error: {0}")]
    RateLimitStore(#[from] RateLimitStoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error. Please try again later.".to_string(),
                )
            }
            AppError::EmptyGeneration(content_type) => {
                tracing::error!("Provider returned no {} text", content_type.noun());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("No {} generated. Please try again.", content_type.noun()),
                )
            }
            AppError::RateLimitStore(e) => {
                tracing::error!("Rate limit store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error. Please try again later.".to_string(),
                )
            }
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();

        if let AppError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_400_with_message() {
        let response = AppError::Validation("too short".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "too short"}));
    }

    #[tokio::test]
    async fn test_rate_limited_sets_retry_after() {
        let response = AppError::RateLimited {
            retry_after_secs: 42,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
    }

    #[tokio::test]
    async fn test_provider_error_hides_upstream_message() {
        let err = AppError::from(ProviderError::Status {
            status: 401,
            message: "Incorrect API key sk-abc".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().contains("sk-abc"));
    }

    #[tokio::test]
    async fn test_empty_generation_names_content_type() {
        let response = AppError::EmptyGeneration(ContentType::CoverLetter).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "No cover letter generated. Please try again."
        );
    }

    #[tokio::test]
    async fn test_query_rejection_is_400() {
        use crate::generation::handlers::TemplatesQuery;
        use axum::{extract::Query, http::Uri};

        let uri: Uri = "/api/templates?contentType=memo".parse().unwrap();
        let rejection = Query::<TemplatesQuery>::try_from_uri(&uri).unwrap_err();
        let response = AppError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query:"));
    }
}
