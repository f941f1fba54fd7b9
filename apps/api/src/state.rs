use std::sync::Arc;

use crate::providers::LlmProvider;
use crate::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one provider adapter chosen for this deployment.
    pub provider: Arc<dyn LlmProvider>,
    pub rate_limiter: RateLimiter,
}
