pub mod health;

use axum::{routing::get, Router};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-cover-letter",
            get(handlers::handle_cover_letter_status).post(handlers::handle_generate_cover_letter),
        )
        .route(
            "/api/generate-email",
            get(handlers::handle_email_status).post(handlers::handle_generate_email),
        )
        .route(
            "/api/generate-message",
            get(handlers::handle_message_status).post(handlers::handle_generate_message),
        )
        .route("/api/templates", get(handlers::handle_list_templates))
        .with_state(state)
}
