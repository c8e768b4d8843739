pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cv::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/upload", post(handlers::handle_upload))
        .route("/api/v1/details", get(handlers::handle_list_details))
        .route(
            "/api/v1/details/:id",
            get(handlers::handle_get_details).patch(handlers::handle_update_details),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
