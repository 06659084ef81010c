pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::execution::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Execution API
        .route("/api/v1/execute", post(handlers::handle_execute))
        .route(
            "/api/v1/execute/languages",
            get(handlers::handle_list_languages),
        )
        .route(
            "/api/v1/execute/languages/:key",
            get(handlers::handle_get_language),
        )
        .with_state(state)
}
