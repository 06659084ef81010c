//! Axum route handlers for the Execution API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::execution::languages::{self, Language};
use crate::execution::models::{ExecuteRequest, ExecutionResult};
use crate::state::AppState;

/// POST /api/v1/execute
///
/// Runs the code on Judge0 and waits for the outcome. Execution failures
/// (unsupported language, compile error, timeout, ...) come back as 200 with
/// `success: false`.
pub async fn handle_execute(
    State(state): State<AppState>,
    Json(request): Json<ExecuteRequest>,
) -> Result<Json<ExecutionResult>, AppError> {
    if request.code.len() > state.config.max_source_bytes {
        return Err(AppError::Validation(format!(
            "code exceeds {} bytes",
            state.config.max_source_bytes
        )));
    }

    let result = state
        .executor
        .execute(&request.code, &request.language, request.input.as_deref())
        .await;

    Ok(Json(result))
}

/// GET /api/v1/execute/languages
pub async fn handle_list_languages() -> Json<Vec<&'static Language>> {
    Json(languages::all())
}

/// GET /api/v1/execute/languages/:key
pub async fn handle_get_language(
    Path(key): Path<String>,
) -> Result<Json<&'static Language>, AppError> {
    languages::lookup(&key)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Language '{key}' is not supported")))
}
