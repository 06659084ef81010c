use crate::config::Config;
use crate::execution::executor::CodeExecutor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Judge0-backed executor. Holds the transport behind `Arc<dyn SubmissionApi>`.
    pub executor: CodeExecutor,
    pub config: Config,
}
