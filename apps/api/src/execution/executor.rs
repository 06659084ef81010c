//! Submit-and-poll loop for remote code execution.
//!
//! `CodeExecutor::execute` always resolves to an `ExecutionResult`; transport
//! and protocol errors are folded into `success: false` with a fixed message.
//! The loop is bounded by attempt count only, so slow responses can stretch
//! total wall time past `interval * max_attempts`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::execution::judge0::{ExecutionError, SubmissionApi};
use crate::execution::languages;
use crate::execution::models::{ExecutionResult, NewSubmission, SubmissionStatus};

pub const UNSUPPORTED_LANGUAGE: &str = "Unsupported language for execution";
pub const TIMED_OUT: &str = "Execution timed out waiting for result";
pub const NETWORK_ERROR: &str = "Network error, please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_attempts: 40,
        }
    }
}

/// Lifecycle of one submission as seen by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecutionState {
    Created,
    Queued,
    Processing,
    Accepted,
    Errored,
}

impl From<SubmissionStatus> for ExecutionState {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::InQueue => ExecutionState::Queued,
            SubmissionStatus::Processing => ExecutionState::Processing,
            SubmissionStatus::Accepted => ExecutionState::Accepted,
            SubmissionStatus::Failed(_) => ExecutionState::Errored,
        }
    }
}

#[derive(Clone)]
pub struct CodeExecutor {
    api: Arc<dyn SubmissionApi>,
    policy: PollPolicy,
}

impl CodeExecutor {
    pub fn new(api: Arc<dyn SubmissionApi>, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Runs `code` remotely and waits for a terminal status.
    pub async fn execute(&self, code: &str, language: &str, stdin: Option<&str>) -> ExecutionResult {
        let Some(lang) = languages::lookup(language) else {
            debug!(language, "rejected unsupported language");
            return ExecutionResult::failure(UNSUPPORTED_LANGUAGE);
        };

        let submission = NewSubmission {
            source_code: code.to_string(),
            language_id: lang.language_id,
            stdin: stdin.unwrap_or_default().to_string(),
        };

        match self.submit_and_poll(&submission).await {
            Ok(Some(result)) => result,
            Ok(None) => {
                warn!(
                    language,
                    attempts = self.policy.max_attempts,
                    "execution did not finish before poll limit"
                );
                ExecutionResult::failure(TIMED_OUT)
            }
            Err(err) => {
                warn!(language, error = %err, "execution request failed");
                match err {
                    ExecutionError::SubmitRejected { .. } | ExecutionError::MissingToken => {
                        ExecutionResult::failure(err.to_string())
                    }
                    ExecutionError::Http(_) | ExecutionError::PollRejected { .. } => {
                        ExecutionResult::failure(NETWORK_ERROR)
                    }
                }
            }
        }
    }

    /// Returns `Ok(None)` when the attempt ceiling is reached.
    async fn submit_and_poll(
        &self,
        submission: &NewSubmission,
    ) -> Result<Option<ExecutionResult>, ExecutionError> {
        let token = self.api.create(submission).await?;
        let mut state = ExecutionState::Created;

        for attempt in 1..=self.policy.max_attempts {
            tokio::time::sleep(self.policy.interval).await;

            let response = self.api.fetch(&token).await?;
            let next = ExecutionState::from(response.status());
            if next != state {
                debug!(%token, attempt, from = ?state, to = ?next, "submission state changed");
                state = next;
            }

            if response.status().is_terminal() {
                let result = response.into_result();
                info!(%token, attempt, success = result.success, "execution finished");
                return Ok(Some(result));
            }
        }

        Ok(None)
    }
}
