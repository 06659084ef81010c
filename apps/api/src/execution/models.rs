use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// API request / result
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub input: Option<String>,
}

/// Normalized outcome of one execution. `success` is the only field callers
/// need to branch on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: String,
    pub error: String,
    pub success: bool,
}

impl ExecutionResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            output: String::new(),
            error: error.into(),
            success: false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Judge0 wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubmission {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedSubmission {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusBody {
    pub id: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Poll response. Judge0 sends `null` for any field that has no value yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<StatusBody>,
}

// ────────────────────────────────────────────────────────────────────────────
// Status classification
// ────────────────────────────────────────────────────────────────────────────

pub const STATUS_IN_QUEUE: u32 = 1;
pub const STATUS_PROCESSING: u32 = 2;
pub const STATUS_ACCEPTED: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    InQueue,
    Processing,
    Accepted,
    /// Any other terminal status (compile error, runtime error, TLE, ...).
    /// `None` when the response carried no status at all.
    Failed(Option<u32>),
}

impl SubmissionStatus {
    pub fn from_id(id: Option<u32>) -> Self {
        match id {
            Some(STATUS_IN_QUEUE) => SubmissionStatus::InQueue,
            Some(STATUS_PROCESSING) => SubmissionStatus::Processing,
            Some(STATUS_ACCEPTED) => SubmissionStatus::Accepted,
            other => SubmissionStatus::Failed(other),
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, SubmissionStatus::InQueue | SubmissionStatus::Processing)
    }
}

impl SubmissionResponse {
    pub fn status(&self) -> SubmissionStatus {
        SubmissionStatus::from_id(self.status.as_ref().map(|s| s.id))
    }

    /// Builds the caller-facing result from a terminal response.
    ///
    /// Error preference: stderr, compile output, message, then the status
    /// description (only when the run failed).
    pub fn into_result(self) -> ExecutionResult {
        let success = self.status() == SubmissionStatus::Accepted;
        let output = trimmed(self.stdout.as_deref());

        let detail = [
            trimmed(self.stderr.as_deref()),
            trimmed(self.compile_output.as_deref()),
            self.message.clone().unwrap_or_default(),
        ]
        .into_iter()
        .find(|s| !s.is_empty());

        let error = match detail {
            Some(detail) => detail,
            None if success => String::new(),
            None => self
                .status
                .and_then(|s| s.description)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "Execution failed".to_string()),
        };

        ExecutionResult {
            output,
            error,
            success,
        }
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.unwrap_or_default().trim().to_string()
}
