//! Judge0 client. The only module that talks HTTP to the execution service.
//!
//! `SubmissionApi` is the seam the executor polls through; `Judge0Client`
//! implements it with reqwest against `{base_url}/submissions`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tracing::debug;

use crate::execution::models::{CreatedSubmission, NewSubmission, SubmissionResponse};

const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Judge0 submit failed: {status} {body}")]
    SubmitRejected { status: u16, body: String },

    #[error("Judge0 GET failed: {status}")]
    PollRejected { status: u16 },

    #[error("No submission token from Judge0")]
    MissingToken,
}

/// Transport for one submission's lifecycle: create it, then fetch its state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Creates a submission and returns its opaque token.
    async fn create(&self, submission: &NewSubmission) -> Result<String, ExecutionError>;

    async fn fetch(&self, token: &str) -> Result<SubmissionResponse, ExecutionError>;
}

#[derive(Clone)]
pub struct Judge0Client {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl Judge0Client {
    pub fn new(
        base_url: String,
        auth_token: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, ExecutionError> {
        Ok(Self {
            client: Client::builder().timeout(request_timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(AUTH_HEADER, token),
            None => request,
        }
    }
}

#[async_trait]
impl SubmissionApi for Judge0Client {
    async fn create(&self, submission: &NewSubmission) -> Result<String, ExecutionError> {
        let url = format!("{}/submissions", self.base_url);
        let response = self
            .with_auth(self.client.post(url))
            .query(&[("base64_encoded", "false")])
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExecutionError::SubmitRejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedSubmission = response.json().await?;
        let token = created
            .token
            .filter(|t| !t.is_empty())
            .ok_or(ExecutionError::MissingToken)?;

        debug!(%token, language_id = submission.language_id, "Judge0 submission created");
        Ok(token)
    }

    async fn fetch(&self, token: &str) -> Result<SubmissionResponse, ExecutionError> {
        let url = format!("{}/submissions/{}", self.base_url, token);
        let response = self
            .with_auth(self.client.get(url))
            .query(&[("base64_encoded", "false")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExecutionError::PollRejected {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone, Default)]
    struct Recorded {
        requests: Arc<Mutex<Vec<(String, HashMap<String, String>, Option<String>)>>>,
        bodies: Arc<Mutex<Vec<Value>>>,
    }

    async fn create_handler(
        State(rec): State<Recorded>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = header_value(&headers);
        rec.requests
            .lock()
            .unwrap()
            .push(("create".into(), query, auth));
        let language_id = body["language_id"].as_u64();
        rec.bodies.lock().unwrap().push(body);

        match language_id {
            Some(0) => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"language_id": ["is invalid"]}))),
            Some(1) => (StatusCode::CREATED, Json(json!({}))),
            _ => (StatusCode::CREATED, Json(json!({"token": "abc"}))),
        }
    }

    async fn fetch_handler(
        State(rec): State<Recorded>,
        Path(token): Path<String>,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        let auth = header_value(&headers);
        rec.requests
            .lock()
            .unwrap()
            .push((format!("fetch:{token}"), query, auth));

        if token == "gone" {
            return (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})));
        }
        (
            StatusCode::OK,
            Json(json!({
                "stdout": "hi\n",
                "stderr": null,
                "compile_output": null,
                "message": null,
                "status": { "id": 3, "description": "Accepted" }
            })),
        )
    }

    fn header_value(headers: &HeaderMap) -> Option<String> {
        headers
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn spawn_stub() -> (String, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/submissions", post(create_handler))
            .route("/submissions/:token", get(fetch_handler))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/"), recorded)
    }

    fn submission(language_id: u32) -> NewSubmission {
        NewSubmission {
            source_code: "print('hi')".into(),
            language_id,
            stdin: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_round_trip_on_the_wire() {
        let (base_url, recorded) = spawn_stub().await;
        let client = Judge0Client::new(base_url, Some("secret".into()), Duration::from_secs(5)).unwrap();

        let token = client.create(&submission(71)).await.unwrap();
        assert_eq!(token, "abc");

        let response = client.fetch(&token).await.unwrap();
        assert_eq!(response.stdout.as_deref(), Some("hi\n"));
        assert_eq!(response.status.map(|s| s.id), Some(3));

        let requests = recorded.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "create");
        assert_eq!(requests[1].0, "fetch:abc");
        for (_, query, auth) in requests.iter() {
            assert_eq!(query.get("base64_encoded").map(String::as_str), Some("false"));
            assert_eq!(auth.as_deref(), Some("secret"));
        }

        let bodies = recorded.bodies.lock().unwrap();
        assert_eq!(
            bodies[0],
            json!({ "source_code": "print('hi')", "language_id": 71, "stdin": "" })
        );
    }

    #[tokio::test]
    async fn test_no_auth_header_without_token() {
        let (base_url, recorded) = spawn_stub().await;
        let client = Judge0Client::new(base_url, None, Duration::from_secs(5)).unwrap();

        client.create(&submission(71)).await.unwrap();

        let requests = recorded.requests.lock().unwrap();
        assert_eq!(requests[0].2, None);
    }

    #[tokio::test]
    async fn test_create_rejected_carries_status_and_body() {
        let (base_url, _) = spawn_stub().await;
        let client = Judge0Client::new(base_url, None, Duration::from_secs(5)).unwrap();

        let err = client.create(&submission(0)).await.unwrap_err();
        match err {
            ExecutionError::SubmitRejected { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("is invalid"));
            }
            other => panic!("expected SubmitRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_without_token() {
        let (base_url, _) = spawn_stub().await;
        let client = Judge0Client::new(base_url, None, Duration::from_secs(5)).unwrap();

        let err = client.create(&submission(1)).await.unwrap_err();
        assert!(matches!(err, ExecutionError::MissingToken));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let (base_url, _) = spawn_stub().await;
        let client = Judge0Client::new(base_url, None, Duration::from_secs(5)).unwrap();

        let err = client.fetch("gone").await.unwrap_err();
        assert!(matches!(err, ExecutionError::PollRejected { status: 404 }));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            Judge0Client::new("https://ce.judge0.com/".into(), None, Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "https://ce.judge0.com");
    }
}
