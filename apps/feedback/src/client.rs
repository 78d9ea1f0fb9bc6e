//! # Feedback HTTP Client
//!
//! Typed wrapper around the feedback REST API, used by the CLI commands.

use crate::api::{ApiResponse, HealthResponse};
use feedback_core::{CourseSummary, FeedbackId, FeedbackRecord, ListOrder, StatsSnapshot, Submission};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from the HTTP client layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached.
    #[error("Cannot connect to feedback server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The server answered with a failure envelope.
    #[error("Server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// HTTP status of an API failure, if that is what this is.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// HTTP client for one feedback server.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedbackClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        request.send().await.map_err(|e| ClientError::ConnectionFailed {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    /// Unwrap the response envelope into its `data`.
    async fn unwrap_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let envelope: ApiResponse<T> = resp.json().await.map_err(|e| {
            if status.is_success() {
                ClientError::Parse(e.to_string())
            } else {
                ClientError::Api {
                    status: status.as_u16(),
                    message: status
                        .canonical_reason()
                        .unwrap_or("unexpected response")
                        .to_string(),
                }
            }
        })?;

        if !status.is_success() || !envelope.success {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Parse("response has no data".to_string()))
    }

    /// Submit new feedback.
    pub async fn create(&self, submission: &Submission) -> Result<FeedbackRecord, ClientError> {
        let resp = self
            .send(self.http.post(self.url("/api/feedback")).json(submission))
            .await?;
        Self::unwrap_envelope(resp).await
    }

    /// List all feedback in the given order.
    pub async fn list(&self, order: ListOrder) -> Result<Vec<FeedbackRecord>, ClientError> {
        let resp = self
            .send(
                self.http
                    .get(self.url("/api/feedback"))
                    .query(&[("order", order.as_str())]),
            )
            .await?;
        Self::unwrap_envelope(resp).await
    }

    /// Fetch one record.
    pub async fn get(&self, id: FeedbackId) -> Result<FeedbackRecord, ClientError> {
        let resp = self
            .send(self.http.get(self.url(&format!("/api/feedback/{}", id))))
            .await?;
        Self::unwrap_envelope(resp).await
    }

    /// Delete one record, returning it.
    pub async fn delete(&self, id: FeedbackId) -> Result<FeedbackRecord, ClientError> {
        let resp = self
            .send(self.http.delete(self.url(&format!("/api/feedback/{}", id))))
            .await?;
        Self::unwrap_envelope(resp).await
    }

    /// Dashboard statistics.
    pub async fn stats(&self) -> Result<StatsSnapshot, ClientError> {
        let resp = self.send(self.http.get(self.url("/api/stats"))).await?;
        Self::unwrap_envelope(resp).await
    }

    /// Per-course statistics.
    pub async fn courses(&self) -> Result<Vec<CourseSummary>, ClientError> {
        let resp = self.send(self.http.get(self.url("/api/stats/courses"))).await?;
        Self::unwrap_envelope(resp).await
    }

    /// Server liveness.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self.send(self.http.get(self.url("/api/health"))).await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: "health check failed".to_string(),
            });
        }
        resp.json::<HealthResponse>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = FeedbackClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/stats"), "http://localhost:5000/api/stats");
    }

    #[test]
    fn api_error_exposes_status() {
        let err = ClientError::Api {
            status: 404,
            message: "Feedback not found".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Server rejected request (404): Feedback not found");
        assert_eq!(ClientError::Parse("x".into()).status(), None);
    }
}
