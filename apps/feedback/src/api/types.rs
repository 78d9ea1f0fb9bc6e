//! # API Request/Response Types
//!
//! JSON structures exchanged over HTTP. Every response uses the same
//! envelope: `{ success, message?, data?, count? }` with camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for creating feedback.
pub use feedback_core::Submission as CreateFeedbackRequest;

// =============================================================================
// ENVELOPE
// =============================================================================

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(msg.into()),
            data: None,
            count: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

// =============================================================================
// LIST QUERY
// =============================================================================

/// Query string of `GET /api/feedback`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// `latest` (default) or `oldest`.
    #[serde(default)]
    pub order: Option<String>,
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: HealthData,
}

/// Liveness details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub total_feedback: usize,
    pub port: u16,
    pub environment: String,
}

impl HealthResponse {
    pub fn new(data: HealthData) -> Self {
        Self {
            success: true,
            message: "Server is running successfully".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            data,
        }
    }
}
