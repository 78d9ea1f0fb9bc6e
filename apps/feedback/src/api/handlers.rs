//! # API Endpoint Handlers
//!
//! Each handler takes exactly one store guard for its whole body: writers
//! take the write lock, readers and the aggregation take the read lock.

use super::{
    AppState,
    types::{ApiResponse, CreateFeedbackRequest, HealthData, HealthResponse, ListQuery},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use feedback_core::{
    CourseSummary, FeedbackError, FeedbackId, FeedbackRecord, ListOrder, StatsSnapshot,
    ValidationGate, course_breakdown,
};

/// Message returned for unknown or malformed identifiers.
pub const NOT_FOUND_MESSAGE: &str = "Feedback not found";

/// Message returned for internal failures; details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Every route the API serves, with a one-line description.
pub const ROUTES: [(&str, &str); 8] = [
    ("GET /", "Service banner and endpoint map"),
    ("GET /api/feedback", "Get all feedback"),
    ("GET /api/feedback/{id}", "Get single feedback"),
    ("POST /api/feedback", "Create new feedback"),
    ("DELETE /api/feedback/{id}", "Delete feedback"),
    ("GET /api/stats", "Get dashboard statistics"),
    ("GET /api/stats/courses", "Get per-course statistics"),
    ("GET /api/health", "Health check"),
];

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map a core error to an HTTP status and a caller-facing envelope.
fn error_response<T>(context: &str, err: &FeedbackError) -> (StatusCode, Json<ApiResponse<T>>) {
    if err.is_validation() {
        tracing::debug!(%err, "{} rejected", context);
        (StatusCode::BAD_REQUEST, Json(ApiResponse::error(err.to_string())))
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, Json(ApiResponse::error(NOT_FOUND_MESSAGE)))
    } else {
        tracing::error!(%err, "Error during {}", context);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(INTERNAL_ERROR_MESSAGE)),
        )
    }
}

/// Parse a path identifier. Anything that is not a plain integer is treated
/// as an unknown record.
fn parse_id(raw: &str) -> Option<FeedbackId> {
    raw.trim().parse::<u64>().ok().map(FeedbackId)
}

// =============================================================================
// ROOT & FALLBACK
// =============================================================================

/// Service banner with the endpoint map.
pub async fn root_handler() -> impl IntoResponse {
    let endpoints: serde_json::Map<String, serde_json::Value> = ROUTES
        .iter()
        .map(|(route, description)| ((*route).to_string(), serde_json::json!(description)))
        .collect();
    Json(serde_json::json!({
        "success": true,
        "message": "Student Feedback API is running!",
        "endpoints": endpoints,
    }))
}

/// JSON 404 for any path no route matches.
pub async fn fallback_handler() -> impl IntoResponse {
    let routes: Vec<&str> = ROUTES.iter().map(|(route, _)| *route).collect();
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(format!(
            "Route not found. Available routes: {}",
            routes.join(", ")
        ))),
    )
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Liveness plus the current record count.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let total_feedback = state.store.read().await.len();
    Json(HealthResponse::new(HealthData {
        total_feedback,
        port: state.config.port,
        environment: state.config.environment.clone(),
    }))
}

// =============================================================================
// FEEDBACK HANDLERS
// =============================================================================

/// List all feedback, latest first unless `?order=oldest`.
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> (StatusCode, Json<ApiResponse<Vec<FeedbackRecord>>>) {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::debug!("Malformed list query: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Invalid query string: {}",
                    rejection.body_text()
                ))),
            );
        }
    };
    let order = match query.order.as_deref() {
        None => ListOrder::default(),
        Some(raw) => match raw.parse::<ListOrder>() {
            Ok(order) => order,
            Err(e) => return error_response("list feedback", &e),
        },
    };

    let store = state.store.read().await;
    let records: Vec<FeedbackRecord> = store.list(order).into_iter().cloned().collect();
    let count = records.len();

    (
        StatusCode::OK,
        Json(ApiResponse::success(records).with_count(count)),
    )
}

/// Fetch a single record.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<FeedbackRecord>>) {
    let Some(id) = parse_id(&raw_id) else {
        return (StatusCode::NOT_FOUND, Json(ApiResponse::error(NOT_FOUND_MESSAGE)));
    };

    let store = state.store.read().await;
    match store.find_by_id(id) {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record.clone()))),
        Err(e) => error_response("get feedback", &e),
    }
}

/// Validate and store a new submission.
pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateFeedbackRequest>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse<FeedbackRecord>>) {
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => {
            tracing::debug!("Malformed feedback body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    // Validate before taking the lock
    let payload = match ValidationGate::check(&request) {
        Ok(p) => p,
        Err(e) => return error_response("create feedback", &e),
    };

    let mut store = state.store.write().await;
    match store.insert(payload) {
        Ok(record) => {
            tracing::debug!(id = %record.id, course = %record.course_code, "Feedback created");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(record.clone()).with_message("Feedback added successfully")),
            )
        }
        Err(e) => error_response("create feedback", &e),
    }
}

/// Delete a record, returning it.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> (StatusCode, Json<ApiResponse<FeedbackRecord>>) {
    let Some(id) = parse_id(&raw_id) else {
        return (StatusCode::NOT_FOUND, Json(ApiResponse::error(NOT_FOUND_MESSAGE)));
    };

    let mut store = state.store.write().await;
    match store.delete_by_id(id) {
        Ok(record) => {
            tracing::debug!(id = %record.id, "Feedback deleted");
            (
                StatusCode::OK,
                Json(ApiResponse::success(record).with_message("Feedback deleted successfully")),
            )
        }
        Err(e) => error_response("delete feedback", &e),
    }
}

// =============================================================================
// STATS HANDLERS
// =============================================================================

/// Dashboard statistics over the whole store.
pub async fn stats_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<StatsSnapshot>>) {
    let store = state.store.read().await;
    let snapshot = StatsSnapshot::from_store(&store, Utc::now());
    (StatusCode::OK, Json(ApiResponse::success(snapshot)))
}

/// Per-course breakdown.
pub async fn courses_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<CourseSummary>>>) {
    let store = state.store.read().await;
    let courses = course_breakdown(store.all());
    let count = courses.len();
    (
        StatusCode::OK,
        Json(ApiResponse::success(courses).with_count(count)),
    )
}

// =============================================================================
// TESTS
// =============================================================================
