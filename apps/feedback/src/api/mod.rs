//! # Feedback HTTP API Module
//!
//! The HTTP REST API server, built on axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Service banner and endpoint map
//! - `GET /api/feedback` - List feedback (latest first, `?order=oldest` to flip)
//! - `POST /api/feedback` - Submit feedback
//! - `GET /api/feedback/{id}` - Get one feedback record
//! - `DELETE /api/feedback/{id}` - Delete a feedback record
//! - `GET /api/stats` - Dashboard statistics
//! - `GET /api/stats/courses` - Per-course statistics
//! - `GET /api/health` - Health check
//!
//! ## Configuration
//!
//! CORS origins, rate limit and body limit come from [`ServerConfig`].

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE, ROUTES, courses_handler, create_handler,
    delete_handler, fallback_handler, get_handler, health_handler, list_handler, root_handler,
    stats_handler,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter, rate_limit_middleware};
pub use types::{ApiResponse, CreateFeedbackRequest, HealthData, HealthResponse, ListQuery};

use crate::config::ServerConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use feedback_core::{FeedbackError, RecordStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the record store and the server settings.
#[derive(Clone)]
pub struct AppState {
    /// The record store. One guard per request keeps every operation atomic.
    pub store: Arc<RwLock<RecordStore>>,
    /// Settings reported by the health endpoint and used to build layers.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new app state around a store.
    #[must_use]
    pub fn new(store: RecordStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

/// Build the CORS layer from the configured origins.
///
/// - `["*"]`: any origin
/// - empty: localhost only
/// - otherwise: the listed origins; unparseable entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. Restrict cors_origins in production.");
        return CorsLayer::permissive();
    }
    if origins.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

/// Restrictive CORS layer for local development front-ends.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5000",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5000",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/api/health", get(handlers::health_handler))
        .route(
            "/api/feedback",
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            "/api/feedback/{id}",
            get(handlers::get_handler).delete(handlers::delete_handler),
        )
        .route("/api/stats", get(handlers::stats_handler))
        .route("/api/stats/courses", get(handlers::courses_handler))
        .fallback(handlers::fallback_handler);

    match middleware::create_rate_limiter(config.rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", config.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&config.cors_origins))
                .layer(axum::extract::DefaultBodyLimit::max(config.body_limit)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: ServerConfig, store: RecordStore) -> Result<(), FeedbackError> {
    let addr = config.bind_addr();
    let environment = config.environment.clone();
    let state = AppState::new(store, config);
    let record_count = state.store.read().await.len();
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FeedbackError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Feedback HTTP server listening on {}", addr);
    tracing::info!("Environment: {}", environment);
    tracing::info!("Store ready: {} feedback entries", record_count);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FeedbackError::Io(format!("Server error: {}", e)))
}

/// Resolve on Ctrl+C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, draining connections"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
