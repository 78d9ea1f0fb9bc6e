//! # Course Feedback
//!
//! The main binary for the course feedback service.
//!
//! This application provides:
//! - HTTP REST API server (axum-based) over an in-memory store
//! - CLI client for submitting, listing and summarizing feedback
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/feedback (THE BINARY)             │
//! │                                                       │
//! │  ┌─────────────┐   HTTP   ┌─────────────┐             │
//! │  │ CLI client  │ ───────▶ │  HTTP API   │             │
//! │  │  (clap)     │ (reqwest)│   (axum)    │             │
//! │  └─────────────┘          └──────┬──────┘             │
//! │                                  ▼                    │
//! │                          ┌───────────────┐            │
//! │                          │ feedback-core │            │
//! │                          │  (THE LOGIC)  │            │
//! │                          └───────────────┘            │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! feedback server --port 5000
//!
//! # Client operations
//! feedback submit --name Ada --course CS101 --comments "Clear lectures" \
//!     --teaching-quality 4 --preparation 5 --support 4
//! feedback list --order oldest
//! feedback stats
//! ```

use clap::Parser;
use feedback::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; FEEDBACK_LOG_FORMAT=json switches to JSON lines.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("FEEDBACK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if verbose {
        "feedback=debug,feedback_core=debug,tower_http=debug"
    } else {
        "feedback=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ┌─┐┌─┐┌─┐┌┬┐┌┐ ┌─┐┌─┐┬┌─
  ├┤ ├┤ ├┤  ││├┴┐├─┤│  ├┴┐
  └  └─┘└─┘─┴┘└─┘┴ ┴└─┘┴ ┴

  Course Feedback v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
