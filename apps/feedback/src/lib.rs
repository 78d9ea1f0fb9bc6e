//! # Course Feedback Application
//!
//! Library half of the `feedback` binary: the HTTP API, the CLI commands,
//! the HTTP client the CLI uses, and layered configuration. Exposed as a
//! library so integration tests can build the router directly.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
