//! # Feedback CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `submit` - Submit one feedback form
//! - `import` - Submit every entry of a JSON file
//! - `list` - List feedback cards
//! - `show` - Show one feedback record
//! - `delete` - Delete a feedback record
//! - `stats` - Show the dashboard (the default command)
//! - `courses` - Show per-course averages
//! - `health` - Check the server

mod commands;
mod form;
mod render;

use crate::client::{ClientError, FeedbackClient};
use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use feedback_core::{FeedbackError, ListOrder, Submission};
use std::path::PathBuf;
use thiserror::Error;

pub use commands::*;
pub use form::{FormIssue, check_form};

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Course Feedback - collect and summarize student course feedback
#[derive(Parser, Debug)]
#[command(name = "feedback")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the feedback server
    #[arg(long, global = true, env = "FEEDBACK_URL")]
    pub url: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Environment label reported by the health endpoint
        #[arg(short, long)]
        environment: Option<String>,
    },

    /// Submit one feedback form
    Submit {
        /// Student name
        #[arg(long)]
        name: Option<String>,

        /// Course code
        #[arg(long)]
        course: Option<String>,

        /// Comments about the course
        #[arg(long)]
        comments: Option<String>,

        /// Teaching quality rating (1-5)
        #[arg(long, visible_alias = "engagement", value_parser = clap::value_parser!(i64).range(1..=5))]
        teaching_quality: Option<i64>,

        /// Course preparation rating (1-5)
        #[arg(long, visible_alias = "resources", value_parser = clap::value_parser!(i64).range(1..=5))]
        preparation: Option<i64>,

        /// Student support rating (1-5)
        #[arg(long, visible_alias = "satisfaction", value_parser = clap::value_parser!(i64).range(1..=5))]
        support: Option<i64>,
    },

    /// Submit every entry of a JSON array file
    Import {
        /// Path to the input file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List feedback
    List {
        /// Listing order (latest, oldest)
        #[arg(short, long, default_value = "latest")]
        order: ListOrder,
    },

    /// Show one feedback record
    Show {
        /// Feedback id
        id: u64,
    },

    /// Delete a feedback record
    Delete {
        /// Feedback id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the statistics dashboard
    Stats,

    /// Show per-course averages
    Courses,

    /// Check server health
    Health,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// The form failed local checks and was not sent.
    #[error("Form incomplete: {0}")]
    Form(String),
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.client.url = url;
    }
    let json_mode = cli.json_mode;
    let client = FeedbackClient::new(config.client.url.clone());

    match cli.command {
        Some(Commands::Server {
            host,
            port,
            environment,
        }) => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            if let Some(environment) = environment {
                server.environment = environment;
            }
            cmd_server(server).await
        }
        Some(Commands::Submit {
            name,
            course,
            comments,
            teaching_quality,
            preparation,
            support,
        }) => {
            let submission = Submission {
                student_name: name,
                course_code: course,
                comments,
                teaching_quality,
                preparation,
                support,
            };
            cmd_submit(&client, json_mode, submission).await
        }
        Some(Commands::Import { file }) => cmd_import(&client, json_mode, &file).await,
        Some(Commands::List { order }) => cmd_list(&client, json_mode, order).await,
        Some(Commands::Show { id }) => cmd_show(&client, json_mode, id).await,
        Some(Commands::Delete { id, yes }) => cmd_delete(&client, json_mode, id, yes).await,
        Some(Commands::Courses) => cmd_courses(&client, json_mode).await,
        Some(Commands::Health) => cmd_health(&client, json_mode).await,
        Some(Commands::Stats) | None => cmd_stats(&client, json_mode).await,
    }
}

// =============================================================================
// TESTS
// =============================================================================
