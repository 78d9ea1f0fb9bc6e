//! # CLI Command Implementations
//!
//! `server` runs the API in-process; every other command is a client of a
//! running server.

use super::CliError;
use super::form::check_form;
use super::render;
use crate::api;
use crate::client::FeedbackClient;
use crate::config::ServerConfig;
use feedback_core::{FeedbackError, FeedbackId, ListOrder, RecordStore, Submission, ValidationGate};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum import file size (1 MiB).
const MAX_IMPORT_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum number of submissions in one import file.
const MAX_IMPORT_ENTRIES: usize = 1000;

/// Resolve and check an input file path.
///
/// Canonicalizes the path (resolving `..` and symlinks) and requires a
/// regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, FeedbackError> {
    let canonical = path.canonicalize().map_err(|e| {
        FeedbackError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(FeedbackError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Reject files larger than `max_size` before reading them.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), FeedbackError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| FeedbackError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(FeedbackError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Read a JSON array of submissions from disk.
pub fn read_import_file(path: &Path) -> Result<Vec<Submission>, FeedbackError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_IMPORT_FILE_SIZE)?;

    let contents = std::fs::read(&validated)
        .map_err(|e| FeedbackError::Io(format!("Read file: {}", e)))?;
    let submissions: Vec<Submission> = serde_json::from_slice(&contents)
        .map_err(|e| FeedbackError::Io(format!("Import file is not a JSON array of submissions: {}", e)))?;

    if submissions.len() > MAX_IMPORT_ENTRIES {
        return Err(FeedbackError::Io(format!(
            "Import holds {} entries, maximum is {}",
            submissions.len(),
            MAX_IMPORT_ENTRIES
        )));
    }
    Ok(submissions)
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server with an empty store.
pub async fn cmd_server(config: ServerConfig) -> Result<(), CliError> {
    println!("Course Feedback Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:        {}", config.host);
    println!("  Port:        {}", config.port);
    println!("  Environment: {}", config.environment);
    println!(
        "  Rate limit:  {}",
        if config.rate_limit == 0 {
            "disabled".to_string()
        } else {
            format!("{} req/s", config.rate_limit)
        }
    );
    println!();
    println!("Endpoints:");
    for (route, description) in api::ROUTES {
        println!("  {:<27} - {}", route, description);
    }
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config, RecordStore::new()).await?;
    Ok(())
}

// =============================================================================
// SUBMIT / IMPORT
// =============================================================================

/// Check the form locally, then submit it.
pub async fn cmd_submit(
    client: &FeedbackClient,
    json_mode: bool,
    submission: Submission,
) -> Result<(), CliError> {
    let issues = check_form(&submission);
    if !issues.is_empty() {
        let summary = issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CliError::Form(summary));
    }

    let record = client.create(&submission).await?;
    tracing::debug!(id = %record.id, "Submitted feedback");

    if json_mode {
        print_json(&record);
    } else {
        println!("Feedback submitted successfully!");
        println!();
        print!("{}", render::feedback_card(&record, true));
    }
    Ok(())
}

/// Submit every entry of a JSON file, skipping ones the server would reject.
pub async fn cmd_import(
    client: &FeedbackClient,
    json_mode: bool,
    file: &Path,
) -> Result<(), CliError> {
    tracing::info!("Importing feedback from {:?}", file);
    let submissions = read_import_file(file)?;

    let mut created = Vec::new();
    let mut rejected = Vec::new();
    for (index, submission) in submissions.iter().enumerate() {
        if let Err(e) = ValidationGate::check(submission) {
            rejected.push(serde_json::json!({ "index": index, "error": e.to_string() }));
            continue;
        }
        match client.create(submission).await {
            Ok(record) => created.push(record.id),
            Err(e) if e.status().is_some() => {
                rejected.push(serde_json::json!({ "index": index, "error": e.to_string() }));
            }
            Err(e) => return Err(e.into()),
        }
    }

    if json_mode {
        print_json(&serde_json::json!({
            "file": file.to_string_lossy(),
            "created": created,
            "rejected": rejected,
        }));
        return Ok(());
    }

    println!("Import complete");
    println!("  Entries:  {}", submissions.len());
    println!("  Created:  {}", created.len());
    println!("  Rejected: {}", rejected.len());
    for entry in &rejected {
        println!(
            "    #{}: {}",
            entry["index"],
            entry["error"].as_str().unwrap_or_default()
        );
    }
    Ok(())
}

// =============================================================================
// READ COMMANDS
// =============================================================================

/// List feedback cards.
pub async fn cmd_list(
    client: &FeedbackClient,
    json_mode: bool,
    order: ListOrder,
) -> Result<(), CliError> {
    let records = client.list(order).await?;
    if json_mode {
        print_json(&records);
    } else {
        print!("{}", render::feedback_list(&records));
    }
    Ok(())
}

/// Show one feedback record.
pub async fn cmd_show(client: &FeedbackClient, json_mode: bool, id: u64) -> Result<(), CliError> {
    let record = client.get(FeedbackId(id)).await?;
    if json_mode {
        print_json(&record);
    } else {
        print!("{}", render::feedback_card(&record, true));
    }
    Ok(())
}

/// Show the stats dashboard.
pub async fn cmd_stats(client: &FeedbackClient, json_mode: bool) -> Result<(), CliError> {
    let stats = client.stats().await?;
    if json_mode {
        print_json(&stats);
    } else {
        print!("{}", render::dashboard(&stats));
    }
    Ok(())
}

/// Show the per-course breakdown.
pub async fn cmd_courses(client: &FeedbackClient, json_mode: bool) -> Result<(), CliError> {
    let courses = client.courses().await?;
    if json_mode {
        print_json(&courses);
    } else {
        print!("{}", render::course_table(&courses));
    }
    Ok(())
}

/// Check server liveness.
pub async fn cmd_health(client: &FeedbackClient, json_mode: bool) -> Result<(), CliError> {
    let health = client.health().await?;
    if json_mode {
        print_json(&health);
        return Ok(());
    }

    println!("Feedback Server Health");
    println!("======================");
    println!("Server:      {}", client.base_url());
    println!("Status:      {}", health.message);
    println!("Version:     {}", health.version);
    println!("Environment: {}", health.data.environment);
    println!("Feedback:    {}", health.data.total_feedback);
    Ok(())
}

// =============================================================================
// DELETE COMMAND
// =============================================================================

/// Delete a record, asking first unless `yes`.
pub async fn cmd_delete(
    client: &FeedbackClient,
    json_mode: bool,
    id: u64,
    yes: bool,
) -> Result<(), CliError> {
    if !yes {
        let prompt = format!("Are you sure you want to delete feedback #{}?", id);
        if !confirm(&prompt, &mut std::io::stdin().lock(), &mut std::io::stderr())? {
            eprintln!("Cancelled");
            return Ok(());
        }
    }

    let removed = client.delete(FeedbackId(id)).await?;
    if json_mode {
        print_json(&removed);
    } else {
        println!(
            "Deleted feedback #{} from {} ({})",
            removed.id, removed.student_name, removed.course_code
        );
    }
    Ok(())
}

/// Ask a yes/no question on `output`, reading the answer from `input`.
///
/// The prompt never goes to stdout, which stays reserved for command output.
fn confirm<R, W>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool, FeedbackError>
where
    R: std::io::BufRead,
    W: std::io::Write,
{
    write!(output, "{} [y/N] ", prompt).map_err(|e| FeedbackError::Io(e.to_string()))?;
    output.flush().map_err(|e| FeedbackError::Io(e.to_string()))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| FeedbackError::Io(e.to_string()))?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn import_file_parses_submissions() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[
                {{"studentName":"Ada","courseCode":"cs1","comments":"Good course","teachingQuality":4,"preparation":4,"support":4}},
                {{"studentName":"Bo","courseCode":"cs2","comments":"Fine","engagement":2,"resources":3,"satisfaction":1}}
            ]"#
        )
        .expect("write");

        let subs = read_import_file(file.path()).expect("read");
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].teaching_quality, Some(2));
    }

    #[test]
    fn import_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"studentName":"Ada"}}"#).expect("write");
        assert!(read_import_file(file.path()).is_err());
    }

    #[test]
    fn import_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(read_import_file(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn confirm_writes_prompt_to_given_writer() {
        let mut prompt_out = Vec::new();
        let accepted = confirm("Delete #3?", &mut "yes\n".as_bytes(), &mut prompt_out).expect("io");
        assert!(accepted);
        assert_eq!(String::from_utf8(prompt_out).expect("utf8"), "Delete #3? [y/N] ");
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut sink = Vec::new();
        assert!(!confirm("Delete?", &mut "\n".as_bytes(), &mut sink).expect("io"));
        assert!(!confirm("Delete?", &mut "nope\n".as_bytes(), &mut sink).expect("io"));
        assert!(confirm("Delete?", &mut " Y \n".as_bytes(), &mut sink).expect("io"));
    }

    #[test]
    fn import_rejects_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(read_import_file(dir.path()).is_err());
    }
}
