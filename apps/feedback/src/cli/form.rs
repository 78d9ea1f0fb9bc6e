//! # Submission Form Checks
//!
//! Client-side checks run by `feedback submit` before anything is sent.
//! They are stricter than the server's validation gate (minimum lengths)
//! and report every problem at once, the way a form does.

use feedback_core::{Field, Submission};

const MIN_NAME_CHARS: usize = 2;
const MIN_COURSE_CHARS: usize = 2;
const MIN_COMMENT_CHARS: usize = 10;

/// One problem with a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormIssue {
    pub field: Field,
    pub message: &'static str,
}

/// Check a submission; an empty result means it may be sent.
pub fn check_form(submission: &Submission) -> Vec<FormIssue> {
    let mut issues = Vec::new();

    text_issue(
        &mut issues,
        submission.student_name.as_deref(),
        Field::StudentName,
        MIN_NAME_CHARS,
        "Student name is required",
        "Name must be at least 2 characters",
    );
    text_issue(
        &mut issues,
        submission.course_code.as_deref(),
        Field::CourseCode,
        MIN_COURSE_CHARS,
        "Course code is required",
        "Course code must be at least 2 characters",
    );
    text_issue(
        &mut issues,
        submission.comments.as_deref(),
        Field::Comments,
        MIN_COMMENT_CHARS,
        "Comments are required",
        "Comments must be at least 10 characters",
    );

    for (value, field, message) in [
        (
            submission.teaching_quality,
            Field::TeachingQuality,
            "Please rate teaching quality",
        ),
        (
            submission.preparation,
            Field::Preparation,
            "Please rate course preparation",
        ),
        (submission.support, Field::Support, "Please rate student support"),
    ] {
        if value.is_none_or(|v| v < 1) {
            issues.push(FormIssue { field, message });
        }
    }

    issues
}

fn text_issue(
    issues: &mut Vec<FormIssue>,
    value: Option<&str>,
    field: Field,
    min_chars: usize,
    missing: &'static str,
    too_short: &'static str,
) {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        issues.push(FormIssue {
            field,
            message: missing,
        });
    } else if trimmed.chars().count() < min_chars {
        issues.push(FormIssue {
            field,
            message: too_short,
        });
    }
}
