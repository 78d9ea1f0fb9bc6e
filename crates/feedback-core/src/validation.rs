//! # Validation Gate
//!
//! Turns a raw [`Submission`] into a normalized [`NewFeedback`] payload, or
//! rejects it with the first failing field.
//!
//! - Text fields are trimmed; blank means missing
//! - The course code is uppercased
//! - All three ratings must be present and within 1..=5
//! - The overall rating is the round-half-up mean of the three
//!
//! Acceptance is all-or-nothing: no partially normalized payload escapes.

use crate::primitives::{
    CATEGORY_COUNT, MAX_COMMENTS_LENGTH, MAX_COURSE_CODE_LENGTH, MAX_RATING,
    MAX_STUDENT_NAME_LENGTH, MIN_RATING, div_round_half_up,
};
use crate::{CategoryScores, FeedbackError, Field};
use serde::{Deserialize, Serialize};

/// Raw fields as submitted by a caller.
///
/// Everything is optional so that absence is reported as a validation
/// failure for the specific field rather than a decoding error. The rating
/// fields also accept the browser form's names (`engagement`, `resources`,
/// `satisfaction`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, alias = "engagement")]
    pub teaching_quality: Option<i64>,
    #[serde(default, alias = "resources")]
    pub preparation: Option<i64>,
    #[serde(default, alias = "satisfaction")]
    pub support: Option<i64>,
}

impl Submission {
    /// Build a complete submission.
    #[must_use]
    pub fn new(
        student_name: impl Into<String>,
        course_code: impl Into<String>,
        comments: impl Into<String>,
        teaching_quality: i64,
        preparation: i64,
        support: i64,
    ) -> Self {
        Self {
            student_name: Some(student_name.into()),
            course_code: Some(course_code.into()),
            comments: Some(comments.into()),
            teaching_quality: Some(teaching_quality),
            preparation: Some(preparation),
            support: Some(support),
        }
    }
}

/// A validated, normalized payload ready for the record store.
///
/// Only [`ValidationGate::check`] can construct one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    student_name: String,
    course_code: String,
    comments: String,
    scores: CategoryScores,
    rating: u8,
}

impl NewFeedback {
    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn course_code(&self) -> &str {
        &self.course_code
    }

    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    #[must_use]
    pub const fn scores(&self) -> CategoryScores {
        self.scores
    }

    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    /// Split into owned parts for the store.
    pub(crate) fn into_parts(self) -> (String, String, String, CategoryScores, u8) {
        (
            self.student_name,
            self.course_code,
            self.comments,
            self.scores,
            self.rating,
        )
    }
}

/// The validation gate.
pub struct ValidationGate;

impl ValidationGate {
    /// Validate and normalize a submission.
    ///
    /// Fields are checked in the order studentName, courseCode, comments,
    /// teachingQuality, preparation, support; the first failure is returned.
    pub fn check(submission: &Submission) -> Result<NewFeedback, FeedbackError> {
        let student_name = required_text(
            submission.student_name.as_deref(),
            Field::StudentName,
            MAX_STUDENT_NAME_LENGTH,
        )?;
        let course_code = required_text(
            submission.course_code.as_deref(),
            Field::CourseCode,
            MAX_COURSE_CODE_LENGTH,
        )?
        .to_uppercase();
        let comments = required_text(
            submission.comments.as_deref(),
            Field::Comments,
            MAX_COMMENTS_LENGTH,
        )?;

        let scores = CategoryScores {
            teaching_quality: required_rating(submission.teaching_quality, Field::TeachingQuality)?,
            preparation: required_rating(submission.preparation, Field::Preparation)?,
            support: required_rating(submission.support, Field::Support)?,
        };

        Ok(NewFeedback {
            student_name,
            course_code,
            comments,
            rating: overall_rating(&scores),
            scores,
        })
    }
}

/// Round-half-up mean of the three category scores.
#[must_use]
pub fn overall_rating(scores: &CategoryScores) -> u8 {
    // Bounded by MAX_RATING because every score is.
    div_round_half_up(scores.sum(), CATEGORY_COUNT) as u8
}

fn required_text(raw: Option<&str>, field: Field, max: usize) -> Result<String, FeedbackError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(FeedbackError::MissingField(field));
    }
    if trimmed.chars().count() > max {
        return Err(FeedbackError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_string())
}

fn required_rating(raw: Option<i64>, field: Field) -> Result<u8, FeedbackError> {
    let value = raw.ok_or(FeedbackError::MissingField(field))?;
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(FeedbackError::RatingOutOfRange { field, value });
    }
    Ok(value as u8)
}

// =============================================================================
// TESTS
// =============================================================================
