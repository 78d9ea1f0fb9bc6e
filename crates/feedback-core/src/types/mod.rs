//! # Core Type Definitions
//!
//! - Record identifiers (`FeedbackId`)
//! - The stored record (`FeedbackRecord`) and its category scores
//! - Field names used in validation reports (`Field`)
//! - Fixed-point one-decimal values (`Tenths`)
//! - Error types (`FeedbackError`)
//!
//! ## Wire Format
//!
//! Every type here serializes with camelCase keys, which is the shape the
//! HTTP API and the browser client exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a feedback record.
///
/// Assigned by the record store, starting at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackId(pub u64);

impl FeedbackId {
    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// FIELDS
// =============================================================================

/// A submitted field, named the way callers spell it on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    StudentName,
    CourseCode,
    Comments,
    TeachingQuality,
    Preparation,
    Support,
}

impl Field {
    /// The camelCase wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::StudentName => "studentName",
            Field::CourseCode => "courseCode",
            Field::Comments => "comments",
            Field::TeachingQuality => "teachingQuality",
            Field::Preparation => "preparation",
            Field::Support => "support",
        }
    }

    /// Whether this field is one of the three category ratings.
    #[must_use]
    pub const fn is_rating(self) -> bool {
        matches!(
            self,
            Field::TeachingQuality | Field::Preparation | Field::Support
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CATEGORY SCORES
// =============================================================================

/// The three 1-5 category scores of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub teaching_quality: u8,
    pub preparation: u8,
    pub support: u8,
}

impl CategoryScores {
    /// Sum of the three scores.
    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.teaching_quality as u64 + self.preparation as u64 + self.support as u64
    }
}

// =============================================================================
// FEEDBACK RECORD
// =============================================================================

/// One stored feedback entry.
///
/// Records are never mutated after creation. `rating` is frozen at write time
/// as the round-half-up mean of `scores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub student_name: String,
    pub course_code: String,
    pub comments: String,
    pub rating: u8,
    #[serde(flatten)]
    pub scores: CategoryScores,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// TENTHS
// =============================================================================

/// A non-negative value with exactly one decimal place, held as an integer
/// count of tenths (`Tenths(35)` is 3.5).
///
/// Serializes as a JSON number (`3.5`), so the wire shape matches a plain
/// one-decimal float while the arithmetic stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(pub u32);

impl Tenths {
    pub const ZERO: Tenths = Tenths(0);

    /// Round-half-up `sum / count` to one decimal place.
    ///
    /// An empty set (`count == 0`) yields zero.
    #[must_use]
    pub const fn mean(sum: u64, count: u64) -> Self {
        let tenths = crate::primitives::div_round_half_up(sum.saturating_mul(10), count);
        if tenths > u32::MAX as u64 {
            Tenths(u32::MAX)
        } else {
            Tenths(tenths as u32)
        }
    }

    /// Raw tenths count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Integer part.
    #[must_use]
    pub const fn whole(self) -> u32 {
        self.0 / 10
    }

    /// The single decimal digit.
    #[must_use]
    pub const fn fraction(self) -> u32 {
        self.0 % 10
    }

    /// Render as a JSON-compatible float.
    #[allow(clippy::float_arithmetic)]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Parse from a float, rounding to the nearest tenth.
    ///
    /// Returns `None` for negative, non-finite or out-of-range inputs.
    #[allow(clippy::float_arithmetic)]
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let scaled = (value * 10.0).round();
        if scaled > f64::from(u32::MAX) {
            return None;
        }
        Some(Tenths(scaled as u32))
    }
}

impl std::fmt::Display for Tenths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.whole(), self.fraction())
    }
}

impl Serialize for Tenths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Tenths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Tenths::from_f64(raw).ok_or_else(|| {
            serde::de::Error::custom(format!("expected a non-negative decimal, got {raw}"))
        })
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the feedback system.
///
/// Three families:
/// - validation (`MissingField`, `RatingOutOfRange`, `FieldTooLong`, `UnknownOrder`):
///   bad input, reported back to the caller
/// - `NotFound`: unknown identifier
/// - internal (`Internal`, `Io`): unexpected failures, reported generically
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    /// A required field is absent or blank after trimming.
    #[error("Missing required field: {0}")]
    MissingField(Field),

    /// A category rating is outside the accepted range.
    #[error("Rating for {field} must be between 1 and 5, got {value}")]
    RatingOutOfRange { field: Field, value: i64 },

    /// A text field exceeds its length ceiling.
    #[error("Field {field} exceeds maximum length of {max} characters")]
    FieldTooLong { field: Field, max: usize },

    /// A listing order name was not recognised.
    #[error("Unknown order '{0}' (expected 'latest' or 'oldest')")]
    UnknownOrder(String),

    /// No record carries the requested identifier.
    #[error("Feedback not found: {0}")]
    NotFound(FeedbackId),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),

    /// An I/O error occurred (binding, reading configuration or input files).
    #[error("I/O error: {0}")]
    Io(String),
}

impl FeedbackError {
    /// Whether this error is caused by caller input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            FeedbackError::MissingField(_)
                | FeedbackError::RatingOutOfRange { .. }
                | FeedbackError::FieldTooLong { .. }
                | FeedbackError::UnknownOrder(_)
        )
    }

    /// Whether this error reports an unknown identifier.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, FeedbackError::NotFound(_))
    }

    /// The field that failed validation, if any.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            FeedbackError::MissingField(field)
            | FeedbackError::RatingOutOfRange { field, .. }
            | FeedbackError::FieldTooLong { field, .. } => Some(*field),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenths_mean_rounds_half_up() {
        // 1.25 -> 1.3
        assert_eq!(Tenths::mean(5, 4), Tenths(13));
        // 3.0
        assert_eq!(Tenths::mean(9, 3), Tenths(30));
        // 4.666.. -> 4.7
        assert_eq!(Tenths::mean(14, 3), Tenths(47));
    }

    #[test]
    fn tenths_mean_of_empty_is_zero() {
        assert_eq!(Tenths::mean(0, 0), Tenths::ZERO);
        assert_eq!(Tenths::mean(17, 0), Tenths::ZERO);
    }

    #[test]
    fn tenths_display() {
        assert_eq!(Tenths(30).to_string(), "3.0");
        assert_eq!(Tenths(47).to_string(), "4.7");
        assert_eq!(Tenths(0).to_string(), "0.0");
    }

    #[test]
    fn tenths_serializes_as_number() {
        let json = serde_json::to_string(&Tenths(35)).expect("serialize");
        assert_eq!(json, "3.5");
        let back: Tenths = serde_json::from_str("3.5").expect("deserialize");
        assert_eq!(back, Tenths(35));
    }

    #[test]
    fn tenths_rejects_negative() {
        assert!(serde_json::from_str::<Tenths>("-1.0").is_err());
    }

    #[test]
    fn error_classification() {
        assert!(FeedbackError::MissingField(Field::Comments).is_validation());
        assert!(
            FeedbackError::RatingOutOfRange {
                field: Field::Support,
                value: 9
            }
            .is_validation()
        );
        assert!(FeedbackError::NotFound(FeedbackId(3)).is_not_found());
        assert!(!FeedbackError::Internal("x".into()).is_validation());
        assert_eq!(
            FeedbackError::MissingField(Field::CourseCode).field(),
            Some(Field::CourseCode)
        );
        assert_eq!(FeedbackError::NotFound(FeedbackId(1)).field(), None);
    }

    #[test]
    fn record_serializes_camel_case_flat() {
        let record = FeedbackRecord {
            id: FeedbackId(1),
            student_name: "Ada".into(),
            course_code: "CS101".into(),
            comments: "Great pacing".into(),
            rating: 4,
            scores: CategoryScores {
                teaching_quality: 4,
                preparation: 5,
                support: 3,
            },
            created_at: DateTime::from_timestamp(0, 0).expect("epoch"),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["studentName"], "Ada");
        assert_eq!(json["courseCode"], "CS101");
        assert_eq!(json["teachingQuality"], 4);
        assert_eq!(json["support"], 3);
        assert!(json.get("scores").is_none());
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }
}
