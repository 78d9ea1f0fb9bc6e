//! # feedback-core
//!
//! The logic behind the course feedback service.
//!
//! ```text
//! Submission ──► ValidationGate ──► RecordStore ──► StatsSnapshot / course_breakdown
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging dependency: the app layer owns those
//! - No interior locking: the store is plain data and the caller decides how
//!   to share it
//! - Integer arithmetic only; one-decimal averages are [`Tenths`]
//! - Time is an input: aggregation takes `now` explicitly

// =============================================================================
// MODULES
// =============================================================================

pub mod primitives;
pub mod stats;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use types::{CategoryScores, FeedbackError, FeedbackId, FeedbackRecord, Field, Tenths};

pub use stats::{CategoryAverages, CourseSummary, StatsSnapshot, course_breakdown};
pub use store::{ListOrder, RecordStore};
pub use validation::{NewFeedback, Submission, ValidationGate, overall_rating};
