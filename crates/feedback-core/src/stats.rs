//! # Aggregation Engine
//!
//! Derives the dashboard statistics from a slice of records.
//!
//! Every function here is a pure function of its inputs: no caching, no
//! incremental state, and the current time is passed in by the caller.
//! Averages are exact fixed-point [`Tenths`], rounded half-up.
//!
//! | Field | Definition |
//! |-------|------------|
//! | `total_feedback` | number of records |
//! | `average_rating` | mean of per-record `rating`, one decimal |
//! | `total_courses` | distinct course codes |
//! | `recent_feedback` | records created strictly after `now - 7 days` |
//! | `category_averages` | mean of each category score, one decimal |

use crate::primitives::RECENT_WINDOW_DAYS;
use crate::{FeedbackRecord, RecordStore, Tenths};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Per-category means across all records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAverages {
    pub teaching_quality: Tenths,
    pub preparation: Tenths,
    pub support: Tenths,
}

/// Statistics computed over the whole record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_feedback: usize,
    pub average_rating: Tenths,
    pub total_courses: usize,
    pub recent_feedback: usize,
    pub category_averages: CategoryAverages,
}

impl StatsSnapshot {
    /// Compute the snapshot for `records` as seen at `now`.
    ///
    /// An empty slice yields the all-zero snapshot.
    #[must_use]
    pub fn compute(records: &[FeedbackRecord], now: DateTime<Utc>) -> Self {
        let count = records.len() as u64;
        let window_start = now - Duration::days(RECENT_WINDOW_DAYS);

        let mut rating_sum = 0u64;
        let mut teaching_sum = 0u64;
        let mut preparation_sum = 0u64;
        let mut support_sum = 0u64;
        let mut recent = 0usize;
        let mut courses: BTreeSet<&str> = BTreeSet::new();

        for record in records {
            rating_sum += u64::from(record.rating);
            teaching_sum += u64::from(record.scores.teaching_quality);
            preparation_sum += u64::from(record.scores.preparation);
            support_sum += u64::from(record.scores.support);
            if record.created_at > window_start {
                recent += 1;
            }
            courses.insert(record.course_code.as_str());
        }

        Self {
            total_feedback: records.len(),
            average_rating: Tenths::mean(rating_sum, count),
            total_courses: courses.len(),
            recent_feedback: recent,
            category_averages: CategoryAverages {
                teaching_quality: Tenths::mean(teaching_sum, count),
                preparation: Tenths::mean(preparation_sum, count),
                support: Tenths::mean(support_sum, count),
            },
        }
    }

    /// Compute the snapshot over the full contents of a store.
    #[must_use]
    pub fn from_store(store: &RecordStore, now: DateTime<Utc>) -> Self {
        Self::compute(store.all(), now)
    }
}

// =============================================================================
// COURSE BREAKDOWN
// =============================================================================

/// Feedback summary for a single course code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub course_code: String,
    pub feedback_count: usize,
    pub average_rating: Tenths,
}

/// Group records by course code, ascending by code.
#[must_use]
pub fn course_breakdown(records: &[FeedbackRecord]) -> Vec<CourseSummary> {
    // code -> (count, rating sum)
    let mut groups: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.course_code.as_str()).or_default();
        entry.0 += 1;
        entry.1 += u64::from(record.rating);
    }

    groups
        .into_iter()
        .map(|(code, (count, sum))| CourseSummary {
            course_code: code.to_string(),
            feedback_count: count,
            average_rating: Tenths::mean(sum, count as u64),
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
