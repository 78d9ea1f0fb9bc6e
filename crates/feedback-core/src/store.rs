//! # Record Store
//!
//! Ordered, in-process collection of feedback records.
//!
//! - Insertion order is preserved by [`RecordStore::all`]
//! - Identifiers start at 1 and are never reused, even after deletion
//! - The store is volatile: nothing survives the process
//!
//! The store is plain owned data with no interior locking. Callers that
//! share it across tasks wrap it in a lock and hold one guard per operation,
//! so an aggregation never observes a half-applied mutation.

use crate::validation::NewFeedback;
use crate::{FeedbackError, FeedbackId, FeedbackRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// LIST ORDER
// =============================================================================

/// Ordering applied by [`RecordStore::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    /// Newest `created_at` first; ties broken by higher id first.
    #[default]
    Latest,
    /// Oldest `created_at` first; ties broken by lower id first.
    Oldest,
}

impl ListOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ListOrder::Latest => "latest",
            ListOrder::Oldest => "oldest",
        }
    }
}

impl FromStr for ListOrder {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" | "newest" => Ok(ListOrder::Latest),
            "oldest" => Ok(ListOrder::Oldest),
            other => Err(FeedbackError::UnknownOrder(other.to_string())),
        }
    }
}

impl std::fmt::Display for ListOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RECORD STORE
// =============================================================================

/// In-memory record store.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<FeedbackRecord>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated payload stamped with the current time.
    pub fn insert(&mut self, payload: NewFeedback) -> Result<&FeedbackRecord, FeedbackError> {
        self.insert_at(payload, Utc::now())
    }

    /// Append a validated payload with an explicit creation time.
    ///
    /// Fails only if the identifier space is exhausted; ids are never
    /// recycled.
    pub fn insert_at(
        &mut self,
        payload: NewFeedback,
        created_at: DateTime<Utc>,
    ) -> Result<&FeedbackRecord, FeedbackError> {
        let id = FeedbackId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| FeedbackError::Internal("feedback id space exhausted".to_string()))?;

        let (student_name, course_code, comments, scores, rating) = payload.into_parts();
        let index = self.records.len();
        self.records.push(FeedbackRecord {
            id,
            student_name,
            course_code,
            comments,
            rating,
            scores,
            created_at,
        });
        Ok(&self.records[index])
    }

    /// Look up a record by id.
    pub fn find_by_id(&self, id: FeedbackId) -> Result<&FeedbackRecord, FeedbackError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(FeedbackError::NotFound(id))
    }

    /// Remove a record by id, returning it.
    ///
    /// An unknown id leaves the store untouched.
    pub fn delete_by_id(&mut self, id: FeedbackId) -> Result<FeedbackRecord, FeedbackError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(FeedbackError::NotFound(id))?;
        Ok(self.records.remove(index))
    }

    /// All records in insertion order.
    #[must_use]
    pub fn all(&self) -> &[FeedbackRecord] {
        &self.records
    }

    /// All records sorted by creation time.
    #[must_use]
    pub fn list(&self, order: ListOrder) -> Vec<&FeedbackRecord> {
        let mut out: Vec<&FeedbackRecord> = self.records.iter().collect();
        match order {
            ListOrder::Latest => {
                out.sort_by_key(|r| std::cmp::Reverse((r.created_at, r.id)));
            }
            ListOrder::Oldest => {
                out.sort_by_key(|r| (r.created_at, r.id));
            }
        }
        out
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
