//! # Property-Based Tests
//!
//! Invariants of the validation gate, the record store and the aggregation
//! engine, checked with proptest.

use chrono::{DateTime, Duration, Utc};
use feedback_core::{
    FeedbackError, FeedbackId, Field, RecordStore, StatsSnapshot, Submission, Tenths, ValidationGate,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_760_000_000, 0).expect("valid timestamp")
}

fn submission(course: &str, scores: (i64, i64, i64)) -> Submission {
    Submission::new("Student", course, "Comments", scores.0, scores.1, scores.2)
}

fn score() -> impl Strategy<Value = i64> {
    1i64..=5
}

proptest! {
    /// The stored rating is the round-half-up mean of the three scores.
    #[test]
    fn rating_is_rounded_mean(a in score(), b in score(), c in score()) {
        let payload = ValidationGate::check(&submission("CS1", (a, b, c))).expect("valid");

        // Sums of three integers never land on .5, so plain nearest rounding applies.
        let sum = a + b + c;
        let expected = (sum + 1) / 3;
        prop_assert_eq!(i64::from(payload.rating()), expected);
        prop_assert!((1..=5).contains(&payload.rating()));
    }

    /// Any score outside 1..=5 is rejected for that field.
    #[test]
    fn out_of_range_scores_rejected(bad in prop_oneof![i64::MIN..1i64, 6i64..i64::MAX]) {
        let result = ValidationGate::check(&submission("CS1", (3, bad, 3)));
        prop_assert_eq!(
            result,
            Err(FeedbackError::RatingOutOfRange { field: Field::Preparation, value: bad })
        );
    }

    /// totalCourses counts distinct course codes regardless of input case.
    #[test]
    fn total_courses_is_case_insensitive(codes in vec("[a-dA-D]{1,3}", 1..30)) {
        let mut store = RecordStore::new();
        for code in &codes {
            let payload = ValidationGate::check(&submission(code, (3, 3, 3))).expect("valid");
            store.insert_at(payload, fixed_now()).expect("insert");
        }

        let distinct: BTreeSet<String> = codes.iter().map(|c| c.to_uppercase()).collect();
        let stats = StatsSnapshot::from_store(&store, fixed_now());
        prop_assert_eq!(stats.total_courses, distinct.len());
        prop_assert_eq!(stats.total_feedback, codes.len());
    }

    /// Averages stay within the rating bounds.
    #[test]
    fn averages_within_bounds(entries in vec((score(), score(), score()), 1..50)) {
        let mut store = RecordStore::new();
        for scores in &entries {
            let payload = ValidationGate::check(&submission("CS1", *scores)).expect("valid");
            store.insert_at(payload, fixed_now()).expect("insert");
        }

        let stats = StatsSnapshot::from_store(&store, fixed_now());
        for avg in [
            stats.average_rating,
            stats.category_averages.teaching_quality,
            stats.category_averages.preparation,
            stats.category_averages.support,
        ] {
            prop_assert!(avg >= Tenths(10) && avg <= Tenths(50));
        }
    }

    /// Only records strictly newer than now - 7 days are recent.
    #[test]
    fn recent_counts_strict_window(ages_secs in vec(0i64..(14 * 86_400), 0..40)) {
        let now = fixed_now();
        let mut store = RecordStore::new();
        for age in &ages_secs {
            let payload = ValidationGate::check(&submission("CS1", (2, 2, 2))).expect("valid");
            store.insert_at(payload, now - Duration::seconds(*age)).expect("insert");
        }

        let expected = ages_secs.iter().filter(|&&age| age < 7 * 86_400).count();
        prop_assert_eq!(StatsSnapshot::from_store(&store, now).recent_feedback, expected);
    }

    /// Deleting an id that was never issued leaves the store unchanged.
    #[test]
    fn delete_unknown_is_noop(count in 0usize..20, probe in 1000u64..2000) {
        let mut store = RecordStore::new();
        for _ in 0..count {
            let payload = ValidationGate::check(&submission("CS1", (4, 4, 4))).expect("valid");
            store.insert_at(payload, fixed_now()).expect("insert");
        }
        let before = store.all().to_vec();

        let result = store.delete_by_id(FeedbackId(probe));
        prop_assert_eq!(result, Err(FeedbackError::NotFound(FeedbackId(probe))));
        prop_assert_eq!(store.all(), before.as_slice());
    }

    /// Ids are strictly increasing across inserts and deletes.
    #[test]
    fn ids_strictly_increase(ops in vec(any::<bool>(), 1..60)) {
        let mut store = RecordStore::new();
        let mut last = 0u64;
        for insert in ops {
            if insert || store.is_empty() {
                let payload = ValidationGate::check(&submission("CS1", (1, 2, 3))).expect("valid");
                let id = store.insert_at(payload, fixed_now()).expect("insert").id.value();
                prop_assert!(id > last);
                last = id;
            } else {
                let first = store.all()[0].id;
                store.delete_by_id(first).expect("delete");
            }
        }
    }
}
