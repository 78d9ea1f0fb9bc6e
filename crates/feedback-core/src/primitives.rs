//! # Primitives
//!
//! Fixed bounds and the integer rounding rule shared by the validation gate,
//! the record store and the aggregation engine.
//!
//! These are compiled in and immutable at runtime.

/// Lowest accepted category score.
pub const MIN_RATING: i64 = 1;

/// Highest accepted category score.
pub const MAX_RATING: i64 = 5;

/// Number of category scores that make up a record's overall rating.
pub const CATEGORY_COUNT: u64 = 3;

/// Width of the "recent feedback" window, in days.
///
/// A record counts as recent only when its `created_at` is strictly after
/// `now - RECENT_WINDOW_DAYS`.
pub const RECENT_WINDOW_DAYS: i64 = 7;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length (in characters, after trimming) of a student name.
pub const MAX_STUDENT_NAME_LENGTH: usize = 200;

/// Maximum length (in characters, after trimming) of a course code.
pub const MAX_COURSE_CODE_LENGTH: usize = 32;

/// Maximum length (in characters, after trimming) of the comments field.
pub const MAX_COMMENTS_LENGTH: usize = 5000;

// =============================================================================
// ROUNDING
// =============================================================================

/// Divide `numerator` by `denominator`, rounding halves up.
///
/// Returns 0 when `denominator` is 0 so that empty aggregates collapse to
/// zero instead of failing.
#[must_use]
pub const fn div_round_half_up(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    // floor((2n + d) / 2d) == floor(n/d + 1/2)
    numerator
        .saturating_mul(2)
        .saturating_add(denominator)
        .saturating_div(denominator.saturating_mul(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_one_to_five() {
        assert_eq!(MIN_RATING, 1);
        assert_eq!(MAX_RATING, 5);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(div_round_half_up(5, 2), 3); // 2.5
        assert_eq!(div_round_half_up(7, 2), 4); // 3.5
        assert_eq!(div_round_half_up(4, 3), 1); // 1.33
        assert_eq!(div_round_half_up(5, 3), 2); // 1.67
        assert_eq!(div_round_half_up(9, 3), 3);
    }

    #[test]
    fn rounding_by_zero_is_zero() {
        assert_eq!(div_round_half_up(42, 0), 0);
    }
}
