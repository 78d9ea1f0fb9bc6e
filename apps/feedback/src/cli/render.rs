//! # Terminal Rendering
//!
//! Pure string builders for the client commands: feedback cards, the stats
//! dashboard and the course table. Nothing here prints.

use chrono::{DateTime, Utc};
use feedback_core::{CourseSummary, FeedbackRecord, StatsSnapshot, Tenths};
use std::fmt::Write as _;

/// Width of a dashboard gauge, in cells.
const GAUGE_WIDTH: usize = 20;

/// Gauge scales: the value that fills a gauge completely.
const FEEDBACK_GAUGE_SCALE: u64 = 50;
const COURSES_GAUGE_SCALE: u64 = 20;
const WEEK_GAUGE_SCALE: u64 = 10;
/// 5.0 expressed in tenths.
const RATING_GAUGE_SCALE_TENTHS: u64 = 50;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// Five-star rendering of a 1-5 rating.
pub fn stars(rating: u8) -> String {
    (1..=5u8)
        .map(|i| if i <= rating { '★' } else { '☆' })
        .collect()
}

/// `Oct 19, 2026, 02:30 PM UTC`
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p UTC").to_string()
}

/// Share of `value` in `scale`, as a whole percentage capped at 100.
pub fn percent_of(value: u64, scale: u64) -> u8 {
    if scale == 0 {
        return 0;
    }
    value.saturating_mul(100).saturating_div(scale).min(100) as u8
}

/// A fixed-width bar filled to `percent`.
pub fn gauge(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * GAUGE_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(GAUGE_WIDTH - filled),
        percent
    )
}

// =============================================================================
// FEEDBACK CARDS
// =============================================================================

/// One feedback card. `detailed` adds the id line and category scores.
pub fn feedback_card(record: &FeedbackRecord, detailed: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", record.student_name, record.course_code);
    let _ = writeln!(out, "  {}", stars(record.rating));
    let _ = writeln!(out, "  {}", record.comments);
    let _ = writeln!(out, "  {}", format_timestamp(&record.created_at));
    if detailed {
        let _ = writeln!(out, "  Id:               {}", record.id);
        let _ = writeln!(out, "  Rating:           {}/5", record.rating);
        let _ = writeln!(
            out,
            "  Teaching quality: {}",
            record.scores.teaching_quality
        );
        let _ = writeln!(out, "  Preparation:      {}", record.scores.preparation);
        let _ = writeln!(out, "  Support:          {}", record.scores.support);
    } else {
        let _ = writeln!(out, "  #{}", record.id);
    }
    out
}

/// The full listing, or the empty-state message.
pub fn feedback_list(records: &[FeedbackRecord]) -> String {
    if records.is_empty() {
        return "No Feedback Submitted Yet\nBe the first to share your course experience!\n"
            .to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "All Feedback ({})", records.len());
    let _ = writeln!(out, "{}", "=".repeat(40));
    for record in records {
        out.push('\n');
        out.push_str(&feedback_card(record, false));
    }
    out
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// The stats dashboard: four gauges plus category averages.
pub fn dashboard(stats: &StatsSnapshot) -> String {
    let rating_percent = percent_of(
        u64::from(stats.average_rating.value()),
        RATING_GAUGE_SCALE_TENTHS,
    );

    let rows: [(&str, String, u8); 4] = [
        (
            "Total Feedback",
            stats.total_feedback.to_string(),
            percent_of(stats.total_feedback as u64, FEEDBACK_GAUGE_SCALE),
        ),
        (
            "Average Rating",
            format!("{}/5", stats.average_rating),
            rating_percent,
        ),
        (
            "Courses",
            stats.total_courses.to_string(),
            percent_of(stats.total_courses as u64, COURSES_GAUGE_SCALE),
        ),
        (
            "This Week",
            stats.recent_feedback.to_string(),
            percent_of(stats.recent_feedback as u64, WEEK_GAUGE_SCALE),
        ),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "Feedback Dashboard");
    let _ = writeln!(out, "==================");
    for (label, value, percent) in rows {
        let _ = writeln!(out, "{:<15} {:>7}  {}", label, value, gauge(percent));
    }
    out.push('\n');
    let _ = writeln!(out, "Category Averages");
    let averages = &stats.category_averages;
    for (label, value) in [
        ("Teaching quality", averages.teaching_quality),
        ("Preparation", averages.preparation),
        ("Support", averages.support),
    ] {
        let _ = writeln!(out, "  {:<17} {}", label, value);
    }
    out
}

// =============================================================================
// COURSE TABLE
// =============================================================================

/// Per-course table.
pub fn course_table(courses: &[CourseSummary]) -> String {
    if courses.is_empty() {
        return "No courses have feedback yet\n".to_string();
    }

    let width = courses
        .iter()
        .map(|c| c.course_code.chars().count())
        .max()
        .unwrap_or(0)
        .max("Course".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>8}  {:>7}", "Course", "Feedback", "Average");
    let _ = writeln!(out, "{}", "-".repeat(width + 19));
    for course in courses {
        let _ = writeln!(
            out,
            "{:<width$}  {:>8}  {:>7}",
            course.course_code,
            course.feedback_count,
            tenths_label(course.average_rating)
        );
    }
    out
}

fn tenths_label(value: Tenths) -> String {
    format!("{}/5", value)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use feedback_core::{CategoryAverages, CategoryScores, FeedbackId};

    fn record() -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId(7),
            student_name: "Ada".into(),
            course_code: "CS101".into(),
            comments: "Great pacing".into(),
            rating: 4,
            scores: CategoryScores {
                teaching_quality: 4,
                preparation: 5,
                support: 3,
            },
            created_at: DateTime::from_timestamp(1_792_420_200, 0).expect("valid"),
        }
    }

    #[test]
    fn stars_fill_to_rating() {
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(5), "★★★★★");
    }

    #[test]
    fn timestamp_format() {
        // 2026-10-19T14:30:00Z
        assert_eq!(
            format_timestamp(&record().created_at),
            "Oct 19, 2026, 02:30 PM UTC"
        );
    }

    #[test]
    fn percent_capped() {
        assert_eq!(percent_of(25, 50), 50);
        assert_eq!(percent_of(500, 50), 100);
        assert_eq!(percent_of(3, 0), 0);
    }

    #[test]
    fn gauge_width_fixed() {
        let empty = gauge(0);
        let full = gauge(100);
        assert_eq!(empty.chars().count(), full.chars().count());
        assert!(full.contains(&"█".repeat(GAUGE_WIDTH)));
    }

    #[test]
    fn card_contains_fields() {
        let card = feedback_card(&record(), true);
        assert!(card.contains("Ada  [CS101]"));
        assert!(card.contains("★★★★☆"));
        assert!(card.contains("Preparation:      5"));
        assert!(card.contains("Id:               7"));
    }

    #[test]
    fn empty_list_message() {
        assert!(feedback_list(&[]).starts_with("No Feedback Submitted Yet"));
    }

    #[test]
    fn dashboard_shows_rating_out_of_five() {
        let stats = StatsSnapshot {
            total_feedback: 3,
            average_rating: Tenths(30),
            total_courses: 1,
            recent_feedback: 3,
            category_averages: CategoryAverages {
                teaching_quality: Tenths(30),
                preparation: Tenths(33),
                support: Tenths(27),
            },
        };
        let text = dashboard(&stats);
        assert!(text.contains("3.0/5"));
        // 3.0 of 5 fills 60%
        assert!(text.contains(" 60%"));
        assert!(text.contains("Preparation       3.3"));
    }

    #[test]
    fn course_table_rows() {
        let table = course_table(&[CourseSummary {
            course_code: "MA201".into(),
            feedback_count: 2,
            average_rating: Tenths(45),
        }]);
        assert!(table.contains("MA201"));
        assert!(table.contains("4.5/5"));
    }
}
