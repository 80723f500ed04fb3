//! Derived-metric helpers
//!
//! Pure functions for the analytic fields attached to channel and video
//! records: duration parsing, view velocity, and age computations.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Average month length used for channel age, in days
const DAYS_PER_MONTH: f64 = 30.44;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap())
}

/// Parses an ISO-8601 video duration (`PT#H#M#S`) into minutes
///
/// Any component may be absent; an empty or unrecognized string parses to 0.
/// The result is rounded to 2 decimals.
///
/// # Example
/// ```
/// use ytresearch_core::metrics::duration_to_minutes;
/// assert_eq!(duration_to_minutes("PT1H2M3S"), 62.05);
/// assert_eq!(duration_to_minutes("PT45S"), 0.75);
/// assert_eq!(duration_to_minutes(""), 0.0);
/// ```
pub fn duration_to_minutes(duration: &str) -> f64 {
    let Some(captures) = duration_pattern().captures(duration) else {
        return 0.0;
    };

    let component = |i: usize| -> f64 {
        captures
            .get(i)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    let hours = component(1);
    let minutes = component(2);
    let seconds = component(3);

    round2(hours * 60.0 + minutes + seconds / 60.0)
}

/// Rounds to 2 decimal places
///
/// # Example
/// ```
/// use ytresearch_core::metrics::round2;
/// assert_eq!(round2(50.005), 50.01);
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Views per hour since publication, rounded to 2 decimals
///
/// Returns 0 when the elapsed time is zero or negative, so a freshly
/// published (or clock-skewed) video never divides by zero.
///
/// # Example
/// ```
/// use ytresearch_core::metrics::views_per_hour;
/// assert_eq!(views_per_hour(500, 10.0), 50.0);
/// assert_eq!(views_per_hour(500, 0.0), 0.0);
/// assert_eq!(views_per_hour(500, -2.0), 0.0);
/// ```
pub fn views_per_hour(views: u64, hours_since_published: f64) -> f64 {
    if hours_since_published > 0.0 {
        round2(views as f64 / hours_since_published)
    } else {
        0.0
    }
}

/// Lifetime views per subscriber, rounded to 2 decimals
///
/// Returns 0 for channels with no (or hidden) subscriber count.
///
/// # Example
/// ```
/// use ytresearch_core::metrics::views_per_subscriber;
/// assert_eq!(views_per_subscriber(1_000_000, 5000), 200.0);
/// assert_eq!(views_per_subscriber(1_000_000, 0), 0.0);
/// ```
pub fn views_per_subscriber(total_views: u64, subscribers: u64) -> f64 {
    if subscribers > 0 {
        round2(total_views as f64 / subscribers as f64)
    } else {
        0.0
    }
}

/// Hours elapsed since `published`, clamped to be non-negative
pub fn hours_since(published: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (now - published).num_milliseconds() as f64 / 3_600_000.0;
    hours.max(0.0)
}

/// Whole days elapsed since `published` (floor), clamped to be non-negative
pub fn age_in_days(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published).num_days().max(0)
}

/// Elapsed time in average (30.44-day) months, rounded to the nearest whole
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use ytresearch_core::metrics::age_in_months;
/// let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(age_in_months(created, now), 12);
/// ```
pub fn age_in_months(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - published).num_milliseconds().max(0) as f64;
    let month_ms = DAYS_PER_MONTH * 24.0 * 3600.0 * 1000.0;
    (elapsed_ms / month_ms).round() as i64
}
