use chrono::{Duration as ChronoDuration, NaiveDate};

const ISO: &str = "%Y-%m-%d";

fn parse_iso(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO).ok()
}

/// Range end for a week view starting at `start` (start + 6 days).
pub fn week_end(start: &str) -> Option<String> {
    parse_iso(start).map(|d| (d + ChronoDuration::days(6)).format(ISO).to_string())
}

/// Consecutive ISO dates from `start` through `end`, capped at `max_days`.
/// Empty when either bound fails to parse or `end` precedes `start`.
pub fn week_days(start: &str, end: &str, max_days: usize) -> Vec<String> {
    let (Some(first), Some(last)) = (parse_iso(start), parse_iso(end)) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .take(max_days)
        .map(|d| d.format(ISO).to_string())
        .collect()
}
