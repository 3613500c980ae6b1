use super::slots::SLOTS;

/// Minutes since midnight for an `HH:MM[:SS]` string.
///
/// Only the first five characters are read. Anything that does not yield two
/// numeric fields parses to 0; the week view tolerates bad rows rather than
/// rejecting them.
pub fn parse_minutes(text: &str) -> i32 {
    let head: String = text.chars().take(5).collect();
    let mut parts = head.split(':');
    let (Some(hh), Some(mm)) = (parts.next(), parts.next()) else {
        return 0;
    };
    match (numeric_field(hh), numeric_field(mm)) {
        (Some(h), Some(m)) => h.saturating_mul(60).saturating_add(m),
        _ => 0,
    }
}

fn numeric_field(raw: &str) -> Option<i32> {
    let t = raw.trim();
    if t.is_empty() {
        return Some(0);
    }
    t.parse::<i32>().ok()
}

/// Slot index for a lesson start time. Always in `0..SLOTS.len()`.
pub fn match_slot(start_time: &str) -> usize {
    let t = parse_minutes(start_time);
    if let Some(found) = SLOTS.iter().find(|s| s.contains(t)) {
        return found.index;
    }
    let mut best = 0;
    let mut best_diff = i64::MAX;
    for s in SLOTS.iter() {
        let diff = (i64::from(t) - i64::from(s.start_minutes)).abs();
        if diff < best_diff {
            best_diff = diff;
            best = s.index;
        }
    }
    best
}
