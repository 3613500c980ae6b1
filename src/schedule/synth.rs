use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::config::GridConfig;
use super::matcher::match_slot;
use super::rng::{stable_hash, SeededRng};
use super::slots::SLOTS;
use super::{LessonEvent, LessonId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub event: LessonEvent,
    pub synthetic: bool,
}

/// Day x slot placement. At most one lesson per `(day, slot_index)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: BTreeMap<(String, usize), GridCell>,
}

impl Grid {
    pub fn get(&self, day: &str, slot_index: usize) -> Option<&GridCell> {
        self.cells.get(&(day.to_string(), slot_index))
    }

    pub fn is_occupied(&self, day: &str, slot_index: usize) -> bool {
        self.get(day, slot_index).is_some()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells ordered by day, then slot.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize, &GridCell)> {
        self.cells
            .iter()
            .map(|((day, slot), cell)| (day.as_str(), *slot, cell))
    }

    pub fn cells_for_day<'a>(&'a self, day: &'a str) -> impl Iterator<Item = (usize, &'a GridCell)> {
        self.iter()
            .filter(move |(d, _, _)| *d == day)
            .map(|(_, slot, cell)| (slot, cell))
    }

    fn place(&mut self, day: &str, slot_index: usize, cell: GridCell) {
        self.cells.insert((day.to_string(), slot_index), cell);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub day: String,
    pub real: usize,
    pub synthetic: usize,
    pub attempts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisStats {
    pub days: Vec<DayStats>,
}

impl SynthesisStats {
    pub fn synthetic_total(&self) -> usize {
        self.days.iter().map(|d| d.synthetic).sum()
    }
}

/// Seed for one day's backfill stream.
pub fn day_seed(day: &str, range_start: &str, range_end: &str) -> u32 {
    stable_hash(&format!("{}_{}_{}", day, range_start, range_end))
}

fn title_pool<'a>(real_events: &'a [LessonEvent], config: &'a GridConfig) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let pool: Vec<&str> = real_events
        .iter()
        .map(|e| e.discipline_title.as_str())
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .collect();
    if pool.is_empty() {
        config.fallback_titles.iter().map(String::as_str).collect()
    } else {
        pool
    }
}

/// Place real events, then top each listed day up with placeholder lessons.
///
/// Real events never move once placed; when two resolve to the same cell the
/// later one in input order wins. Placeholders only land on free cells and are
/// a pure function of the range text and the real event list.
pub fn synthesize(
    range_start: &str,
    range_end: &str,
    days: &[String],
    real_events: &[LessonEvent],
    config: &GridConfig,
) -> (Grid, SynthesisStats) {
    let mut grid = Grid::default();
    for event in real_events {
        let slot = match_slot(&event.start_time);
        grid.place(
            &event.day,
            slot,
            GridCell {
                event: event.clone(),
                synthetic: false,
            },
        );
    }

    let titles = title_pool(real_events, config);
    let mut stats = SynthesisStats::default();

    for day in days {
        let real = grid.cells_for_day(day).count();
        let mut rng = SeededRng::new(day_seed(day, range_start, range_end));
        let mut added = 0;
        let mut attempts = 0;

        while attempts < config.max_attempts && added < config.target_per_day {
            attempts += 1;
            let slot_index = rng.next_index(SLOTS.len());
            if grid.is_occupied(day, slot_index) {
                continue;
            }
            let title = titles
                .get(rng.next_index(titles.len()))
                .copied()
                .unwrap_or_default();
            let group = 1 + rng.next_index(config.group_variants);
            let room = config.room_base as usize + rng.next_index(config.room_span);
            let slot = &SLOTS[slot_index];
            grid.place(
                day,
                slot_index,
                GridCell {
                    event: LessonEvent {
                        id: LessonId::Text(format!("demo-{}-{}", day, slot_index)),
                        day: day.clone(),
                        start_time: slot.start_hhmm(),
                        end_time: slot.end_hhmm(),
                        discipline_title: title.to_string(),
                        group_name: format!("{}{}", config.group_prefix, group),
                        room: room.to_string(),
                    },
                    synthetic: true,
                },
            );
            added += 1;
        }

        stats.days.push(DayStats {
            day: day.clone(),
            real,
            synthetic: added,
            attempts,
        });
    }

    (grid, stats)
}
