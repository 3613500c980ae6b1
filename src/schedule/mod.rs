//! Weekly schedule grid synthesis.
//!
//! Real lessons are placed onto the fixed daily slot table, then each day is
//! topped up with reproducible placeholder lessons so the week view never
//! renders half empty. Everything here is a pure function of its inputs.

pub mod color;
pub mod config;
pub mod matcher;
pub mod rng;
pub mod slots;
pub mod synth;
pub mod week;

use serde::{Deserialize, Serialize};

pub use color::{color_class, ColorClass};
pub use config::GridConfig;
pub use matcher::{match_slot, parse_minutes};
pub use slots::{TimeSlot, SLOTS};
pub use synth::{synthesize, Grid, GridCell, SynthesisStats};

/// Lesson identity as supplied by the schedule store. Stored rows carry
/// integers or uuids; placeholder lessons carry `demo-<day>-<slot>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LessonId {
    Int(i64),
    Text(String),
}

/// A lesson as the schedule API records it. Field names stay snake_case
/// (`start_time`, `discipline_title`, ...) to match those records, unlike the
/// camelCase request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonEvent {
    pub id: LessonId,
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub discipline_title: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub room: String,
}
