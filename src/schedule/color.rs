use serde::Serialize;

use super::rng::pick_index;
use super::LessonEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColorClass {
    Green,
    Blue,
    Red,
    Purple,
}

pub const PALETTE: [ColorClass; 4] = [
    ColorClass::Green,
    ColorClass::Blue,
    ColorClass::Red,
    ColorClass::Purple,
];

impl ColorClass {
    pub fn index(self) -> usize {
        match self {
            ColorClass::Green => 0,
            ColorClass::Blue => 1,
            ColorClass::Red => 2,
            ColorClass::Purple => 3,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ColorClass::Green => "weekEventGreen",
            ColorClass::Blue => "weekEventBlue",
            ColorClass::Red => "weekEventRed",
            ColorClass::Purple => "weekEventPurple",
        }
    }
}

/// Display color for a discipline/group pair. Depends only on the two strings.
pub fn color_class(discipline_title: &str, group_name: &str) -> ColorClass {
    if discipline_title.is_empty() && group_name.is_empty() {
        return PALETTE[0];
    }
    let key = format!("{}-{}", discipline_title, group_name);
    PALETTE[pick_index(&key, PALETTE.len())]
}

impl LessonEvent {
    pub fn color_class(&self) -> ColorClass {
        color_class(&self.discipline_title, &self.group_name)
    }
}
