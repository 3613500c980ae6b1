use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub index: usize,
    pub label: &'static str,
    pub start_minutes: i32,
    pub end_minutes: i32,
}

const fn slot(index: usize, label: &'static str, start: (i32, i32), end: (i32, i32)) -> TimeSlot {
    TimeSlot {
        index,
        label,
        start_minutes: start.0 * 60 + start.1,
        end_minutes: end.0 * 60 + end.1,
    }
}

/// Class periods of the working day, in index order.
pub const SLOTS: [TimeSlot; 8] = [
    slot(0, "8:30-10:00", (8, 30), (10, 0)),
    slot(1, "10:10-11:40", (10, 10), (11, 40)),
    slot(2, "11:50-13:20", (11, 50), (13, 20)),
    slot(3, "13:30-15:00", (13, 30), (15, 0)),
    slot(4, "15:10-16:40", (15, 10), (16, 40)),
    slot(5, "16:50-18:20", (16, 50), (18, 20)),
    slot(6, "18:30-20:00", (18, 30), (20, 0)),
    slot(7, "20:10-21:40", (20, 10), (21, 40)),
];

impl TimeSlot {
    pub fn contains(&self, minute: i32) -> bool {
        minute >= self.start_minutes && minute <= self.end_minutes
    }

    pub fn start_hhmm(&self) -> String {
        format_hhmm(self.start_minutes)
    }

    pub fn end_hhmm(&self) -> String {
        format_hhmm(self.end_minutes)
    }
}

fn format_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
