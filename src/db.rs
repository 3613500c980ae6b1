use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::schedule::{LessonEvent, LessonId};

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("portal.sqlite3");
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS schedule_items(
            id TEXT PRIMARY KEY,
            day TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            discipline_title TEXT NOT NULL,
            group_name TEXT NOT NULL,
            room TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_schedule_items_day ON schedule_items(day, start_time)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value_json TEXT NOT NULL
        )",
        [],
    )?;

    Ok(conn)
}

pub fn settings_get_json(conn: &Connection, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value_json FROM settings WHERE key = ?",
            [key],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => Ok(Some(serde_json::from_str(&s)?)),
        None => Ok(None),
    }
}

pub fn settings_set_json(conn: &Connection, key: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value_json) VALUES(?, ?)
         ON CONFLICT(key) DO UPDATE SET value_json = excluded.value_json",
        params![key, serde_json::to_string(value)?],
    )?;
    Ok(())
}

pub struct NewScheduleItem {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub discipline_title: String,
    pub group_name: String,
    pub room: String,
}

pub fn schedule_items_insert(conn: &Connection, id: &str, item: &NewScheduleItem) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO schedule_items(id, day, start_time, end_time, discipline_title, group_name, room)
         VALUES(?, ?, ?, ?, ?, ?, ?)",
        params![
            id,
            item.day,
            item.start_time,
            item.end_time,
            item.discipline_title,
            item.group_name,
            item.room
        ],
    )?;
    Ok(())
}

/// Returns false when no row matched.
pub fn schedule_items_delete(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let n = conn.execute("DELETE FROM schedule_items WHERE id = ?", [id])?;
    Ok(n > 0)
}

fn row_to_event(r: &rusqlite::Row<'_>) -> rusqlite::Result<LessonEvent> {
    Ok(LessonEvent {
        id: LessonId::Text(r.get(0)?),
        day: r.get(1)?,
        start_time: r.get(2)?,
        end_time: r.get(3)?,
        discipline_title: r.get(4)?,
        group_name: r.get(5)?,
        room: r.get(6)?,
    })
}

pub fn schedule_items_for_day(conn: &Connection, day: &str) -> anyhow::Result<Vec<LessonEvent>> {
    schedule_items_in_range(conn, day, day)
}

/// Lessons with `start <= day <= end`, ordered by day then start time.
pub fn schedule_items_in_range(conn: &Connection, start: &str, end: &str) -> anyhow::Result<Vec<LessonEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, day, start_time, end_time, discipline_title, group_name, room
         FROM schedule_items
         WHERE day >= ? AND day <= ?
         ORDER BY day, start_time, rowid",
    )?;
    let items = stmt
        .query_map([start, end], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_workspace(prefix: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
    }

    fn item(day: &str, start: &str, title: &str) -> NewScheduleItem {
        NewScheduleItem {
            day: day.into(),
            start_time: start.into(),
            end_time: "00:00".into(),
            discipline_title: title.into(),
            group_name: "G".into(),
            room: "101".into(),
        }
    }

    #[test]
    fn range_query_orders_and_bounds() {
        let ws = temp_workspace("portald-db-range");
        let conn = open_db(&ws).expect("open db");
        schedule_items_insert(&conn, "a", &item("2024-06-04", "13:30", "Late")).expect("insert");
        schedule_items_insert(&conn, "b", &item("2024-06-04", "08:30", "Early")).expect("insert");
        schedule_items_insert(&conn, "c", &item("2024-06-10", "08:30", "Outside")).expect("insert");

        let items = schedule_items_in_range(&conn, "2024-06-03", "2024-06-09").expect("query");
        let titles: Vec<&str> = items.iter().map(|e| e.discipline_title.as_str()).collect();
        assert_eq!(titles, ["Early", "Late"]);
        assert_eq!(schedule_items_for_day(&conn, "2024-06-10").expect("day").len(), 1);

        assert!(schedule_items_delete(&conn, "c").expect("delete"));
        assert!(!schedule_items_delete(&conn, "c").expect("delete again"));
        drop(conn);
        let _ = std::fs::remove_dir_all(ws);
    }

    #[test]
    fn settings_upsert() {
        let ws = temp_workspace("portald-db-settings");
        let conn = open_db(&ws).expect("open db");
        assert!(settings_get_json(&conn, "setup.schedule").expect("get").is_none());
        settings_set_json(&conn, "setup.schedule", &json!({ "targetPerDay": 2 })).expect("set");
        settings_set_json(&conn, "setup.schedule", &json!({ "targetPerDay": 4 })).expect("set");
        assert_eq!(
            settings_get_json(&conn, "setup.schedule").expect("get"),
            Some(json!({ "targetPerDay": 4 }))
        );
        drop(conn);
        let _ = std::fs::remove_dir_all(ws);
    }
}
