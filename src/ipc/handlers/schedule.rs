use crate::db::{self, NewScheduleItem};
use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{db_conn, opt_str, parse_string_array, required_str, str_or_empty};
use crate::ipc::types::{AppState, Request};
use crate::schedule::{self, week, GridConfig, LessonEvent, SLOTS};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};
use uuid::Uuid;

pub const SETUP_KEY: &str = "setup.schedule";

fn validate_iso_day(raw: &str, key: &str) -> Result<(), HandlerErr> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| HandlerErr::bad_params(format!("{} must be YYYY-MM-DD", key)))
}

pub fn load_grid_config(conn: Option<&Connection>) -> GridConfig {
    let saved = conn.and_then(|c| match db::settings_get_json(c, SETUP_KEY) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "schedule setup unreadable, using defaults");
            None
        }
    });
    GridConfig::from_setup_json(saved.as_ref())
}

/// Stored lessons for a range. A missing workspace or a failed query yields
/// an empty list; the grid treats that as an ordinary empty week.
fn stored_events(state: &AppState, start: &str, end: &str) -> Vec<LessonEvent> {
    let Some(conn) = state.db.as_ref() else {
        return Vec::new();
    };
    db::schedule_items_in_range(conn, start, end).unwrap_or_else(|e| {
        warn!(start, end, error = %e, "schedule query failed");
        Vec::new()
    })
}

fn handle_slots(_state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "slots": SLOTS }))
}

fn handle_match_slot(_state: &mut AppState, req: &Request) -> serde_json::Value {
    let start_time = req
        .params
        .get("startTime")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    let idx = schedule::match_slot(start_time);
    ok(&req.id, json!({ "slotIndex": idx, "slot": SLOTS[idx] }))
}

fn color_class(params: &JsonValue) -> Result<JsonValue, HandlerErr> {
    let title = str_or_empty(params, "disciplineTitle")?;
    let group = str_or_empty(params, "groupName")?;
    let class = schedule::color_class(&title, &group);
    Ok(json!({ "index": class.index(), "className": class.css_class() }))
}

fn parse_new_item(input: &JsonValue) -> Result<NewScheduleItem, HandlerErr> {
    if !input.is_object() {
        return Err(HandlerErr::bad_params("input must be an object"));
    }
    let day = opt_str(input, "day").ok_or_else(|| HandlerErr::bad_params("missing input.day"))?;
    validate_iso_day(&day, "input.day")?;
    let start_time = opt_str(input, "startTime")
        .ok_or_else(|| HandlerErr::bad_params("missing input.startTime"))?;
    Ok(NewScheduleItem {
        day,
        start_time,
        end_time: str_or_empty(input, "endTime")?,
        discipline_title: str_or_empty(input, "disciplineTitle")?,
        group_name: str_or_empty(input, "groupName")?,
        room: str_or_empty(input, "room")?,
    })
}

fn items_create(conn: &Connection, params: &JsonValue) -> Result<JsonValue, HandlerErr> {
    let input = params
        .get("input")
        .ok_or_else(|| HandlerErr::bad_params("missing input"))?;
    let item = parse_new_item(input)?;
    let item_id = Uuid::new_v4().to_string();
    db::schedule_items_insert(conn, &item_id, &item)
        .map_err(|e| HandlerErr::new("db_insert_failed", e.to_string()))?;
    debug!(item_id = %item_id, day = %item.day, "schedule item created");
    Ok(json!({ "itemId": item_id }))
}

fn items_delete(conn: &Connection, req: &Request) -> Result<JsonValue, HandlerErr> {
    let item_id = required_str(req, "itemId")?;
    let removed = db::schedule_items_delete(conn, &item_id)
        .map_err(|e| HandlerErr::new("db_update_failed", e.to_string()))?;
    if !removed {
        return Err(HandlerErr::new("not_found", "schedule item not found"));
    }
    Ok(json!({ "ok": true }))
}

fn schedule_day(state: &AppState, req: &Request) -> Result<JsonValue, HandlerErr> {
    let day = required_str(req, "day")?;
    validate_iso_day(&day, "day")?;
    let items = match state.db.as_ref() {
        Some(conn) => db::schedule_items_for_day(conn, &day).unwrap_or_else(|e| {
            warn!(day = %day, error = %e, "schedule day query failed");
            Vec::new()
        }),
        None => Vec::new(),
    };
    Ok(json!({ "items": items }))
}

fn schedule_week(state: &AppState, req: &Request) -> Result<JsonValue, HandlerErr> {
    let start = required_str(req, "start")?;
    let end = required_str(req, "end")?;
    validate_iso_day(&start, "start")?;
    validate_iso_day(&end, "end")?;
    Ok(json!({
        "start": start,
        "end": end,
        "items": stored_events(state, &start, &end),
    }))
}

fn schedule_week_grid(state: &AppState, req: &Request) -> Result<JsonValue, HandlerErr> {
    let start = required_str(req, "start")?;
    validate_iso_day(&start, "start")?;
    let end = match opt_str(&req.params, "end") {
        Some(end) => {
            validate_iso_day(&end, "end")?;
            end
        }
        None => week::week_end(&start)
            .ok_or_else(|| HandlerErr::bad_params("start must be YYYY-MM-DD"))?,
    };

    let config = load_grid_config(state.db.as_ref());
    let days = match parse_string_array(req.params.get("days"), "days")? {
        Some(days) => days,
        None => week::week_days(&start, &end, config.days_per_week),
    };
    let real_events: Vec<LessonEvent> = match req.params.get("items") {
        Some(v) if !v.is_null() => serde_json::from_value(v.clone())
            .map_err(|e| HandlerErr::bad_params(format!("items: {}", e)))?,
        _ => stored_events(state, &start, &end),
    };

    let (grid, stats) = schedule::synthesize(&start, &end, &days, &real_events, &config);
    debug!(
        start = %start,
        end = %end,
        real = real_events.len(),
        synthetic = stats.synthetic_total(),
        "week grid synthesized"
    );

    let cells: Vec<JsonValue> = grid
        .iter()
        .map(|(day, slot_index, cell)| {
            json!({
                "day": day,
                "slotIndex": slot_index,
                "synthetic": cell.synthetic,
                "colorClass": cell.event.color_class().css_class(),
                "event": cell.event,
            })
        })
        .collect();

    Ok(json!({
        "start": start,
        "end": end,
        "days": days,
        "slots": SLOTS,
        "cells": cells,
        "stats": stats,
    }))
}

fn respond(req: &Request, result: Result<JsonValue, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(v) => ok(&req.id, v),
        Err(error) => error.response(&req.id),
    }
}

fn handle_items_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = db_conn(state).and_then(|conn| items_create(conn, &req.params));
    respond(req, result)
}

fn handle_items_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let result = db_conn(state).and_then(|conn| items_delete(conn, req));
    respond(req, result)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schedule.slots" => Some(handle_slots(state, req)),
        "schedule.matchSlot" => Some(handle_match_slot(state, req)),
        "schedule.colorClass" => Some(respond(req, color_class(&req.params))),
        "schedule.items.create" => Some(handle_items_create(state, req)),
        "schedule.items.delete" => Some(handle_items_delete(state, req)),
        "schedule.day" => Some(respond(req, schedule_day(state, req))),
        "schedule.week" => Some(respond(req, schedule_week(state, req))),
        "schedule.weekGrid" => Some(respond(req, schedule_week_grid(state, req))),
        _ => None,
    }
}
