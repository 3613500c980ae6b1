use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::handlers::schedule::{load_grid_config, SETUP_KEY};
use crate::ipc::types::{AppState, Request};
use crate::schedule::SLOTS;
use serde_json::{json, Map, Value};

#[derive(Clone, Copy)]
enum SetupSection {
    Schedule,
}

impl SetupSection {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "schedule" => Some(Self::Schedule),
            _ => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Schedule => SETUP_KEY,
        }
    }
}

fn parse_i64_range(v: &Value, key: &str, min: i64, max: i64) -> Result<i64, String> {
    let n = v
        .as_i64()
        .ok_or_else(|| format!("{} must be integer", key))?;
    if !(min..=max).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n)
}

fn parse_title_list(v: &Value, key: &str) -> Result<Vec<String>, String> {
    let arr = v
        .as_array()
        .ok_or_else(|| format!("{} must be array of strings", key))?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        let s = item
            .as_str()
            .ok_or_else(|| format!("{} must be array of strings", key))?
            .trim();
        if s.chars().count() > 120 {
            return Err(format!("{} entries must be <= 120 chars", key));
        }
        if !s.is_empty() && !out.iter().any(|t: &String| t == s) {
            out.push(s.to_string());
        }
    }
    if out.is_empty() {
        return Err(format!("{} must contain at least one title", key));
    }
    Ok(out)
}

fn merge_section_patch(
    section: SetupSection,
    current: &mut Map<String, Value>,
    patch: &Map<String, Value>,
) -> Result<(), String> {
    for (k, v) in patch {
        match section {
            SetupSection::Schedule => match k.as_str() {
                "targetPerDay" => {
                    let n = parse_i64_range(v, k, 0, SLOTS.len() as i64)?;
                    current.insert(k.clone(), Value::from(n));
                }
                "maxAttempts" => {
                    current.insert(k.clone(), Value::from(parse_i64_range(v, k, 1, 500)?));
                }
                "daysPerWeek" => {
                    current.insert(k.clone(), Value::from(parse_i64_range(v, k, 1, 7)?));
                }
                "fallbackTitles" => {
                    current.insert(k.clone(), json!(parse_title_list(v, k)?));
                }
                _ => return Err(format!("unknown schedule field: {}", k)),
            },
        }
    }
    Ok(())
}

fn load_section(conn: &rusqlite::Connection, section: SetupSection) -> Map<String, Value> {
    match section {
        SetupSection::Schedule => load_grid_config(Some(conn))
            .to_setup_json()
            .as_object()
            .cloned()
            .unwrap_or_default(),
    }
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    ok(
        &req.id,
        json!({ "schedule": load_section(conn, SetupSection::Schedule) }),
    )
}

fn handle_setup_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(section_raw) = req.params.get("section").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing section", None);
    };
    let Some(section) = SetupSection::parse(section_raw) else {
        return err(&req.id, "bad_params", "unknown section", None);
    };
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return err(&req.id, "bad_params", "patch must be an object", None);
    };

    let mut current = load_section(conn, section);
    if let Err(msg) = merge_section_patch(section, &mut current, patch_obj) {
        return err(&req.id, "bad_params", msg, None);
    }
    if let Err(e) = db::settings_set_json(conn, section.key(), &Value::Object(current)) {
        return err(&req.id, "db_update_failed", e.to_string(), None);
    }
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.update" => Some(handle_setup_update(state, req)),
        _ => None,
    }
}
