
use serde_json::json;
use test_support::{error_code, request, request_ok, spawn_sidecar, temp_dir};

fn cells(result: &serde_json::Value) -> Vec<serde_json::Value> {
    result
        .get("cells")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

fn cells_for_day<'a>(cells: &'a [serde_json::Value], day: &str) -> Vec<&'a serde_json::Value> {
    cells
        .iter()
        .filter(|c| c.get("day").and_then(|v| v.as_str()) == Some(day))
        .collect()
}

#[test]
fn empty_week_fills_each_day_with_three_placeholders() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let params = json!({ "start": "2024-06-03", "end": "2024-06-08" });

    let first = request_ok(&mut stdin, &mut reader, "1", "schedule.weekGrid", params.clone());
    let second = request_ok(&mut stdin, &mut reader, "2", "schedule.weekGrid", params);
    assert_eq!(first, second);

    let days: Vec<String> = first
        .get("days")
        .and_then(|v| v.as_array())
        .expect("days")
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    assert_eq!(days.len(), 6);
    assert_eq!(days[0], "2024-06-03");
    assert_eq!(days[5], "2024-06-08");

    let fallback = [
        "HTML/CSS",
        "HTML 5 API",
        "Web-компоненты",
        "Введение в фреймворки",
        "Основы UX/UI",
    ];
    let all = cells(&first);
    for day in &days {
        let day_cells = cells_for_day(&all, day);
        assert_eq!(day_cells.len(), 3, "day {}", day);
        for c in day_cells {
            let slot = c.get("slotIndex").and_then(|v| v.as_u64()).expect("slot");
            let event = c.get("event").expect("event");
            assert_eq!(c.get("synthetic").and_then(|v| v.as_bool()), Some(true));
            assert_eq!(
                event.get("id").and_then(|v| v.as_str()),
                Some(format!("demo-{}-{}", day, slot).as_str())
            );
            let title = event
                .get("discipline_title")
                .and_then(|v| v.as_str())
                .expect("title");
            assert!(fallback.contains(&title), "unexpected title {}", title);
            assert!(c
                .get("colorClass")
                .and_then(|v| v.as_str())
                .map(|s| s.starts_with("weekEvent"))
                .unwrap_or(false));
        }
    }

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn stored_lesson_holds_its_slot_and_feeds_titles() {
    let workspace = temp_dir("portald-week-grid");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let created = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "schedule.items.create",
        json!({
            "input": {
                "day": "2024-06-03",
                "startTime": "10:10",
                "endTime": "11:40",
                "disciplineTitle": "Базы данных",
                "groupName": "Группа 22-FT-2",
                "room": "1410"
            }
        }),
    );
    let item_id = created
        .get("itemId")
        .and_then(|v| v.as_str())
        .expect("itemId")
        .to_string();

    let week = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "schedule.week",
        json!({ "start": "2024-06-03", "end": "2024-06-09" }),
    );
    assert_eq!(week.get("items").and_then(|v| v.as_array()).map(|a| a.len()), Some(1));

    let day = request_ok(
        &mut stdin,
        &mut reader,
        "3a",
        "schedule.day",
        json!({ "day": "2024-06-03" }),
    );
    let day_items = day.get("items").and_then(|v| v.as_array()).expect("items");
    assert_eq!(day_items.len(), 1);
    assert_eq!(day_items[0].get("start_time").and_then(|v| v.as_str()), Some("10:10"));
    let other_day = request_ok(
        &mut stdin,
        &mut reader,
        "3b",
        "schedule.day",
        json!({ "day": "2024-06-04" }),
    );
    assert_eq!(
        other_day.get("items").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(0)
    );

    let grid = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "schedule.weekGrid",
        json!({ "start": "2024-06-03" }),
    );
    assert_eq!(grid.get("end").and_then(|v| v.as_str()), Some("2024-06-09"));
    let all = cells(&grid);
    let real = all
        .iter()
        .find(|c| {
            c.get("day").and_then(|v| v.as_str()) == Some("2024-06-03")
                && c.get("slotIndex").and_then(|v| v.as_u64()) == Some(1)
        })
        .expect("slot 1 on 2024-06-03");
    assert_eq!(real.get("synthetic").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        real.get("event").and_then(|e| e.get("id")).and_then(|v| v.as_str()),
        Some(item_id.as_str())
    );
    for c in all.iter().filter(|c| c.get("synthetic").and_then(|v| v.as_bool()) == Some(true)) {
        assert_eq!(
            c.get("event")
                .and_then(|e| e.get("discipline_title"))
                .and_then(|v| v.as_str()),
            Some("Базы данных")
        );
    }

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "schedule.items.delete",
        json!({ "itemId": item_id }),
    );
    let again = request(
        &mut stdin,
        &mut reader,
        "6",
        "schedule.items.delete",
        json!({ "itemId": item_id }),
    );
    assert_eq!(error_code(&again), Some("not_found"));

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn caller_items_and_setup_overrides_apply() {
    let workspace = temp_dir("portald-week-grid-setup");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "setup.update",
        json!({
            "section": "schedule",
            "patch": { "targetPerDay": 1, "fallbackTitles": ["Алгебра"] }
        }),
    );
    let setup = request_ok(&mut stdin, &mut reader, "3", "setup.get", json!({}));
    assert_eq!(
        setup
            .get("schedule")
            .and_then(|s| s.get("targetPerDay"))
            .and_then(|v| v.as_u64()),
        Some(1)
    );

    let rejected = request(
        &mut stdin,
        &mut reader,
        "4",
        "setup.update",
        json!({ "section": "schedule", "patch": { "maxAttempts": 0 } }),
    );
    assert_eq!(error_code(&rejected), Some("bad_params"));

    let grid = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "schedule.weekGrid",
        json!({
            "start": "2024-06-03",
            "end": "2024-06-09",
            "days": ["2024-06-03", "2024-06-04"],
            "items": [{
                "id": 42,
                "day": "2024-06-04",
                "start_time": "20:10:00",
                "end_time": "21:40:00",
                "discipline_title": "",
                "group_name": "",
                "room": "1500"
            }]
        }),
    );
    let all = cells(&grid);
    assert_eq!(cells_for_day(&all, "2024-06-03").len(), 1);
    let tuesday = cells_for_day(&all, "2024-06-04");
    assert_eq!(tuesday.len(), 2);
    let real = tuesday
        .iter()
        .find(|c| c.get("synthetic").and_then(|v| v.as_bool()) == Some(false))
        .expect("real lesson");
    assert_eq!(real.get("slotIndex").and_then(|v| v.as_u64()), Some(7));
    assert_eq!(real.get("event").and_then(|e| e.get("id")).and_then(|v| v.as_i64()), Some(42));
    assert_eq!(real.get("colorClass").and_then(|v| v.as_str()), Some("weekEventGreen"));
    for c in all.iter().filter(|c| c.get("synthetic").and_then(|v| v.as_bool()) == Some(true)) {
        assert_eq!(
            c.get("event")
                .and_then(|e| e.get("discipline_title"))
                .and_then(|v| v.as_str()),
            Some("Алгебра")
        );
    }

    drop(stdin);
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(workspace);
}
