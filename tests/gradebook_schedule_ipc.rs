use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar(args: &[&str]) -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_campusd");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn campusd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown error")
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn error_code(value: &serde_json::Value) -> Option<&str> {
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
}

#[test]
fn gradebook_rows_and_column_averages() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let rows = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "gradebook.list",
        json!({ "filters": { "classId": "cls-1" } }),
    );
    assert_eq!(rows["matched"], json!(2));
    assert_eq!(rows["items"][0]["average"], json!(93.0));
    assert_eq!(rows["items"][1]["average"], json!(88.0));
    assert_eq!(rows["items"][1]["gradeBand"], json!("blue"));

    let cols = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "gradebook.assignmentAverages",
        json!({ "classId": "cls-1" }),
    );
    assert_eq!(cols["assignments"]["asg-1"]["average"], json!(95.0));
    assert_eq!(cols["assignments"]["asg-1"]["graded"], json!(1));
    assert_eq!(cols["assignments"]["asg-1"]["students"], json!(2));
    assert_eq!(cols["assignments"]["asg-4"]["average"], json!(89.5));

    let stats = request_ok(&mut stdin, &mut reader, "3", "gradebook.stats", json!({}));
    assert_eq!(stats["classAverage"], json!(85.7));

    let missing = request(
        &mut stdin,
        &mut reader,
        "4",
        "gradebook.assignmentAverages",
        json!({}),
    );
    assert_eq!(error_code(&missing), Some("bad_params"));
}

#[test]
fn schedule_filters_by_derived_day_and_reports_conflicts() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let monday = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "schedule.list",
        json!({ "filters": { "day": "monday", "type": "class" } }),
    );
    assert_eq!(monday["matched"], json!(2));
    assert_eq!(monday["items"][0]["durationMinutes"], json!(90));

    let conflicts = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "schedule.conflicts",
        json!({ "date": "2024-03-18" }),
    );
    let list = conflicts["conflicts"].as_array().cloned().unwrap_or_default();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["first"], json!("evt-1"));
    assert_eq!(list[0]["second"], json!("evt-3"));
    assert_eq!(list[0]["overlapStart"], json!("10:00:00"));
    assert_eq!(list[0]["overlapEnd"], json!("10:30:00"));

    let other_day = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "schedule.conflicts",
        json!({ "date": "2024-03-20" }),
    );
    assert_eq!(other_day["conflicts"], json!([]));

    let bad = request(
        &mut stdin,
        &mut reader,
        "4",
        "schedule.conflicts",
        json!({ "date": "18/03/2024" }),
    );
    assert_eq!(error_code(&bad), Some("bad_params"));
}

#[test]
fn moving_an_event_clears_the_conflict() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "schedule.update",
        json!({ "id": "evt-3", "patch": { "room": "Room 204" } }),
    );
    let conflicts = request_ok(&mut stdin, &mut reader, "2", "schedule.conflicts", json!({}));
    assert_eq!(conflicts["conflicts"], json!([]));
}

#[test]
fn ungraded_gradebook_row_has_no_letter_grade() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "gradebook.create",
        json!({
            "record": {
                "id": "gb-4",
                "studentId": "STU003",
                "studentName": "Olivia Martinez",
                "classId": "cls-3",
                "grades": { "asg-3": null }
            }
        }),
    );
    let rows = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "gradebook.list",
        json!({ "filters": { "classId": "cls-3" } }),
    );
    assert_eq!(rows["matched"], json!(1));
    let row = &rows["items"][0];
    assert!(row["average"].is_null());
    assert!(row["letterGrade"].is_null());
    assert!(row["gradeBand"].is_null());

    let stats = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "gradebook.stats",
        json!({ "filters": { "classId": "cls-3" } }),
    );
    assert_eq!(stats["graded"], json!(0));
    assert_eq!(stats["classAverage"], json!(0.0));
}

#[test]
fn event_ending_before_it_starts_is_rejected() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let res = request(
        &mut stdin,
        &mut reader,
        "1",
        "schedule.update",
        json!({ "id": "evt-4", "patch": { "endTime": "08:00:00" } }),
    );
    assert_eq!(error_code(&res), Some("bad_params"));
    let event = request_ok(&mut stdin, &mut reader, "2", "schedule.get", json!({ "id": "evt-4" }));
    assert_eq!(event["item"]["durationMinutes"], json!(120));
}
