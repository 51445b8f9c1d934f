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

const STATS: &[&str] = &[
    "users.stats",
    "students.stats",
    "teachers.stats",
    "classes.stats",
    "assignments.stats",
    "grades.stats",
    "gradebook.stats",
    "lessons.stats",
    "schedule.stats",
];

fn assert_no_nulls(method: &str, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => panic!("{} produced null (NaN leaked)", method),
        serde_json::Value::Number(n) => {
            assert_eq!(n.as_f64(), Some(0.0), "{} expected zero, got {}", method, n)
        }
        serde_json::Value::Object(map) => {
            for value in map.values() {
                assert_no_nulls(method, value);
            }
        }
        serde_json::Value::Array(items) => {
            for value in items {
                assert_no_nulls(method, value);
            }
        }
        _ => {}
    }
}

#[test]
fn every_stat_card_is_zero_on_empty_collections() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&["--seed", "empty"]);
    for (i, method) in STATS.iter().enumerate() {
        let res = request_ok(&mut stdin, &mut reader, &i.to_string(), method, json!({}));
        assert_no_nulls(method, &res);
    }
}

#[test]
fn empty_list_reports_zero_matches() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&["--seed", "empty"]);
    let res = request_ok(&mut stdin, &mut reader, "1", "classes.list", json!({}));
    assert_eq!(res["items"], json!([]));
    assert_eq!(res["total"], json!(0));
    assert_eq!(res["matched"], json!(0));

    let health = request_ok(&mut stdin, &mut reader, "2", "health", json!({}));
    assert_eq!(health["seed"], json!("empty"));
}
