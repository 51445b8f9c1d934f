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
fn every_entity_answers_its_methods() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let entities = [
        ("users", "usr-1"),
        ("students", "stu-1"),
        ("teachers", "tch-1"),
        ("classes", "cls-1"),
        ("assignments", "asg-1"),
        ("grades", "grd-1"),
        ("gradebook", "gb-1"),
        ("lessons", "les-1"),
        ("schedule", "evt-1"),
    ];
    for (n, (entity, id)) in entities.iter().enumerate() {
        let list = request_ok(
            &mut stdin,
            &mut reader,
            &format!("list-{}", n),
            &format!("{}.list", entity),
            json!({}),
        );
        assert!(list["total"].as_u64().unwrap_or(0) > 0, "{} seeded", entity);
        assert_eq!(list["total"], list["matched"]);

        let got = request_ok(
            &mut stdin,
            &mut reader,
            &format!("get-{}", n),
            &format!("{}.get", entity),
            json!({ "id": id }),
        );
        assert_eq!(got["item"]["id"], json!(id));

        let _ = request_ok(
            &mut stdin,
            &mut reader,
            &format!("stats-{}", n),
            &format!("{}.stats", entity),
            json!({}),
        );
    }
}

#[test]
fn unknown_method_and_bad_json_get_error_replies() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    let res = request(&mut stdin, &mut reader, "1", "chat.send", json!({}));
    assert_eq!(error_code(&res), Some("not_implemented"));

    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read reply");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("reply is json");
    assert_eq!(error_code(&value), Some("bad_json"));

    // The loop keeps serving after a malformed line.
    let health = request_ok(&mut stdin, &mut reader, "2", "health", json!({}));
    assert_eq!(health["seed"], json!("demo"));
}

#[test]
fn missing_params_are_bad_params() {
    let (_child, mut stdin, mut reader) = spawn_sidecar(&[]);
    for (i, method) in ["users.get", "classes.update", "lessons.delete", "drafts.commit"]
        .iter()
        .enumerate()
    {
        let res = request(&mut stdin, &mut reader, &i.to_string(), method, json!({}));
        assert_eq!(error_code(&res), Some("bad_params"), "{}", method);
    }
}
