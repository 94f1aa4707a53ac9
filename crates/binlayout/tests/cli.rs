#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const HEADER_SCHEMAS: &str = r#"{
    "HEADER": {"magic": "raw:AB", "flag": "u8", "value": "u32"},
    "PADDED": {"id": "u8", "reserved": 3}
}"#;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/binlayout-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn schema_file(dir: &std::path::Path) -> PathBuf {
    let path = dir.join("schemas.json");
    std::fs::write(&path, HEADER_SCHEMAS).expect("schema file should be writable");
    path
}

fn binlayout(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_binlayout"))
        .env_remove("BINLAYOUT_SCHEMA_DIR")
        .args(["--log-level", "error"])
        .args(args)
        .output()
        .expect("binlayout should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn decode_prints_typed_record() {
    let dir = unique_temp_dir("decode");
    let schemas = schema_file(&dir);
    let input = dir.join("input.bin");
    std::fs::write(&input, [0x41, 0x42, 0x01, 0x78, 0x56, 0x34, 0x12]).unwrap();

    let output = binlayout(&[
        "--format",
        "json",
        "decode",
        input.to_str().unwrap(),
        "--name",
        "HEADER",
        "--schema",
        schemas.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json = stdout_json(&output);
    assert_eq!(json["schema"], "HEADER");
    assert_eq!(json["consumed"], 7);
    assert_eq!(json["value"]["flag"], 1);
    assert_eq!(json["value"]["value"], 0x1234_5678);
    assert!(json["value"]["magic"].is_null());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn decode_wrong_magic_exits_data_invalid() {
    let dir = unique_temp_dir("magic");
    let schemas = schema_file(&dir);
    let input = dir.join("input.bin");
    std::fs::write(&input, [0x58, 0x59, 0x01, 0x78, 0x56, 0x34, 0x12]).unwrap();

    let output = binlayout(&[
        "decode",
        input.to_str().unwrap(),
        "--name",
        "HEADER",
        "--schema",
        schemas.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("magic"), "stderr: {stderr}");
    assert!(stderr.contains("4142"), "stderr: {stderr}");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn decode_reads_stdin_with_offset_and_strict() {
    let dir = unique_temp_dir("stdin");
    let schemas = schema_file(&dir);
    let schema_arg = schemas.to_str().unwrap();

    let run = |extra: &[&str]| {
        let mut child = Command::new(env!("CARGO_BIN_EXE_binlayout"))
            .args(["--format", "raw", "decode", "-", "--name", "PADDED"])
            .args(["--schema", schema_arg])
            .args(extra)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("decode should start");
        child
            .stdin
            .take()
            .expect("stdin should be piped")
            .write_all(&[0xff, 0xff, 0x07, 0xaa, 0xbb, 0xcc])
            .expect("stdin should accept input");
        child.wait_with_output().expect("decode should finish")
    };

    let output = run(&["--offset", "2"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["id"], 7);
    assert_eq!(json["reserved"], "aabbcc");

    let output = run(&["--offset", "1", "--strict"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("trailing bytes"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn encode_writes_output_file_and_hex() {
    let dir = unique_temp_dir("encode");
    let schemas = schema_file(&dir);
    let out_path = dir.join("out.bin");

    let output = binlayout(&[
        "encode",
        "--name",
        "HEADER",
        "--schema",
        schemas.to_str().unwrap(),
        "--json",
        r#"{"flag": 1, "value": "0x12345678"}"#,
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        std::fs::read(&out_path).unwrap(),
        [0x41, 0x42, 0x01, 0x78, 0x56, 0x34, 0x12]
    );

    let output = binlayout(&[
        "--format",
        "json",
        "encode",
        "--name",
        "PADDED",
        "--schema",
        schemas.to_str().unwrap(),
        "--json",
        r#"{"id": 7, "reserved": "aabbcc"}"#,
        "--preserve-padding",
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["size"], 4);
    assert_eq!(json["hex"], "07aabbcc");

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn encode_out_of_range_fails() {
    let dir = unique_temp_dir("range");
    let schemas = schema_file(&dir);

    let output = binlayout(&[
        "encode",
        "--name",
        "HEADER",
        "--schema",
        schemas.to_str().unwrap(),
        "--json",
        r#"{"flag": 256, "value": 0}"#,
    ]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("flag"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn describe_and_schemas_use_builtins() {
    let output = binlayout(&["--format", "json", "describe", "--name", "ELF64_PHDR"]);
    assert!(output.status.success());
    let entries = stdout_json(&output);
    let entries = entries.as_array().expect("describe should print an array");
    assert_eq!(entries.len(), 8);
    assert_eq!(entries[2]["path"], "p_offset");
    assert_eq!(entries[2]["offset"], 8);
    assert_eq!(entries[7]["kind"], "u64");

    let output = binlayout(&["--format", "json", "schemas"]);
    assert!(output.status.success());
    let names: Vec<String> = stdout_json(&output)
        .as_array()
        .expect("schemas should print an array")
        .iter()
        .map(|s| s["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["ELF64", "ELF64_PHDR", "ELF64_SHDR"]);

    let output = binlayout(&["describe", "--name", "PE32"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn schema_dir_comes_from_environment() {
    let dir = unique_temp_dir("env");
    std::fs::write(dir.join("tiny.layout.json"), r#"{"a": "u16", "b": "s8"}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_binlayout"))
        .env("BINLAYOUT_SCHEMA_DIR", &dir)
        .args(["--format", "json", "schemas"])
        .output()
        .expect("binlayout should run");
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json[0]["name"], "tiny");
    assert_eq!(json[0]["size"], 3);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn pattern_create_and_find() {
    let output = binlayout(&["--format", "pretty", "pattern", "create", "20"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "A000A004A008A00cA00g");

    let output = binlayout(&["--format", "pretty", "pattern", "find", "0x63303041"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "12");

    let output = binlayout(&["pattern", "find", "zzzz"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn pattern_honours_json_format() {
    let output = binlayout(&["--format", "json", "pattern", "create", "8"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["length"], 8);
    assert_eq!(json["pattern"], "A000A004");

    let output = binlayout(&["--format", "json", "pattern", "find", "A00c"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["needle"], "A00c");
    assert_eq!(json["offset"], 12);
}
