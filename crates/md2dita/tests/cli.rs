/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 */

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn md2dita(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_md2dita"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn md2dita");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for md2dita")
}

#[test]
fn test_stdin_to_xml() {
    let output = md2dita(&[], b"\xEF\xBB\xBF# Hello\n\nWorld.\n");
    assert!(output.status.success());
    let xml = String::from_utf8(output.stdout).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<topic class=\"- topic/topic \" id=\"hello\">"));
    assert!(xml.contains("</title><body class=\"- topic/body \"><p class=\"- topic/p \">World.</p></body>"));
}

#[test]
fn test_id_from_metadata_flag() {
    let input = b"---\nid: from-yaml\n---\n\n# Hello\n";
    let plain = String::from_utf8(md2dita(&["-"], input).stdout).unwrap();
    assert!(plain.contains("id=\"hello\""));
    assert!(plain.contains("name=\"id\" value=\"from-yaml\""));

    let flagged = String::from_utf8(md2dita(&["--id-from-metadata"], input).stdout).unwrap();
    assert!(flagged.contains("id=\"from-yaml\""));
    assert!(!flagged.contains("name=\"id\""));
}

#[test]
fn test_events_output() {
    let output = md2dita(&["--events"], b"Text\n");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.last(), Some(&"{\"event\":\"end-document\"}"));
    assert!(lines.contains(&"{\"event\":\"characters\",\"text\":\"Text\"}"));
}

#[test]
fn test_file_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.md");
    let output = dir.path().join("out.dita");
    std::fs::write(&input, "# File\n").unwrap();

    let result = md2dita(
        &[input.to_str().unwrap(), "-o", output.to_str().unwrap()],
        b"",
    );
    assert!(result.status.success());
    assert!(result.stdout.is_empty());
    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<title class=\"- topic/title \" outputclass=\"h1\">File</title>"));
}

#[test]
fn test_unknown_encoding_fails() {
    let output = md2dita(&["--encoding", "no-such-encoding"], b"text\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no-such-encoding"));
}
