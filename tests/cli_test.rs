//! Tests for the `cssflip` binary.

#![cfg(feature = "cli")]

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn cssflip() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cssflip"))
}

#[test]
fn test_file_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("app.css");
    let output = dir.path().join("app.rtl.css");
    fs::write(&input, ".a { float: left; padding: 1px 2px 3px 4px }").unwrap();

    let status = cssflip()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        ".a { float: right; padding: 1px 4px 3px 2px }"
    );
}

#[test]
fn test_stdin_to_stdout() {
    let mut child = cssflip()
        .args(["--target-dir", "tb-rl"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b".a { width: 10px }")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), ".a { height: 10px }");
}

#[test]
fn test_options_file_and_flag_override() {
    let dir = TempDir::new().unwrap();
    let options = dir.path().join("options.json");
    fs::write(&options, r#"{"transformEdgeInUrl": true, "targetDir": "tb-rl"}"#).unwrap();
    let input = dir.path().join("in.css");
    fs::write(&input, ".a { background: url(left.png) }").unwrap();

    let output = cssflip()
        .arg("--options")
        .arg(&options)
        .args(["--target-dir", "rl-tb"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        ".a { background: url(right.png) }"
    );
}

#[test]
fn test_charset_input_is_decoded() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("latin1.css");
    fs::write(
        &input,
        b"@charset \"iso-8859-1\"; .a::after { content: \"\xe9\"; float: left }",
    )
    .unwrap();

    let output = cssflip().arg(&input).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "@charset \"iso-8859-1\"; .a::after { content: \"é\"; float: right }"
    );
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = cssflip().arg(dir.path().join("nope.css")).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));
}

#[test]
fn test_bad_options_file_fails() {
    let dir = TempDir::new().unwrap();
    let options = dir.path().join("options.json");
    fs::write(&options, r#"{"targetDir": "sideways"}"#).unwrap();

    let output = cssflip()
        .arg("--options")
        .arg(&options)
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid options"));
}
