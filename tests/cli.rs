//! Run the `confcomp` binary: exit codes, diagnostics, output files.

use std::path::Path;
use std::process::{Command, Output};

fn confcomp(args: &[&Path], extra: &[&str], home: Option<&Path>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_confcomp"));
    cmd.args(extra).args(args).env_remove("RUST_LOG");
    match home {
        Some(h) => cmd.env("HOME", h),
        None => cmd.env_remove("HOME"),
    };
    cmd.output().expect("run confcomp")
}

fn write(path: &Path, text: &str) {
    std::fs::write(path, text).expect("write input");
}

#[test]
fn compiles_to_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("out.bin");
    write(&input, "snappysense-compiled-config 1.0.0\nset enabled 1\nsave\n");

    let out = confcomp(&[input.as_path(), output.as_path()], &[], None);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        std::fs::read(&output).expect("output"),
        vec![1, 1, 0, 0, 0, 3, 0, 1, 0, 0, 0, 2, 1]
    );
    assert!(out.stdout.is_empty());
}

#[test]
fn wrong_argument_count_is_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    write(&input, "snappysense-compiled-config 1.0.0\nsave\n");

    let out = confcomp(&[input.as_path()], &[], None);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));

    let output = dir.path().join("out.bin");
    let extra = dir.path().join("extra");
    let out = confcomp(
        &[input.as_path(), output.as_path(), extra.as_path()],
        &[],
        None,
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn version_error_leaves_no_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("out.bin");
    write(&input, "snappysense-compiled-config 2.0.0\nsave\n");

    let out = confcomp(&[input.as_path(), output.as_path()], &[], None);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Line 1: Unknown version"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn failure_keeps_existing_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("out.bin");
    std::fs::write(&output, [9u8, 9, 9]).expect("seed output");
    write(&input, "snappysense-compiled-config 1.0.0\nset enabled 5\nsave\n");

    let out = confcomp(&[input.as_path(), output.as_path()], &[], None);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Line 2: Out of range for enabled"));
    assert_eq!(std::fs::read(&output).expect("output"), vec![9, 9, 9]);
}

#[test]
fn tilde_without_home() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("out.bin");
    write(
        &input,
        "snappysense-compiled-config 1.0.0\nset mqtt-root-cert @~/missing-file\nsave\n",
    );

    let out = confcomp(&[input.as_path(), output.as_path()], &[], None);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("$HOME not defined"));
    assert!(!output.exists());
}

#[test]
fn tilde_with_home() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("ssid.txt"), "attic").expect("write value");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("out.bin");
    write(
        &input,
        "snappysense-compiled-config 1.0.0\nset ssid2 @~/ssid.txt\nend\n",
    );

    let out = confcomp(&[input.as_path(), output.as_path()], &[], Some(dir.path()));
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        std::fs::read(&output).expect("output"),
        vec![1, 1, 0, 0, 0, 4, 3, 5, 0, b'a', b't', b't', b'i', b'c', 2, 0]
    );
}

#[test]
fn check_and_listing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("out.bin");
    write(
        &input,
        "snappysense-compiled-config 1.0.0\nclear\nset upload-interval 7200\nsave\n",
    );

    let out = confcomp(&[input.as_path(), output.as_path()], &["--check", "--listing"], None);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(!output.exists(), "--check must not write");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("START version=1.0.0 clear=1"), "{}", stdout);
    assert!(stdout.contains("SETI  upload-interval[2] = 7200"), "{}", stdout);
    assert!(stdout.contains("00000b  STOP  save=1"), "{}", stdout);
}

#[test]
fn output_failure_names_only_the_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("in.conf");
    let output = dir.path().join("missing-dir").join("out.bin");
    write(&input, "snappysense-compiled-config 1.0.0\nend\n");

    let out = confcomp(&[input.as_path(), output.as_path()], &[], None);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("confcomp: Could not create"), "stderr: {}", stderr);
    assert!(!stderr.contains("in.conf"), "stderr: {}", stderr);
}
