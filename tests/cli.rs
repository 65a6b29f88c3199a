//! CLI integration tests for the `nk` binary.
//!
//! These tests verify that:
//! - Key generation prints a seed (and public key when asked)
//! - Vanity search honours its prefix and budget
//! - Sign / verify / show-public work against key files
//! - Configuration errors exit non-zero with a message

#![allow(deprecated)] // Command::cargo_bin is deprecated but still works

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn nk() -> Command {
    let mut cmd = Command::cargo_bin("nk").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Runs `nk --gen <key_type> --pubout` and returns (seed, public key).
fn generate(key_type: &str) -> (String, String) {
    let output = nk()
        .args(["--gen", key_type, "--pubout"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    let seed = lines.next().unwrap().to_string();
    let public = lines.next().unwrap().to_string();
    (seed, public)
}

#[test]
fn test_generate_prints_seed_only() {
    nk().args(["--gen", "operator"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SO").and(predicate::str::contains("\n").count(1)));
}

#[test]
fn test_generate_with_pubout() {
    for (key_type, seed_prefix, public_prefix) in [
        ("user", "SU", "U"),
        ("account", "SA", "A"),
        ("server", "SN", "N"),
        ("cluster", "SC", "C"),
        ("operator", "SO", "O"),
    ] {
        let (seed, public) = generate(key_type);
        assert!(seed.starts_with(seed_prefix), "{key_type}: {seed}");
        assert!(public.starts_with(public_prefix), "{key_type}: {public}");
    }
}

#[test]
fn test_unknown_key_type() {
    nk().args(["--gen", "wizard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key type"));
}

#[test]
fn test_vanity_prefix() {
    let output = nk()
        .args(["--gen", "user", "--pre", "a", "--maxpre", "100000", "-q"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("SU"));
    assert!(lines[1].starts_with("UA"), "{}", lines[1]);
}

#[test]
fn test_vanity_exhaustion() {
    nk().args([
        "--gen",
        "user",
        "--pre",
        "AAAAAAAAAAAAAAAAAAAA",
        "--maxpre",
        "20",
        "-q",
    ])
    .assert()
    .code(1)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Failed to generate prefix after 20 attempts"));
}

#[test]
fn test_vanity_unencodable_prefix() {
    nk().args(["--gen", "user", "--pre", "derek1", "-q"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Can not generate base32 encoded strings to match 'DEREK1'",
        ));
}

#[test]
fn test_entropy_file_is_deterministic() {
    let entropy = write_temp("0123456789abcdef0123456789abcdef");
    let path = entropy.path().to_str().unwrap();

    let first = nk()
        .args(["--gen", "account", "--pubout", "-e", path])
        .output()
        .unwrap();
    let second = nk()
        .args(["--gen", "account", "--pubout", "-e", path])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_short_entropy_file() {
    let entropy = write_temp("too short");
    nk().args(["--gen", "user", "-e", entropy.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error reading entropy"));
}

#[test]
fn test_entropy_without_gen() {
    nk().args(["-e", "/dev/urandom"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Entropy file only used"));
}

#[test]
fn test_sign_verify_and_show_public() {
    let (seed, public) = generate("user");
    let inkey = write_temp(&format!("# my key\n{}\n", seed));
    let pubin = write_temp(&format!("{}\n", public));
    let content = write_temp("hello world");

    let output = nk()
        .args(["--sign", content.path().to_str().unwrap()])
        .args(["--inkey", inkey.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let sig = write_temp(&String::from_utf8(output.stdout).unwrap());

    nk().args(["--verify", content.path().to_str().unwrap()])
        .args(["--pubin", pubin.path().to_str().unwrap()])
        .args(["--sig", sig.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout("Verified OK\n");

    nk().args(["--verify", content.path().to_str().unwrap()])
        .args(["--inkey", inkey.path().to_str().unwrap()])
        .args(["--sig", sig.path().to_str().unwrap()])
        .assert()
        .success();

    nk().args(["--inkey", inkey.path().to_str().unwrap(), "--pubout"])
        .assert()
        .success()
        .stdout(format!("{}\n", public));
}

#[test]
fn test_verify_fails_on_other_content() {
    let (seed, public) = generate("account");
    let inkey = write_temp(&seed);
    let pubin = write_temp(&public);
    let content = write_temp("original");
    let other = write_temp("forged");

    let output = nk()
        .args(["--sign", content.path().to_str().unwrap()])
        .args(["--inkey", inkey.path().to_str().unwrap()])
        .output()
        .unwrap();
    let sig = write_temp(&String::from_utf8(output.stdout).unwrap());

    nk().args(["--verify", other.path().to_str().unwrap()])
        .args(["--pubin", pubin.path().to_str().unwrap()])
        .args(["--sig", sig.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_sign_requires_inkey() {
    let content = write_temp("data");
    nk().args(["--sign", content.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Sign requires a seed/private key"));
}

#[test]
fn test_key_not_found() {
    let inkey = write_temp("nothing useful\n");
    nk().args(["--inkey", inkey.path().to_str().unwrap(), "--pubout"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find a valid key"));
}

#[test]
fn test_no_mode_prints_usage() {
    nk().assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: nk"));
}
