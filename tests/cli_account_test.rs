//! Integration tests for account registration, login, and sessions.
//!
//! These tests verify the auth commands through the CLI:
//! - `ep register` creates an account and logs in
//! - duplicate usernames/emails are rejected
//! - `ep login` / `ep logout` / `ep whoami` manage the session
//! - passwords never appear in output or the action log

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Register Tests ===

#[test]
fn test_register_json() {
    let env = TestEnv::new();

    env.ep()
        .args(["register", "alice", "a@x.com", "--password", "pw1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\":\"alice\""))
        .stdout(predicate::str::contains("\"email\":\"a@x.com\""))
        .stdout(predicate::str::contains("\"id\":\"epu-"));
}

#[test]
fn test_register_human() {
    let env = TestEnv::new();

    env.ep()
        .args(["-H", "register", "alice", "a@x.com", "--password", "pw1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created"))
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn test_register_never_prints_password() {
    let env = TestEnv::new();

    env.ep()
        .args(["register", "alice", "a@x.com", "--password", "sup3r-secret-pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sup3r-secret-pw").not());
}

#[test]
fn test_register_duplicate_username() {
    let env = TestEnv::with_alice();

    env.ep()
        .args(["register", "alice", "b@x.com", "--password", "pw2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username already exists"));
}

#[test]
fn test_register_duplicate_email() {
    let env = TestEnv::with_alice();

    env.ep()
        .args(["register", "bob", "a@x.com", "--password", "pw2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Email already registered"));
}

#[test]
fn test_register_logs_in() {
    let env = TestEnv::with_alice();

    env.ep()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\":\"alice\""));
}

// === Login Tests ===

#[test]
fn test_login_with_username() {
    let env = TestEnv::with_alice();
    env.ep().args(["logout"]).assert().success();

    env.ep()
        .args(["login", "alice", "--password", "pw1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\":\"alice\""));
}

#[test]
fn test_login_with_email() {
    let env = TestEnv::with_alice();
    env.ep().args(["logout"]).assert().success();

    env.ep()
        .args(["login", "a@x.com", "--password", "pw1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\":\"alice\""));
}

#[test]
fn test_login_wrong_password() {
    let env = TestEnv::with_alice();

    env.ep()
        .args(["login", "alice", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[test]
fn test_login_unknown_user() {
    let env = TestEnv::new();

    env.ep()
        .args(["login", "nobody", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
}

// === Session Tests ===

#[test]
fn test_whoami_logged_out() {
    let env = TestEnv::new();

    env.ep()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"account\":null"));

    env.ep()
        .args(["-H", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_clears_session() {
    let env = TestEnv::with_alice();

    env.ep()
        .args(["logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"was_logged_in\":true"));

    env.ep()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"account\":null"));

    // Logging out again reports there was no session
    env.ep()
        .args(["logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"was_logged_in\":false"));
}

// === Action Log Tests ===

#[test]
fn test_action_log_redacts_password() {
    let env = TestEnv::new();

    env.ep()
        .args(["register", "alice", "a@x.com", "--password", "sup3r-secret-pw"])
        .assert()
        .success();

    let log = std::fs::read_to_string(env.data_path().join("action.log")).unwrap();
    assert!(log.contains("\"command\":\"register\""));
    assert!(log.contains("[REDACTED]"));
    assert!(!log.contains("sup3r-secret-pw"));
}

#[test]
fn test_action_log_records_failures() {
    let env = TestEnv::with_alice();

    env.ep()
        .args(["login", "alice", "--password", "wrong"])
        .assert()
        .failure();

    let log = std::fs::read_to_string(env.data_path().join("action.log")).unwrap();
    assert!(log.contains("\"success\":false"));
    assert!(log.contains("Invalid credentials"));
}

#[test]
fn test_action_log_disabled_by_env() {
    let env = TestEnv::new();

    env.ep()
        .env("EP_ACTION_LOG", "0")
        .args(["register", "alice", "a@x.com", "--password", "pw1"])
        .assert()
        .success();

    assert!(!env.data_path().join("action.log").exists());
}
