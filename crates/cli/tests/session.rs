// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn help_lists_command_groups() {
    let temp = TempDir::new().unwrap();
    dotask(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("category"))
        .stdout(predicate::str::contains("login"));
}

#[test]
fn task_list_without_session_needs_login() {
    let temp = TempDir::new().unwrap();
    dotask(&temp)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("authentication required"))
        .stderr(predicate::str::contains("dotask login"));
}

#[test]
fn whoami_unreachable_server_is_signed_out() {
    let temp = TempDir::new().unwrap();
    write_session(&temp, &[("accessToken", "tok")]);
    dotask(&temp)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("authentication required"));
}

#[test]
fn logout_clears_local_session_even_if_server_is_down() {
    let temp = TempDir::new().unwrap();
    write_session(
        &temp,
        &[
            ("accessToken", "tok"),
            ("refreshToken", "r"),
            ("username", "Ada"),
            ("tasks", "[]"),
            ("theme", "dark"),
        ],
    );

    dotask(&temp)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    let session = read_session(&temp);
    assert!(session.get("accessToken").is_none());
    assert!(session.get("refreshToken").is_none());
    assert!(session.get("username").is_none());
    assert!(session.get("tasks").is_none());
    assert_eq!(session["theme"], "dark");
}

#[test]
fn login_with_blank_password_fails_before_network() {
    let temp = TempDir::new().unwrap();
    dotask(&temp)
        .args(["login", "ada@example.com"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Password"));
}

#[test]
fn unknown_status_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    dotask(&temp)
        .args(["task", "list", "-s", "blocked"])
        .assert()
        .code(2);
}
