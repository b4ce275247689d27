// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::error::ErrorKind;
use crate::storage::{Storage, REFRESH_TOKEN_KEY, TASKS_KEY};
use crate::test_helpers::{harness, signed_in, user_json};
use dt_core::protocol::LogoutResponse;
use yare::parameterized;

fn auth_payload(token: &str) -> Value {
    json!({ "user": user_json("u1", "Ada"), "token": token })
}

#[test]
fn test_initial_state_is_anonymous_and_loading() {
    let h = harness();
    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Anonymous);
    assert!(state.is_loading);
    assert!(!h.auth.is_authenticated());
}

#[parameterized(
    home = { Route::Home, "/" },
    login = { Route::Login, "/auth/login" },
)]
fn test_route_paths(route: Route, path: &str) {
    assert_eq!(route.to_string(), path);
}

// -- login / register ---------------------------------------------------------

#[tokio::test]
async fn test_login_success_persists_token_and_navigates_home() {
    let h = harness();
    h.transport().respond("login", auth_payload("tok-abc"));

    let user = h.auth.login(" ada@example.com ", "secret").await.unwrap();

    assert_eq!(user.name, "Ada");
    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("tok-abc"));
    assert_eq!(h.storage.get(USERNAME_KEY).unwrap().as_deref(), Some("Ada"));
    assert_eq!(h.navigator.routes(), vec![Route::Home]);

    let sent = h.transport().last_request();
    assert_eq!(sent.operation_name, "Login");
    assert_eq!(sent.variables["input"]["email"], "ada@example.com");
}

#[tokio::test]
async fn test_login_without_token_relies_on_cookie() {
    let h = harness();
    h.transport().respond("login", json!({ "user": user_json("u1", "Ada") }));

    h.auth.login("ada@example.com", "secret").await.unwrap();

    assert!(h.auth.is_authenticated());
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_failure_records_error_and_propagates() {
    let h = harness();
    h.transport().respond_errors(&["invalid credentials"]);

    let err = h.auth.login("ada@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Error);
    assert_eq!(state.error.as_deref(), Some("invalid credentials"));
    assert!(!state.is_loading);
    assert!(h.navigator.routes().is_empty());
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_without_user_is_malformed() {
    let h = harness();
    h.transport().respond("login", json!({ "token": "tok" }));

    let err = h.auth.login("ada@example.com", "secret").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(err.to_string().contains("Login failed"));
    assert_eq!(h.auth.state().phase, AuthPhase::Error);
}

#[parameterized(
    no_email = { "", "secret" },
    no_password = { "ada@example.com", "" },
)]
fn test_login_validates_before_request(email: &str, password: &str) {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    rt.block_on(async {
        let h = harness();
        let err = h.auth.login(email, password).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(h.transport().request_count(), 0);
        assert_eq!(h.auth.state().phase, AuthPhase::Error);
    });
}

#[tokio::test]
async fn test_register_signs_in() {
    let h = harness();
    h.transport().respond("register", auth_payload("tok-new"));

    let user = h
        .auth
        .register("Ada", "ada@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert!(h.auth.is_authenticated());
    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("tok-new"));
    assert_eq!(h.navigator.routes(), vec![Route::Home]);
    assert_eq!(h.transport().last_request().operation_name, "Register");
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let h = harness();
    let err = h
        .auth
        .register("Ada", "not-an-email", "secret")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(h.transport().request_count(), 0);
}

// -- logout ---------------------------------------------------------------------

fn seed_session(h: &crate::test_helpers::Harness) {
    for key in SESSION_KEYS {
        h.storage.set(key, "x").unwrap();
    }
    h.storage.set("theme", "dark").unwrap();
}

#[tokio::test]
async fn test_logout_clears_session_and_navigates_to_login() {
    let h = signed_in().await;
    seed_session(&h);

    h.auth.logout().await;

    assert_eq!(h.transport().logout_calls(), 1);
    for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY, TASKS_KEY] {
        assert_eq!(h.storage.get(key).unwrap(), None, "{key} should be cleared");
    }
    assert_eq!(h.storage.get("theme").unwrap().as_deref(), Some("dark"));
    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Anonymous);
    assert_eq!(state.user, None);
    assert!(!state.is_loading);
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_logout_survives_server_failure() {
    let h = signed_in().await;
    seed_session(&h);
    h.transport()
        .set_logout_result(Err(TransportError::Network("connection refused".into())));

    h.auth.logout().await;

    assert_eq!(h.storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(!h.auth.is_authenticated());
    assert_eq!(h.navigator.routes(), vec![Route::Login]);
}

#[tokio::test]
async fn test_logout_survives_unsuccessful_envelope() {
    let h = signed_in().await;
    seed_session(&h);
    h.transport().set_logout_result(Ok(LogoutResponse {
        success: false,
        message: "Failed to logout".into(),
    }));

    h.auth.logout().await;

    assert_eq!(h.storage.get(TASKS_KEY).unwrap(), None);
    assert_eq!(h.auth.state().phase, AuthPhase::Anonymous);
}

#[tokio::test]
async fn test_logout_resets_query_cache() {
    let h = signed_in().await;
    h.transport().respond("me", user_json("u1", "Ada"));
    h.auth.check_auth().await;
    assert!(h.client.cached_len() > 0);

    h.auth.logout().await;

    assert_eq!(h.client.cached_len(), 0);
}

// -- check_auth -----------------------------------------------------------------

#[tokio::test]
async fn test_check_auth_with_session() {
    let h = signed_in().await;
    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Authenticated);
    assert_eq!(state.user.unwrap().name, "Ada");
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_check_auth_without_session() {
    let h = harness();
    h.transport().respond("me", Value::Null);

    assert!(!h.auth.check_auth().await);

    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Anonymous);
    assert_eq!(state.error, None);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn test_check_auth_failure_is_swallowed() {
    let h = signed_in().await;
    h.transport().fail(TransportError::Network("offline".into()));

    assert!(!h.auth.check_auth().await);

    let state = h.auth.state();
    assert_eq!(state.phase, AuthPhase::Anonymous);
    assert_eq!(state.user, None);
    assert_eq!(state.error.as_deref(), Some(CHECK_AUTH_FAILED));
}

#[tokio::test]
async fn test_check_auth_is_idempotent() {
    let h = harness();
    h.transport().respond("me", user_json("u1", "Ada"));
    h.transport().respond("me", user_json("u1", "Ada"));

    let first = h.auth.check_auth().await;
    let after_first = h.auth.state();
    let second = h.auth.check_auth().await;

    assert_eq!(first, second);
    assert_eq!(h.auth.state(), after_first);
    assert_eq!(h.transport().request_count(), 2);
}

// -- profile --------------------------------------------------------------------

#[tokio::test]
async fn test_update_profile_replaces_user() {
    let h = signed_in().await;
    h.transport().respond("updateProfile", user_json("u1", "Grace"));

    let user = h
        .auth
        .update_profile(UpdateProfileInput {
            name: Some("Grace".into()),
            email: None,
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Grace");
    assert_eq!(h.auth.user().unwrap().name, "Grace");
    assert_eq!(h.storage.get(USERNAME_KEY).unwrap().as_deref(), Some("Grace"));
    assert_eq!(
        h.transport().last_request().variables["input"],
        json!({ "name": "Grace" })
    );
}

#[tokio::test]
async fn test_update_profile_requires_session() {
    let h = harness();
    let err = h
        .auth
        .update_profile(UpdateProfileInput {
            name: Some("Grace".into()),
            email: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(h.transport().request_count(), 0);
}

#[tokio::test]
async fn test_change_password() {
    let h = signed_in().await;
    h.transport().respond("changePassword", json!(true));

    h.auth
        .change_password(ChangePasswordInput {
            current_password: "old".into(),
            new_password: "new".into(),
        })
        .await
        .unwrap();

    let sent = h.transport().last_request();
    assert_eq!(sent.variables["input"]["currentPassword"], "old");
    assert_eq!(sent.variables["input"]["newPassword"], "new");
}

#[tokio::test]
async fn test_change_password_refused() {
    let h = signed_in().await;
    h.transport().respond("changePassword", json!(false));

    let err = h
        .auth
        .change_password(ChangePasswordInput {
            current_password: "old".into(),
            new_password: "new".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Refused(_)));
    assert_eq!(h.auth.state().error.as_deref(), Some("server refused to change password"));
    assert!(h.auth.is_authenticated());
}
