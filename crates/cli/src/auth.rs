// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Session state and the operations that change it.
//!
//! [`AuthStore`] is a cheap, cloneable handle. State is published through a
//! `tokio::sync::watch` channel, so views observe it with
//! [`AuthStore::subscribe`] and change it only through the named methods.
//!
//! ```text
//!              login/register            success
//!  Anonymous ──────────────────► Authenticating ──────► Authenticated
//!      ▲                               │                     │
//!      │                               │ failure             │ logout
//!      │                               ▼                     │
//!      └────────── check_auth ──────  Error                  │
//!      └─────────────────────────────────────────────────────┘
//! ```
//!
//! The bearer token lives only in client-side [`Storage`](crate::storage::Storage),
//! never in the published state.

use std::fmt;
use std::sync::Arc;

use dt_core::catalog;
use dt_core::wire::{AuthPayloadNode, UserNode};
use dt_core::{
    AuthPayload, ChangePasswordInput, LoginInput, RegisterInput, UpdateProfileInput, User,
};
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::api::{FetchPolicy, GraphqlClient, Transport, TransportError};
use crate::error::{Error, Result};
use crate::storage::{ACCESS_TOKEN_KEY, SESSION_KEYS, USERNAME_KEY};

/// Message recorded when the session check fails for any reason.
pub const CHECK_AUTH_FAILED: &str = "Failed to check authentication";

/// Where the session believes the user is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

/// Published session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub phase: AuthPhase,
    /// True until the first session check or auth attempt completes.
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState {
            user: None,
            phase: AuthPhase::Anonymous,
            is_loading: true,
            error: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }
}

/// Destination after a session change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/auth/login"),
        }
    }
}

/// Receives redirects issued by the auth store.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Session store over a shared GraphQL client.
pub struct AuthStore<T: Transport> {
    client: Arc<GraphqlClient<T>>,
    navigator: Arc<dyn Navigator>,
    state: Arc<watch::Sender<AuthState>>,
}

impl<T: Transport> Clone for AuthStore<T> {
    fn clone(&self) -> Self {
        AuthStore {
            client: Arc::clone(&self.client),
            navigator: Arc::clone(&self.navigator),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport> AuthStore<T> {
    pub fn new(client: Arc<GraphqlClient<T>>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        AuthStore {
            client,
            navigator,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Sign in with email and password.
    ///
    /// On success the token is persisted and the navigator is sent to
    /// [`Route::Home`]. On failure the message is recorded and the error is
    /// returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let input = LoginInput {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.begin_attempt();
        let result: Result<AuthPayload> = async {
            input.validate()?;
            self.authenticate(&catalog::LOGIN, json!({ "input": input }), "Login failed")
                .await
        }
        .await;
        self.finish_attempt(result)
    }

    /// Create an account and sign in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let input = RegisterInput {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.begin_attempt();
        let result: Result<AuthPayload> = async {
            input.validate()?;
            self.authenticate(
                &catalog::REGISTER,
                json!({ "input": input }),
                "Registration failed",
            )
            .await
        }
        .await;
        self.finish_attempt(result)
    }

    /// End the session. Never fails.
    ///
    /// The server-side cookie clear is best effort; local cleanup always runs.
    pub async fn logout(&self) {
        match self.client.logout().await {
            Ok(resp) if resp.success => tracing::debug!("logout endpoint: {}", resp.message),
            Ok(resp) => tracing::warn!("logout endpoint reported failure: {}", resp.message),
            Err(e) => tracing::warn!("logout request failed: {}", e),
        }

        if let Err(e) = self.client.storage().clear_keys(&SESSION_KEYS) {
            tracing::error!("failed to clear local session: {}", e);
        }
        self.client.reset_cache();

        self.state.send_replace(AuthState {
            is_loading: false,
            ..AuthState::default()
        });
        self.navigator.navigate(Route::Login);
    }

    /// Ask the server who is signed in. Never fails.
    ///
    /// Returns whether a session was confirmed. Repeating the call without
    /// an intervening change yields the same answer and the same state.
    pub async fn check_auth(&self) -> bool {
        let result = self
            .client
            .query_optional::<UserNode>(&catalog::ME, Value::Null, FetchPolicy::NetworkOnly)
            .await;
        match result {
            Ok(Some(node)) => {
                let user = User::from(node);
                self.state.send_modify(|s| {
                    s.user = Some(user);
                    s.phase = AuthPhase::Authenticated;
                    s.is_loading = false;
                    s.error = None;
                });
                true
            }
            Ok(None) => {
                self.state.send_modify(|s| {
                    s.user = None;
                    s.phase = AuthPhase::Anonymous;
                    s.is_loading = false;
                    s.error = None;
                });
                false
            }
            Err(e) => {
                tracing::debug!("session check failed: {}", e);
                self.state.send_modify(|s| {
                    s.user = None;
                    s.phase = AuthPhase::Anonymous;
                    s.is_loading = false;
                    s.error = Some(CHECK_AUTH_FAILED.to_string());
                });
                false
            }
        }
    }

    /// Change the signed-in user's name and/or email.
    pub async fn update_profile(&self, input: UpdateProfileInput) -> Result<User> {
        let result: Result<User> = async {
            self.require_session()?;
            input.validate()?;
            let node: UserNode = self
                .client
                .mutate(&catalog::UPDATE_PROFILE, json!({ "input": input }))
                .await?;
            Ok(User::from(node))
        }
        .await;

        match result {
            Ok(user) => {
                if let Err(e) = self.client.storage().set(USERNAME_KEY, &user.name) {
                    tracing::warn!("failed to store username: {}", e);
                }
                self.state.send_modify(|s| {
                    s.user = Some(user.clone());
                    s.error = None;
                });
                Ok(user)
            }
            Err(e) => Err(self.record_error("updating profile", e)),
        }
    }

    /// Change the signed-in user's password.
    pub async fn change_password(&self, input: ChangePasswordInput) -> Result<()> {
        let result: Result<()> = async {
            self.require_session()?;
            input.validate()?;
            let changed: bool = self
                .client
                .mutate(&catalog::CHANGE_PASSWORD, json!({ "input": input }))
                .await?;
            if changed {
                Ok(())
            } else {
                Err(Error::Refused("change password"))
            }
        }
        .await;

        match result {
            Ok(()) => {
                self.state.send_modify(|s| s.error = None);
                Ok(())
            }
            Err(e) => Err(self.record_error("changing password", e)),
        }
    }

    fn require_session(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::AuthenticationRequired)
        }
    }

    fn begin_attempt(&self) {
        self.state.send_modify(|s| {
            s.phase = AuthPhase::Authenticating;
            s.is_loading = true;
            s.error = None;
        });
    }

    async fn authenticate(
        &self,
        op: &dt_core::Operation,
        variables: Value,
        fallback: &str,
    ) -> Result<AuthPayload> {
        let node: AuthPayloadNode = self.client.mutate(op, variables).await?;
        let payload = node.into_payload().ok_or_else(|| {
            TransportError::Malformed(format!("{} - no data returned", fallback))
        })?;

        if !payload.token.is_empty() {
            self.client.storage().set(ACCESS_TOKEN_KEY, &payload.token)?;
        }
        if let Err(e) = self.client.storage().set(USERNAME_KEY, &payload.user.name) {
            tracing::warn!("failed to store username: {}", e);
        }
        Ok(payload)
    }

    fn finish_attempt(&self, result: Result<AuthPayload>) -> Result<User> {
        match result {
            Ok(payload) => {
                let user = payload.user;
                self.state.send_modify(|s| {
                    s.user = Some(user.clone());
                    s.phase = AuthPhase::Authenticated;
                    s.is_loading = false;
                    s.error = None;
                });
                self.navigator.navigate(Route::Home);
                Ok(user)
            }
            Err(e) => {
                tracing::error!("authentication failed: {}", e);
                self.state.send_modify(|s| {
                    s.phase = AuthPhase::Error;
                    s.is_loading = false;
                    s.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    fn record_error(&self, context: &str, err: Error) -> Error {
        tracing::error!("error {}: {}", context, err);
        self.state.send_modify(|s| s.error = Some(err.to_string()));
        err
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
