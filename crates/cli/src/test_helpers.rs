// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a scripted transport and a wired-up store harness.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use dt_core::protocol::{GraphQLError, GraphQLRequest, GraphQLResponse, LogoutResponse};
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::api::{GraphqlClient, Transport, TransportError, TransportResult};
use crate::auth::{AuthStore, Navigator, Route};
use crate::commands::App;
use crate::storage::{MemoryStorage, Storage};
use crate::store::{DataStore, StoreState};

/// A request as seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct Recorded {
    pub request: GraphQLRequest,
    pub bearer: Option<String>,
    /// The store's loading flag at the moment the request went out.
    pub loading: Option<bool>,
}

/// Scripted transport: answers requests from a queue and records them.
///
/// An empty queue answers with a network error.
pub struct MockTransport {
    responses: Mutex<VecDeque<TransportResult<GraphQLResponse>>>,
    requests: Mutex<Vec<Recorded>>,
    logout_result: Mutex<Option<TransportResult<LogoutResponse>>>,
    logout_calls: Mutex<usize>,
    probe: Mutex<Option<watch::Receiver<StoreState>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            logout_result: Mutex::new(None),
            logout_calls: Mutex::new(0),
            probe: Mutex::new(None),
        }
    }

    /// Queue a successful payload under `field`.
    pub fn respond(&self, field: &str, value: Value) {
        self.push(Ok(GraphQLResponse::with_data(field, value)));
    }

    /// Queue a response carrying only GraphQL errors.
    pub fn respond_errors(&self, messages: &[&str]) {
        let errors = messages.iter().map(|m| GraphQLError::new(*m)).collect();
        self.push(Ok(GraphQLResponse::with_errors(errors)));
    }

    /// Queue a raw response.
    pub fn push(&self, result: TransportResult<GraphQLResponse>) {
        self.responses.lock().unwrap().push_back(result);
    }

    /// Queue a transport-level failure.
    pub fn fail(&self, error: TransportError) {
        self.push(Err(error));
    }

    pub fn set_logout_result(&self, result: TransportResult<LogoutResponse>) {
        *self.logout_result.lock().unwrap() = Some(result);
    }

    /// Record the store's loading flag on every request.
    pub fn watch_loading(&self, rx: watch::Receiver<StoreState>) {
        *self.probe.lock().unwrap() = Some(rx);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Operation names in request order.
    pub fn operation_names(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.request.operation_name)
            .collect()
    }

    pub fn last_request(&self) -> GraphQLRequest {
        self.requests().pop().expect("no request was sent").request
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    pub fn logout_calls(&self) -> usize {
        *self.logout_calls.lock().unwrap()
    }
}

impl Transport for MockTransport {
    fn execute(
        &self,
        request: GraphQLRequest,
        bearer: Option<String>,
    ) -> Pin<Box<dyn Future<Output = TransportResult<GraphQLResponse>> + Send + '_>> {
        let loading = self
            .probe
            .lock()
            .unwrap()
            .as_ref()
            .map(|rx| rx.borrow().loading);
        self.requests.lock().unwrap().push(Recorded {
            request,
            bearer,
            loading,
        });
        let result = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())));
        Box::pin(async move { result })
    }

    fn logout(&self) -> Pin<Box<dyn Future<Output = TransportResult<LogoutResponse>> + Send + '_>> {
        *self.logout_calls.lock().unwrap() += 1;
        let result = self.logout_result.lock().unwrap().take().unwrap_or_else(|| {
            Ok(LogoutResponse {
                success: true,
                message: "Logged out successfully".to_string(),
            })
        });
        Box::pin(async move { result })
    }
}

/// Navigator that remembers every route it was sent to.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Everything a store test needs, sharing one mock transport.
pub struct Harness {
    pub client: Arc<GraphqlClient<MockTransport>>,
    pub storage: Arc<MemoryStorage>,
    pub navigator: Arc<RecordingNavigator>,
    pub auth: AuthStore<MockTransport>,
    pub data: DataStore<MockTransport>,
}

impl Harness {
    pub fn transport(&self) -> &MockTransport {
        self.client.transport()
    }
}

/// A harness with no session.
pub fn harness() -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let shared: Arc<dyn Storage> = storage.clone();
    let client = Arc::new(GraphqlClient::new(MockTransport::new(), shared));
    let navigator = Arc::new(RecordingNavigator::default());
    let auth = AuthStore::new(Arc::clone(&client), navigator.clone());
    let data = DataStore::new(Arc::clone(&client), auth.clone());
    Harness {
        client,
        storage,
        navigator,
        auth,
        data,
    }
}

/// A harness whose auth store has confirmed a session.
///
/// The confirming request is cleared from the transport's log.
pub async fn signed_in() -> Harness {
    let h = harness();
    h.storage.set(crate::storage::ACCESS_TOKEN_KEY, "tok-1").unwrap();
    h.transport().respond("me", user_json("u1", "Ada"));
    assert!(h.auth.check_auth().await);
    h.transport().clear_requests();
    h
}

/// A command-layer view of the harness stores, without color.
pub fn app(h: &Harness) -> App<MockTransport> {
    App::new(h.auth.clone(), h.data.clone(), false)
}

/// Queue the session confirmation that data commands start with.
pub fn expect_session(h: &Harness) {
    h.transport().respond("me", user_json("u1", "Ada"));
}

pub fn user_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z"
    })
}

pub fn category_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

pub fn task_json(id: &str, title: &str, category_id: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "status": "TODO",
        "priority": "MEDIUM",
        "dueDate": null,
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z",
        "category": { "id": category_id, "name": "Development" },
        "tags": []
    })
}
