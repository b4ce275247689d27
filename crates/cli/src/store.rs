// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Data-sync store for tasks and categories.
//!
//! [`DataStore`] mirrors the server's task and category collections. Each
//! operation issues exactly one request and then reshapes the response into
//! the local collection:
//!
//! | operation      | effect on success                         |
//! |----------------|-------------------------------------------|
//! | list           | replaces the collection                   |
//! | create         | appends                                   |
//! | update         | replaces the element with the same id     |
//! | delete         | removes the element with the same id      |
//! | status change  | replaces status and `updated_at` only     |
//!
//! On failure the message is recorded in [`StoreState::error`] and the error
//! propagates. Authentication failures also clear the affected collection,
//! and for tasks the cached copy in storage.
//!
//! Every change to the task collection made by a load or a mutation is
//! written back to the `tasks` storage key.
//! Concurrent calls race over the collections; the last response wins.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use dt_core::catalog;
use dt_core::wire::{CategoryNode, TaskNode, TaskStatusNode};
use dt_core::{validate, Category, CreateTaskInput, Task, TaskStatus, UpdateTaskInput};
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::api::{FetchPolicy, GraphqlClient, Transport};
use crate::auth::AuthStore;
use crate::error::{Error, Result};
use crate::storage::TASKS_KEY;

/// Message recorded when [`DataStore::initialize_data`] fails.
pub const INITIAL_LOAD_FAILED: &str = "Failed to load initial data";

/// Published collections and flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    /// True while any store call is in flight.
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
enum Collection {
    Tasks,
    Categories,
}

/// Keeps `loading` raised for the lifetime of one store call.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<StoreState>,
    in_flight: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<StoreState>, in_flight: &'a AtomicUsize) -> Self {
        state.send_modify(|s| {
            in_flight.fetch_add(1, Ordering::SeqCst);
            s.loading = true;
            s.error = None;
        });
        LoadingGuard { state, in_flight }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let in_flight = self.in_flight;
        self.state.send_modify(|s| {
            let remaining = in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
            s.loading = remaining > 0;
        });
    }
}

/// Task and category store over a shared GraphQL client.
pub struct DataStore<T: Transport> {
    client: Arc<GraphqlClient<T>>,
    auth: AuthStore<T>,
    state: Arc<watch::Sender<StoreState>>,
    in_flight: Arc<AtomicUsize>,
}

impl<T: Transport> Clone for DataStore<T> {
    fn clone(&self) -> Self {
        DataStore {
            client: Arc::clone(&self.client),
            auth: self.auth.clone(),
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<T: Transport> DataStore<T> {
    pub fn new(client: Arc<GraphqlClient<T>>, auth: AuthStore<T>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        DataStore {
            client,
            auth,
            state: Arc::new(state),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Empty both collections and clear the error.
    pub fn reset(&self) {
        self.state.send_modify(|s| {
            s.tasks.clear();
            s.categories.clear();
            s.error = None;
        });
    }

    // -- tasks ---------------------------------------------------------------

    /// Replace the task collection with the server's list.
    pub async fn load_tasks(&self) -> Result<Vec<Task>> {
        self.require_session()?;
        let _loading = self.begin();
        let result = self
            .client
            .query::<Vec<TaskNode>>(&catalog::GET_TASKS, Value::Null, FetchPolicy::NetworkOnly)
            .await;
        match result {
            Ok(nodes) => {
                let tasks: Vec<Task> = nodes.into_iter().map(Task::from).collect();
                self.state.send_modify(|s| s.tasks = tasks.clone());
                self.persist_tasks();
                Ok(tasks)
            }
            Err(e) => Err(self.fail("loading tasks", Collection::Tasks, e.into())),
        }
    }

    /// Fetch one task, answering from the query cache when possible.
    ///
    /// If the task is already in the collection it is replaced; otherwise
    /// the collection is left as is.
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        self.require_session()?;
        let _loading = self.begin();
        let result = self
            .client
            .query_optional::<TaskNode>(
                &catalog::GET_TASK,
                json!({ "id": id }),
                FetchPolicy::CacheFirst,
            )
            .await
            .map_err(Error::from)
            .and_then(|node| {
                node.map(Task::from)
                    .ok_or_else(|| Error::TaskNotFound(id.to_string()))
            });
        match result {
            Ok(task) => {
                self.state.send_modify(|s| replace_by_id(&mut s.tasks, &task.id, &task, |t| &t.id));
                Ok(task)
            }
            Err(e) => Err(self.fail("fetching task", Collection::Tasks, e)),
        }
    }

    /// Create a task and append it to the collection.
    ///
    /// An empty `category_id` falls back to the first loaded category.
    pub async fn create_task(&self, mut input: CreateTaskInput) -> Result<Task> {
        self.require_session()?;
        if input.category_id.is_empty() {
            let first = self.state.borrow().categories.first().map(|c| c.id.clone());
            match first {
                Some(id) => input.category_id = id,
                None => return Err(self.reject(Error::NoCategory)),
            }
        }
        if let Err(e) = input.validate() {
            return Err(self.reject(e.into()));
        }

        let _loading = self.begin();
        let result = self
            .client
            .mutate::<TaskNode>(&catalog::CREATE_TASK, json!({ "input": input }))
            .await;
        match result {
            Ok(node) => {
                let task = Task::from(node);
                self.state.send_modify(|s| s.tasks.push(task.clone()));
                self.persist_tasks();
                Ok(task)
            }
            Err(e) => Err(self.fail("creating task", Collection::Tasks, e.into())),
        }
    }

    /// Apply a partial update and replace the matching task.
    pub async fn update_task(&self, id: &str, input: UpdateTaskInput) -> Result<Task> {
        self.require_session()?;
        if input.is_empty() {
            return Err(self.reject(Error::NothingToUpdate));
        }
        if let Err(e) = input.validate() {
            return Err(self.reject(e.into()));
        }

        let _loading = self.begin();
        let result = self
            .client
            .mutate::<TaskNode>(&catalog::UPDATE_TASK, json!({ "id": id, "input": input }))
            .await;
        match result {
            Ok(node) => {
                let task = Task::from(node);
                self.state.send_modify(|s| replace_by_id(&mut s.tasks, id, &task, |t| &t.id));
                self.persist_tasks();
                Ok(task)
            }
            Err(e) => Err(self.fail("updating task", Collection::Tasks, e.into())),
        }
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.require_session()?;
        let _loading = self.begin();
        let result = self
            .client
            .mutate::<bool>(&catalog::DELETE_TASK, json!({ "id": id }))
            .await
            .map_err(Error::from)
            .and_then(|deleted| if deleted { Ok(()) } else { Err(Error::Refused("delete task")) });
        match result {
            Ok(()) => {
                self.state.send_modify(|s| s.tasks.retain(|t| t.id != id));
                self.persist_tasks();
                Ok(())
            }
            Err(e) => Err(self.fail("deleting task", Collection::Tasks, e)),
        }
    }

    /// Move a task to `status`.
    ///
    /// Only `status` and `updated_at` of the matching element change.
    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        self.require_session()?;
        let _loading = self.begin();
        let result = self
            .client
            .mutate::<TaskStatusNode>(
                &catalog::UPDATE_TASK_STATUS,
                json!({ "id": id, "status": status }),
            )
            .await;
        match result {
            Ok(node) => {
                let now = Utc::now();
                let mut updated = None;
                self.state.send_modify(|s| {
                    if let Some(task) = s.tasks.iter_mut().find(|t| t.id == id) {
                        *task = node.apply_to(task, status, now);
                        updated = Some(task.clone());
                    }
                });
                let task = match updated {
                    Some(task) => task,
                    None => {
                        let base = Task::from(TaskNode {
                            id: Some(id.to_string()),
                            ..TaskNode::default()
                        });
                        node.apply_to(&base, status, now)
                    }
                };
                self.persist_tasks();
                Ok(task)
            }
            Err(e) => Err(self.fail("updating task status", Collection::Tasks, e.into())),
        }
    }

    /// Seed the task collection from client-side storage.
    ///
    /// Returns the number of tasks restored. A missing or unreadable entry
    /// restores nothing.
    pub fn restore_cached_tasks(&self) -> usize {
        let raw = match self.client.storage().get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(e) => {
                tracing::warn!("failed to read cached tasks: {}", e);
                return 0;
            }
        };
        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                let count = tasks.len();
                self.state.send_modify(|s| s.tasks = tasks);
                count
            }
            Err(e) => {
                tracing::warn!("ignoring corrupt task cache: {}", e);
                0
            }
        }
    }

    // -- categories ----------------------------------------------------------

    /// Replace the category collection with the server's list.
    pub async fn load_categories(&self) -> Result<Vec<Category>> {
        let _loading = self.begin();
        let result = self
            .client
            .query::<Vec<CategoryNode>>(
                &catalog::GET_CATEGORIES,
                Value::Null,
                FetchPolicy::NetworkOnly,
            )
            .await;
        match result {
            Ok(nodes) => {
                let categories: Vec<Category> = nodes.into_iter().map(Category::from).collect();
                self.state.send_modify(|s| s.categories = categories.clone());
                Ok(categories)
            }
            Err(e) => Err(self.fail("loading categories", Collection::Categories, e.into())),
        }
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let name = name.trim();
        if let Err(e) = validate::validate_category_name(name) {
            return Err(self.reject(e.into()));
        }

        let _loading = self.begin();
        let result = self
            .client
            .mutate::<CategoryNode>(&catalog::CREATE_CATEGORY, json!({ "name": name }))
            .await;
        match result {
            Ok(node) => {
                let category = Category::from(node);
                self.state.send_modify(|s| s.categories.push(category.clone()));
                Ok(category)
            }
            Err(e) => Err(self.fail("creating category", Collection::Categories, e.into())),
        }
    }

    pub async fn update_category(&self, id: &str, name: &str) -> Result<Category> {
        let name = name.trim();
        if let Err(e) = validate::validate_category_name(name) {
            return Err(self.reject(e.into()));
        }

        let _loading = self.begin();
        let result = self
            .client
            .mutate::<CategoryNode>(&catalog::UPDATE_CATEGORY, json!({ "id": id, "name": name }))
            .await;
        match result {
            Ok(node) => {
                let category = Category::from(node);
                self.state
                    .send_modify(|s| replace_by_id(&mut s.categories, id, &category, |c| &c.id));
                Ok(category)
            }
            Err(e) => Err(self.fail("updating category", Collection::Categories, e.into())),
        }
    }

    /// Delete a category.
    ///
    /// Refused without a request while any loaded task still references it.
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let count = self
            .state
            .borrow()
            .tasks
            .iter()
            .filter(|t| t.category.id == id)
            .count();
        if count > 0 {
            return Err(self.reject(Error::CategoryInUse {
                id: id.to_string(),
                count,
            }));
        }

        let _loading = self.begin();
        let result = self
            .client
            .mutate::<bool>(&catalog::DELETE_CATEGORY, json!({ "id": id }))
            .await
            .map_err(Error::from)
            .and_then(|deleted| {
                if deleted {
                    Ok(())
                } else {
                    Err(Error::Refused("delete category"))
                }
            });
        match result {
            Ok(()) => {
                self.state.send_modify(|s| s.categories.retain(|c| c.id != id));
                Ok(())
            }
            Err(e) => Err(self.fail("deleting category", Collection::Categories, e)),
        }
    }

    // -- combined ------------------------------------------------------------

    /// Load tasks and categories concurrently. Never fails.
    ///
    /// Any failure is recorded as [`INITIAL_LOAD_FAILED`].
    pub async fn initialize_data(&self) {
        let (tasks, categories) = tokio::join!(self.load_tasks(), self.load_categories());
        if let Err(e) = tasks.and(categories) {
            tracing::error!("error initializing data: {}", e);
            self.state
                .send_modify(|s| s.error = Some(INITIAL_LOAD_FAILED.to_string()));
        }
    }

    // -- internals -----------------------------------------------------------

    fn begin(&self) -> LoadingGuard<'_> {
        LoadingGuard::begin(&self.state, &self.in_flight)
    }

    fn require_session(&self) -> Result<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(self.reject(Error::AuthenticationRequired))
        }
    }

    /// Record a failure detected before any request. Collections are untouched.
    fn reject(&self, err: Error) -> Error {
        tracing::error!("rejected: {}", err);
        self.state.send_modify(|s| s.error = Some(err.to_string()));
        err
    }

    fn fail(&self, context: &str, collection: Collection, err: Error) -> Error {
        tracing::error!("error {}: {}", context, err);
        let clear = err.is_auth_failure();
        self.state.send_modify(|s| {
            s.error = Some(err.to_string());
            if clear {
                match collection {
                    Collection::Tasks => s.tasks.clear(),
                    Collection::Categories => s.categories.clear(),
                }
            }
        });
        if clear && matches!(collection, Collection::Tasks) {
            if let Err(e) = self.client.storage().remove(TASKS_KEY) {
                tracing::warn!("failed to drop cached tasks: {}", e);
            }
        }
        err
    }

    fn persist_tasks(&self) {
        let encoded = serde_json::to_string(&self.state.borrow().tasks);
        let stored = match encoded {
            Ok(raw) => self.client.storage().set(TASKS_KEY, &raw).map_err(Error::from),
            Err(e) => Err(Error::from(e)),
        };
        if let Err(e) = stored {
            tracing::warn!("failed to cache tasks: {}", e);
        }
    }
}

fn replace_by_id<E: Clone>(items: &mut [E], id: &str, with: &E, id_of: impl Fn(&E) -> &String) {
    if let Some(slot) = items.iter_mut().find(|e| id_of(e) == id) {
        *slot = with.clone();
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
