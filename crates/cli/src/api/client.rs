// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GraphQL client bound to one endpoint and one token source.
//!
//! Provides a high-level interface for:
//! - Issuing catalog operations with typed payload extraction
//! - Attaching the stored bearer token
//! - Caching query results for [`FetchPolicy::CacheFirst`] reads
//!
//! Each call issues at most one request. There is no retry, no backoff,
//! and no deduplication of concurrent identical requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use dt_core::protocol::{GraphQLRequest, GraphQLResponse, LogoutResponse};
use dt_core::Operation;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{Transport, TransportError, TransportResult};
use crate::storage::{Storage, ACCESS_TOKEN_KEY};

/// Where a query may be answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Always ask the server; the result still refreshes the cache.
    #[default]
    NetworkOnly,
    /// Answer from the cache when an entry exists.
    CacheFirst,
}

/// GraphQL client over an injectable transport.
pub struct GraphqlClient<T: Transport> {
    transport: T,
    storage: Arc<dyn Storage>,
    /// Raw `data` objects keyed by operation name and variables.
    cache: Mutex<HashMap<String, Value>>,
}

impl<T: Transport> GraphqlClient<T> {
    pub fn new(transport: T, storage: Arc<dyn Storage>) -> Self {
        GraphqlClient {
            transport,
            storage,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Client-side storage shared with the stores.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Run a query and extract its root field.
    pub async fn query<R: DeserializeOwned>(
        &self,
        op: &Operation,
        variables: Value,
        policy: FetchPolicy,
    ) -> TransportResult<R> {
        Ok(self.fetch(op, variables, policy).await?.into_field(op.field)?)
    }

    /// Run a query whose root field may legitimately be null.
    pub async fn query_optional<R: DeserializeOwned>(
        &self,
        op: &Operation,
        variables: Value,
        policy: FetchPolicy,
    ) -> TransportResult<Option<R>> {
        Ok(self
            .fetch(op, variables, policy)
            .await?
            .into_optional_field(op.field)?)
    }

    /// Run a mutation and extract its root field.
    ///
    /// A successful mutation invalidates every cached query result.
    pub async fn mutate<R: DeserializeOwned>(
        &self,
        op: &Operation,
        variables: Value,
    ) -> TransportResult<R> {
        let response = self.send(op, variables).await?;
        let payload = response.into_field(op.field)?;
        self.reset_cache();
        Ok(payload)
    }

    /// Ask the logout endpoint to clear its session cookies.
    pub async fn logout(&self) -> TransportResult<LogoutResponse> {
        self.transport.logout().await
    }

    /// Drop every cached query result.
    pub fn reset_cache(&self) {
        self.cache_guard().clear();
    }

    /// Number of cached query results.
    pub fn cached_len(&self) -> usize {
        self.cache_guard().len()
    }

    fn cache_guard(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cache_key(op: &Operation, variables: &Value) -> String {
        format!("{}:{}", op.name, variables)
    }

    async fn fetch(
        &self,
        op: &Operation,
        variables: Value,
        policy: FetchPolicy,
    ) -> TransportResult<GraphQLResponse> {
        let key = Self::cache_key(op, &variables);

        if policy == FetchPolicy::CacheFirst {
            let cached = self.cache_guard().get(&key).cloned();
            if let Some(data) = cached {
                tracing::debug!("cache hit for {}", op.name);
                return Ok(GraphQLResponse {
                    data: Some(data),
                    errors: Vec::new(),
                });
            }
        }

        let response = self.send(op, variables).await?;
        if response.errors.is_empty() {
            if let Some(data) = &response.data {
                self.cache_guard().insert(key, data.clone());
            }
        }
        Ok(response)
    }

    async fn send(&self, op: &Operation, variables: Value) -> TransportResult<GraphQLResponse> {
        let request = GraphQLRequest::new(op, variables).map_err(TransportError::from)?;
        tracing::debug!(mutation = op.is_mutation(), "sending {}", op.name);
        self.transport.execute(request, self.bearer()).await
    }

    /// Stored access token, if any.
    ///
    /// An unreadable store is treated as signed out so that the server, not
    /// the client, decides what an anonymous caller may do.
    fn bearer(&self) -> Option<String> {
        match self.storage.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("failed to read access token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
