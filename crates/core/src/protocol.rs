// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GraphQL-over-HTTP envelope.
//!
//! The protocol is simple:
//! - Client POSTs `{ operationName, query, variables }` as JSON
//! - Server answers `{ data, errors }`; either may be absent

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Operation;

/// Request body sent to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub operation_name: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
}

impl GraphQLRequest {
    /// Build a request for a catalog operation.
    ///
    /// `variables` must serialize to a JSON object (or null for none).
    pub fn new(op: &Operation, variables: Value) -> Result<Self, PayloadError> {
        let variables = match variables {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(PayloadError::Malformed(format!(
                    "variables for {} must be an object, got {}",
                    op.name, other
                )))
            }
        };
        Ok(GraphQLRequest {
            operation_name: op.name.to_string(),
            query: op.document.to_string(),
            variables,
        })
    }
}

/// One entry of the `errors` list of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        GraphQLError {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    /// The `extensions.code` value, if the server set one.
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .and_then(Value::as_str)
    }
}

/// Response body returned by the GraphQL endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

/// Why a response did not yield the expected payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    /// The server reported one or more errors.
    #[error("{}", .0.first().map(|e| e.message.as_str()).unwrap_or("request failed"))]
    Server(Vec<GraphQLError>),

    /// Data was missing, null, or did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GraphQLResponse {
    /// Wrap a successful payload under a root field.
    pub fn with_data(field: &str, value: Value) -> Self {
        let mut data = Map::new();
        data.insert(field.to_string(), value);
        GraphQLResponse {
            data: Some(Value::Object(data)),
            errors: Vec::new(),
        }
    }

    /// A response carrying only errors.
    pub fn with_errors(errors: Vec<GraphQLError>) -> Self {
        GraphQLResponse { data: None, errors }
    }

    /// Extract the root `field` as `T`. A null or missing field is malformed.
    pub fn into_field<T: DeserializeOwned>(self, field: &str) -> Result<T, PayloadError> {
        match self.into_optional_field(field)? {
            Some(value) => Ok(value),
            None => Err(PayloadError::Malformed(format!(
                "no data returned for '{}'",
                field
            ))),
        }
    }

    /// Extract the root `field` as `T`, mapping null to `None`.
    ///
    /// Errors take precedence over data: a response with both is treated as
    /// a failure, since the data may be partial.
    pub fn into_optional_field<T: DeserializeOwned>(
        self,
        field: &str,
    ) -> Result<Option<T>, PayloadError> {
        if !self.errors.is_empty() {
            return Err(PayloadError::Server(self.errors));
        }
        let mut data = match self.data {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => {
                return Err(PayloadError::Malformed("response contained no data".into()))
            }
            Some(other) => {
                return Err(PayloadError::Malformed(format!(
                    "expected data object, got {}",
                    other
                )))
            }
        };
        match data.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| PayloadError::Malformed(format!("field '{}': {}", field, e))),
        }
    }
}

/// JSON envelope returned by the session-cookie logout endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
