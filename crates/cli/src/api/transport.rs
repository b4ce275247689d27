// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the GraphQL endpoint.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing
//!
//! Failure classification lives here and nowhere else: every
//! [`TransportError`] carries an [`ErrorKind`] tag derived from the HTTP
//! status, the GraphQL error code, or the server's authentication message.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use dt_core::protocol::{GraphQLError, GraphQLRequest, GraphQLResponse, LogoutResponse};
use dt_core::PayloadError;

use crate::error::ErrorKind;

/// GraphQL error code used by servers for a missing or invalid session.
const UNAUTHENTICATED_CODE: &str = "UNAUTHENTICATED";

/// Message the task server uses for a missing session.
const AUTH_REQUIRED_MESSAGE: &str = "authentication required";

/// Longest response body echoed back in an HTTP error.
const MAX_ERROR_BODY: usize = 500;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status without a GraphQL error body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Server reported application errors.
    #[error("{message}")]
    Server {
        message: String,
        errors: Vec<GraphQLError>,
    },

    /// Session missing, expired, or rejected.
    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    /// Data missing, null, or of the wrong shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Network(_) => ErrorKind::Network,
            TransportError::Http { .. } => ErrorKind::Http,
            TransportError::Server { .. } => ErrorKind::Server,
            TransportError::AuthenticationRequired(_) => ErrorKind::AuthenticationRequired,
            TransportError::Malformed(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Classify a GraphQL `errors` list.
    ///
    /// Any entry tagged `UNAUTHENTICATED`, or carrying the server's
    /// authentication message, makes the whole response an authentication
    /// failure.
    pub fn from_graphql_errors(errors: Vec<GraphQLError>) -> Self {
        let auth = errors.iter().find(|e| {
            e.code() == Some(UNAUTHENTICATED_CODE)
                || e.message.to_lowercase().contains(AUTH_REQUIRED_MESSAGE)
        });
        if let Some(auth) = auth {
            return TransportError::AuthenticationRequired(auth.message.clone());
        }
        let message = errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "request failed".to_string());
        TransportError::Server { message, errors }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => TransportError::AuthenticationRequired(format!("HTTP {}", status)),
            _ => TransportError::Http {
                status,
                body: truncate(body, MAX_ERROR_BODY),
            },
        }
    }
}

impl From<PayloadError> for TransportError {
    fn from(e: PayloadError) -> Self {
        match e {
            PayloadError::Server(errors) => TransportError::from_graphql_errors(errors),
            PayloadError::Malformed(msg) => TransportError::Malformed(msg),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}... (truncated)", &s[..idx]),
        None => s.to_string(),
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Transport trait for GraphQL-over-HTTP communication.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations. A transport is bound to one
/// GraphQL endpoint and one logout endpoint when it is built.
pub trait Transport: Send + Sync {
    /// POST a request to the GraphQL endpoint.
    ///
    /// `bearer` is attached as `Authorization: Bearer <token>` when present.
    /// A response with a GraphQL `errors` list is returned as `Ok`; the
    /// caller decides what a partial response means.
    fn execute(
        &self,
        request: GraphQLRequest,
        bearer: Option<String>,
    ) -> Pin<Box<dyn Future<Output = TransportResult<GraphQLResponse>> + Send + '_>>;

    /// POST with no body to the session-cookie logout endpoint.
    fn logout(&self) -> Pin<Box<dyn Future<Output = TransportResult<LogoutResponse>> + Send + '_>>;
}

/// Endpoint binding for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Session-cookie logout endpoint URL.
    pub logout_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP transport implementation using reqwest.
///
/// Cookies are kept for the lifetime of the transport, so a server that
/// sets a session cookie on login keeps working without a bearer token.
pub struct HttpTransport {
    config: TransportConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: TransportConfig) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(HttpTransport { config, client })
    }

    fn describe(e: &reqwest::Error, url: &str) -> String {
        if e.is_timeout() {
            format!("request to {} timed out", url)
        } else if e.is_connect() {
            format!("could not connect to {}: {}", url, e)
        } else if e.is_decode() {
            format!("unreadable response from {}: {}", url, e)
        } else {
            format!("request to {} failed: {}", url, e)
        }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        request: GraphQLRequest,
        bearer: Option<String>,
    ) -> Pin<Box<dyn Future<Output = TransportResult<GraphQLResponse>> + Send + '_>> {
        Box::pin(async move {
            let url = self.config.endpoint.as_str();
            tracing::debug!("POST {} operation={}", url, request.operation_name);

            let mut builder = self.client.post(url).json(&request);
            if let Some(token) = bearer.filter(|t| !t.is_empty()) {
                builder = builder.bearer_auth(token);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::Network(Self::describe(&e, url)))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Network(Self::describe(&e, url)))?;

            if matches!(status.as_u16(), 401 | 403) {
                return Err(TransportError::from_status(status.as_u16(), &text));
            }
            if !status.is_success() {
                // GraphQL servers often report errors with a 4xx/5xx status
                if let Ok(body) = serde_json::from_str::<GraphQLResponse>(&text) {
                    if !body.errors.is_empty() {
                        return Ok(body);
                    }
                }
                return Err(TransportError::from_status(status.as_u16(), &text));
            }

            serde_json::from_str(&text).map_err(|e| TransportError::Malformed(e.to_string()))
        })
    }

    fn logout(&self) -> Pin<Box<dyn Future<Output = TransportResult<LogoutResponse>> + Send + '_>> {
        Box::pin(async move {
            let url = self.config.logout_url.as_str();
            tracing::debug!("POST {}", url);

            let response = self
                .client
                .post(url)
                .send()
                .await
                .map_err(|e| TransportError::Network(Self::describe(&e, url)))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| TransportError::Network(Self::describe(&e, url)))?;

            // The endpoint answers 500 with a failure envelope; keep it readable
            match serde_json::from_str::<LogoutResponse>(&text) {
                Ok(envelope) => Ok(envelope),
                Err(_) if !status.is_success() => {
                    Err(TransportError::from_status(status.as_u16(), &text))
                }
                Err(e) => Err(TransportError::Malformed(e.to_string())),
            }
        })
    }
}
