// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GraphQL API access for the dotask server.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Stores    │────►│   Client    │────►│  Transport  │────► GraphQL endpoint
//! │ (Data/Auth) │◄────│ (+ cache)   │◄────│   (trait)   │◄────
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   Storage   │  (bearer token)
//!                     └─────────────┘
//! ```
//!
//! # Features
//!
//! - HTTP transport with bearer header and cookie-session fallback
//! - Structured error kinds assigned at the transport boundary
//! - Typed payload extraction per catalog operation
//! - Injectable transport trait for testing

mod client;
mod transport;

pub use client::{FetchPolicy, GraphqlClient};
pub use transport::{HttpTransport, Transport, TransportConfig, TransportError, TransportResult};
