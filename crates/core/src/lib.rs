// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dt-core: Shared library for the dotask client
//!
//! This crate provides the entity types, the wire-response schema with its
//! typed mappings, the operation catalog, and the GraphQL envelope used by
//! the `dotask` client and CLI. It performs no I/O.

pub mod catalog;
pub mod error;
pub mod model;
pub mod protocol;
pub mod validate;
pub mod wire;

pub use catalog::{Operation, OperationKind};
pub use error::{Error, Result};
pub use model::{
    AuthPayload, Category, ChangePasswordInput, CreateTaskInput, LoginInput, RegisterInput, Task,
    TaskPriority, TaskStatus, UpdateProfileInput, UpdateTaskInput, User,
};
pub use protocol::{GraphQLError, GraphQLRequest, GraphQLResponse, LogoutResponse, PayloadError};
