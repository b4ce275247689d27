// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed set of GraphQL operations the client is permitted to issue.
//!
//! Each [`Operation`] names its root field so the response payload can be
//! extracted without a per-operation wrapper type.

use std::fmt;

use crate::error::{Error, Result};

/// Whether an operation reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
        }
    }
}

/// A named request template with a fixed selection set.
#[derive(Debug, PartialEq, Eq)]
pub struct Operation {
    /// GraphQL operation name, sent as `operationName`.
    pub name: &'static str,
    pub kind: OperationKind,
    /// Root field of the response holding the payload.
    pub field: &'static str,
    pub document: &'static str,
}

impl Operation {
    pub fn is_mutation(&self) -> bool {
        self.kind == OperationKind::Mutation
    }
}

pub static GET_TASKS: Operation = Operation {
    name: "GetTasks",
    kind: OperationKind::Query,
    field: "tasks",
    document: r#"query GetTasks {
  tasks {
    id
    title
    description
    status
    priority
    dueDate
    createdAt
    updatedAt
    category { id name }
    tags
  }
}"#,
};

pub static GET_TASK: Operation = Operation {
    name: "GetTask",
    kind: OperationKind::Query,
    field: "task",
    document: r#"query GetTask($id: ID!) {
  task(id: $id) {
    id
    title
    description
    status
    priority
    dueDate
    createdAt
    updatedAt
    category { id name }
    tags
  }
}"#,
};

pub static GET_CATEGORIES: Operation = Operation {
    name: "GetCategories",
    kind: OperationKind::Query,
    field: "categories",
    document: r#"query GetCategories {
  categories { id name }
}"#,
};

pub static CREATE_TASK: Operation = Operation {
    name: "CreateTask",
    kind: OperationKind::Mutation,
    field: "createTask",
    document: r#"mutation CreateTask($input: CreateTaskInput!) {
  createTask(input: $input) {
    id
    title
    description
    status
    priority
    dueDate
    createdAt
    updatedAt
    category { id name }
    tags
  }
}"#,
};

pub static UPDATE_TASK: Operation = Operation {
    name: "UpdateTask",
    kind: OperationKind::Mutation,
    field: "updateTask",
    document: r#"mutation UpdateTask($id: ID!, $input: UpdateTaskInput!) {
  updateTask(id: $id, input: $input) {
    id
    title
    description
    status
    priority
    dueDate
    createdAt
    updatedAt
    category { id name }
    tags
  }
}"#,
};

pub static DELETE_TASK: Operation = Operation {
    name: "DeleteTask",
    kind: OperationKind::Mutation,
    field: "deleteTask",
    document: r#"mutation DeleteTask($id: ID!) {
  deleteTask(id: $id)
}"#,
};

pub static UPDATE_TASK_STATUS: Operation = Operation {
    name: "UpdateTaskStatus",
    kind: OperationKind::Mutation,
    field: "updateTaskStatus",
    document: r#"mutation UpdateTaskStatus($id: ID!, $status: TaskStatus!) {
  updateTaskStatus(id: $id, status: $status) {
    id
    status
    updatedAt
  }
}"#,
};

pub static CREATE_CATEGORY: Operation = Operation {
    name: "CreateCategory",
    kind: OperationKind::Mutation,
    field: "createCategory",
    document: r#"mutation CreateCategory($name: String!) {
  createCategory(name: $name) { id name }
}"#,
};

pub static UPDATE_CATEGORY: Operation = Operation {
    name: "UpdateCategory",
    kind: OperationKind::Mutation,
    field: "updateCategory",
    document: r#"mutation UpdateCategory($id: ID!, $name: String!) {
  updateCategory(id: $id, name: $name) { id name }
}"#,
};

pub static DELETE_CATEGORY: Operation = Operation {
    name: "DeleteCategory",
    kind: OperationKind::Mutation,
    field: "deleteCategory",
    document: r#"mutation DeleteCategory($id: ID!) {
  deleteCategory(id: $id)
}"#,
};

pub static ME: Operation = Operation {
    name: "Me",
    kind: OperationKind::Query,
    field: "me",
    document: r#"query Me {
  me { id name email createdAt updatedAt }
}"#,
};

pub static LOGIN: Operation = Operation {
    name: "Login",
    kind: OperationKind::Mutation,
    field: "login",
    document: r#"mutation Login($input: LoginInput!) {
  login(input: $input) {
    user { id name email createdAt updatedAt }
    token
  }
}"#,
};

pub static REGISTER: Operation = Operation {
    name: "Register",
    kind: OperationKind::Mutation,
    field: "register",
    document: r#"mutation Register($input: RegisterInput!) {
  register(input: $input) {
    user { id name email createdAt updatedAt }
    token
  }
}"#,
};

pub static UPDATE_PROFILE: Operation = Operation {
    name: "UpdateProfile",
    kind: OperationKind::Mutation,
    field: "updateProfile",
    document: r#"mutation UpdateProfile($input: UpdateProfileInput!) {
  updateProfile(input: $input) { id name email createdAt updatedAt }
}"#,
};

pub static CHANGE_PASSWORD: Operation = Operation {
    name: "ChangePassword",
    kind: OperationKind::Mutation,
    field: "changePassword",
    document: r#"mutation ChangePassword($input: ChangePasswordInput!) {
  changePassword(input: $input)
}"#,
};

/// Every operation in the catalog.
pub static ALL: [&Operation; 15] = [
    &GET_TASKS,
    &GET_TASK,
    &GET_CATEGORIES,
    &CREATE_TASK,
    &UPDATE_TASK,
    &DELETE_TASK,
    &UPDATE_TASK_STATUS,
    &CREATE_CATEGORY,
    &UPDATE_CATEGORY,
    &DELETE_CATEGORY,
    &ME,
    &LOGIN,
    &REGISTER,
    &UPDATE_PROFILE,
    &CHANGE_PASSWORD,
];

/// Look up an operation by its GraphQL operation name.
pub fn by_name(name: &str) -> Result<&'static Operation> {
    ALL.iter()
        .copied()
        .find(|op| op.name == name)
        .ok_or_else(|| Error::UnknownOperation(name.to_string()))
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
