// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_invalid_status_display_has_hint() {
    let msg = Error::InvalidStatus("blocked".to_string()).to_string();
    assert!(msg.contains("'blocked'"));
    assert!(msg.contains("hint: valid statuses are"));
}

#[test]
fn test_invalid_priority_display_has_hint() {
    let msg = Error::InvalidPriority("urgent".to_string()).to_string();
    assert!(msg.contains("'urgent'"));
    assert!(msg.contains("low, medium, high"));
}

#[test]
fn test_field_too_long_display() {
    let err = Error::FieldTooLong {
        field: "Title",
        actual: 250,
        max: 200,
    };
    assert_eq!(err.to_string(), "Title too long (250 chars, max 200)");
}

#[test]
fn test_json_error_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(err.to_string().starts_with("json error"));
}
