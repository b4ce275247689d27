// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input validation applied before a request is issued.

use crate::error::{Error, Result};
use crate::model::{
    ChangePasswordInput, CreateTaskInput, LoginInput, RegisterInput, UpdateProfileInput,
    UpdateTaskInput,
};

// Input length limits
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;
pub const MAX_TAG_LENGTH: usize = 50;
pub const MAX_TAGS_PER_TASK: usize = 20;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;
pub const MAX_USER_NAME_LENGTH: usize = 100;

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::FieldEmpty { field });
    }
    Ok(())
}

fn require_max_len(field: &'static str, value: &str, max: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(Error::FieldTooLong { field, actual, max });
    }
    Ok(())
}

/// Validate that a title is non-empty and within length limits
pub fn validate_title(title: &str) -> Result<()> {
    require_non_empty("Title", title)?;
    require_max_len("Title", title.trim(), MAX_TITLE_LENGTH)
}

pub fn validate_description(description: &str) -> Result<()> {
    require_max_len("Description", description, MAX_DESCRIPTION_LENGTH)
}

/// Validate the tag list as a whole and each tag in it
pub fn validate_tags(tags: &[String]) -> Result<()> {
    if tags.len() > MAX_TAGS_PER_TASK {
        return Err(Error::TagLimitExceeded {
            max: MAX_TAGS_PER_TASK,
        });
    }
    for tag in tags {
        require_non_empty("Tag", tag)?;
        require_max_len("Tag", tag, MAX_TAG_LENGTH)?;
    }
    Ok(())
}

pub fn validate_category_name(name: &str) -> Result<()> {
    require_non_empty("Category name", name)?;
    require_max_len("Category name", name.trim(), MAX_CATEGORY_NAME_LENGTH)
}

/// Loose shape check: something before `@`, and a dot somewhere after it.
pub fn validate_email(email: &str) -> Result<()> {
    require_non_empty("Email", email)?;
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !email.contains(char::is_whitespace)
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            Ok(())
        }
        _ => Err(Error::InvalidEmail(email.to_string())),
    }
}

impl CreateTaskInput {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_tags(&self.tags)
    }
}

impl UpdateTaskInput {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(tags) = &self.tags {
            validate_tags(tags)?;
        }
        Ok(())
    }
}

impl LoginInput {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Email", &self.email)?;
        require_non_empty("Password", &self.password)
    }
}

impl RegisterInput {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Name", &self.name)?;
        require_max_len("Name", self.name.trim(), MAX_USER_NAME_LENGTH)?;
        validate_email(&self.email)?;
        require_non_empty("Password", &self.password)
    }
}

impl UpdateProfileInput {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_non_empty("Name", name)?;
            require_max_len("Name", name.trim(), MAX_USER_NAME_LENGTH)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

impl ChangePasswordInput {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Current password", &self.current_password)?;
        require_non_empty("New password", &self.new_password)
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
