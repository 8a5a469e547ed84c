use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::outfit::{EquipError, PurchaseError};
use crate::signup::SignupError;

#[derive(Debug, Error)]
pub enum HabitError {
    #[error("not initialized: run 'habitizer init'")]
    NotInitialized,

    #[error("habit not found: {0}")]
    HabitNotFound(String),

    #[error("unknown reward habit: {0}")]
    UnknownRewardHabit(String),

    #[error("unknown outfit: {0}")]
    UnknownOutfit(String),

    #[error("invalid frequency '{0}': expected daily, weekly or monthly")]
    InvalidFrequency(String),

    #[error("invalid filter '{0}': expected all, daily, weekly or monthly")]
    InvalidFilter(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error(transparent)]
    Signup(#[from] SignupError),

    #[error("home directory not found: set HOME or pass --root")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HabitError>;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field-level validation failure. Carries every offending field so a form
/// can show all messages at once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok(())` when nothing was pushed, otherwise `Err(self)`.
    pub fn into_result(self) -> std::result::Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed: ")?;
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_validation_is_ok() {
        assert!(ValidationError::new().into_result().is_ok());
    }

    #[test]
    fn validation_lists_every_field() {
        let mut err = ValidationError::new();
        err.push("title", "Title is required");
        err.push("description", "Description is required");
        let err = err.into_result().unwrap_err();
        assert!(err.has("title"));
        assert!(err.has("description"));
        assert!(!err.has("reminder_time"));
        let text = err.to_string();
        assert!(text.contains("title: Title is required"));
        assert!(text.contains("description: Description is required"));
    }
}
