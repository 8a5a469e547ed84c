//! Account signup: form validation and the call to the signup API.

use crate::config::SignupConfig;
use crate::error::{HabitError, Result, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

pub const SERVER_ERROR_FALLBACK: &str = "Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Network error: Please check your connection and try again.")]
    Network,

    #[error("Server error: {0}")]
    Server(String),
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{10,15}$").unwrap())
}

/// Check one field; `None` means the value is acceptable.
pub fn validate_field(field: &str, value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    match field {
        "name" => {
            if trimmed.is_empty() {
                Some("Name is required")
            } else if len < 2 {
                Some("Name must be at least 2 characters")
            } else if len > 50 {
                Some("Name must be less than 50 characters")
            } else {
                None
            }
        }
        "email" => {
            if trimmed.is_empty() {
                Some("Email is required")
            } else if !email_re().is_match(value) {
                Some("Please enter a valid email address")
            } else {
                None
            }
        }
        "phone" => {
            let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
            if trimmed.is_empty() {
                Some("Phone is required")
            } else if !phone_re().is_match(&digits) {
                Some("Please enter a valid phone number (10-15 digits)")
            } else {
                None
            }
        }
        "address" => {
            if trimmed.is_empty() {
                Some("Address is required")
            } else if len < 10 {
                Some("Address must be at least 10 characters")
            } else if len > 200 {
                Some("Address must be less than 200 characters")
            } else {
                None
            }
        }
        _ => None,
    }
}

impl SignupForm {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut err = ValidationError::new();
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if let Some(message) = validate_field(field, value) {
                err.push(field, message);
            }
        }
        err.into_result()
    }

    /// The request body: every field trimmed.
    pub fn trimmed(&self) -> SignupForm {
        SignupForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Posts signups to the external API. One request per submit: no retry,
/// no timeout beyond the HTTP client's defaults.
pub struct SignupClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl SignupClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn from_config(cfg: &SignupConfig) -> Self {
        Self::new(cfg.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate and submit. A 2xx answer yields the parsed JSON body.
    pub fn submit(&self, form: &SignupForm) -> Result<serde_json::Value> {
        form.validate()?;
        let body = form.trimmed();

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "signup request failed");
                HabitError::from(SignupError::Network)
            })?;

        let status = resp.status();
        if status.is_success() {
            let value: serde_json::Value = resp.json().map_err(|e| {
                tracing::warn!(%status, error = %e, "signup response was not JSON");
                HabitError::from(SignupError::Network)
            })?;
            tracing::info!(%status, email = %body.email, "signup accepted");
            return Ok(value);
        }

        let text = resp.text().unwrap_or_default();
        tracing::warn!(%status, body = %text, "signup rejected");
        let message = if text.trim().is_empty() {
            SERVER_ERROR_FALLBACK.to_string()
        } else {
            text
        };
        Err(SignupError::Server(message).into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
