//! Field rules for owner and ship input.
//!
//! # Responsibility
//! - Check one field at a time and name the offending field in the error.
//! - Normalize free-text fields (trimmed) before they reach storage.
//!
//! # Invariants
//! - Field names in errors use the wire spelling (`imoNumber`).
//! - The same rules back the SQLite `CHECK` constraints in `0001_init.sql`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MAX_CHARS: usize = 100;
pub const SHIP_TYPE_MAX_CHARS: usize = 50;

static IMO_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{7}$").expect("valid imo regex"));

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the rejected field.
    pub field: &'static str,
    /// Human-readable reason, shown to clients verbatim.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl Error for ValidationError {}

/// Validates a required free-text field and returns its trimmed value.
pub fn required_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    if trimmed.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validates an IMO number: exactly seven ASCII digits, nothing else.
pub fn imo_number(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("imoNumber", "is required"));
    }
    if !IMO_NUMBER_RE.is_match(value) {
        return Err(ValidationError::new(
            "imoNumber",
            "IMO Number must be 7 digits.",
        ));
    }
    Ok(())
}

/// Validates ship tonnage: finite and strictly positive.
pub fn tonnage(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(
            "tonnage",
            "Tonnage must be greater than 0.",
        ));
    }
    Ok(())
}
