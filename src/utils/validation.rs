//! Centralized validation and helper functions for record fields.

use crate::core::types::{Identifier, ModelError};

/// Maximum number of records read from a single input (DOS protection)
pub const MAX_RECORDS: usize = 50_000_000;

/// Separator for multi-valued cells (e.g. several evidence codes)
pub const MULTI_VALUE_SEPARATOR: char = '|';

/// Parse a genomic coordinate. Coordinates are non-negative integers.
///
/// # Examples
///
/// ```
/// use bioforge::utils::validation::parse_coordinate;
///
/// assert_eq!(parse_coordinate("21259029").unwrap(), 21_259_029);
/// assert!(parse_coordinate("-5").is_err());
/// assert!(parse_coordinate("12a").is_err());
/// ```
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` for negative, empty or non-numeric values.
pub fn parse_coordinate(s: &str) -> Result<u64, ModelError> {
    let trimmed = s.trim();
    if trimmed.starts_with('-') {
        return Err(ModelError::invalid(format!(
            "coordinate must be non-negative: '{s}'"
        )));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ModelError::invalid(format!("malformed coordinate: '{s}'")))
}

/// Treat empty and placeholder cells as absent.
/// Returns the trimmed value otherwise.
#[must_use]
pub fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    match trimmed {
        "" | "-" | "NA" | "N/A" | "null" => None,
        _ => Some(trimmed),
    }
}

/// Split a multi-valued cell, dropping empty entries
#[must_use]
pub fn split_multi(s: &str) -> Vec<&str> {
    s.split(MULTI_VALUE_SEPARATOR)
        .filter_map(non_empty)
        .collect()
}

/// Validate a natural identifier taken from a record cell.
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` if the value is empty or contains
/// whitespace.
pub fn require_identifier(field: &str, s: &str) -> Result<Identifier, ModelError> {
    let Some(value) = non_empty(s) else {
        return Err(ModelError::invalid(format!("missing {field}")));
    };
    if value.chars().any(char::is_whitespace) {
        return Err(ModelError::invalid(format!(
            "{field} '{value}' contains whitespace"
        )));
    }
    Ok(Identifier::new(value))
}

/// Check if reading another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE reading a new record.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: reading another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}
