//! Argument guards invoked at every public construction and mutation boundary.

use crate::fault::{ContractError, Result};

/// Reject empty or whitespace-only strings
pub fn not_blank(argument: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContractError::validation(
            argument,
            "must not be empty or whitespace",
        ));
    }
    Ok(())
}

/// Reject an absent value
pub fn not_none<T>(argument: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| ContractError::validation(argument, "must be present"))
}

/// Reject an empty slice
pub fn not_empty<T>(argument: &'static str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(ContractError::validation(argument, "must not be empty"));
    }
    Ok(())
}
