//! # Contract violations
//!
//! Failures raised by this crate itself when a caller breaks an operation's
//! contract. These are distinct from the domain [`Error`](crate::Error) nodes
//! the crate models: a `ContractError` signals a bug in the calling code.

use thiserror::Error;

/// Contract violation raised at the call site that broke the contract
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Invalid argument '{argument}': {reason}")]
    Validation {
        argument: &'static str,
        reason: String,
    },

    #[error("Cause assignment on {subject} would create a cycle")]
    Cycle { subject: String },

    #[error("{subject} cannot be its own cause")]
    SelfReference { subject: String },

    #[error("'{operation}' requires the {expected} state, found {actual}")]
    InvalidState {
        operation: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Duplicate error: {description}")]
    Duplicate { description: String },
}

impl ContractError {
    pub(crate) fn validation(argument: &'static str, reason: impl Into<String>) -> Self {
        ContractError::Validation {
            argument,
            reason: reason.into(),
        }
    }

    pub(crate) fn cycle(subject: impl Into<String>) -> Self {
        ContractError::Cycle {
            subject: subject.into(),
        }
    }

    pub(crate) fn self_reference(subject: impl Into<String>) -> Self {
        ContractError::SelfReference {
            subject: subject.into(),
        }
    }

    pub(crate) fn invalid_state(
        operation: &'static str,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        ContractError::InvalidState {
            operation,
            expected,
            actual,
        }
    }

    pub(crate) fn duplicate(description: impl Into<String>) -> Self {
        ContractError::Duplicate {
            description: description.into(),
        }
    }

    /// Short, stable name of the violation class
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractError::Validation { .. } => "ValidationError",
            ContractError::Cycle { .. } => "CycleError",
            ContractError::SelfReference { .. } => "SelfReferenceError",
            ContractError::InvalidState { .. } => "InvalidStateError",
            ContractError::Duplicate { .. } => "DuplicateError",
        }
    }
}

/// Result type for contract-checked operations
pub type Result<T> = std::result::Result<T, ContractError>;
