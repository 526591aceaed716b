//! # Suspicious<T>
//!
//! Either a computed value or the [`ErrorCollection`] explaining why there is
//! none. The branch is fixed at construction; the error branch's collection
//! can still be enriched afterwards (more errors, a cause collection).
//!
//! "No result" is modelled as an error of kind [`ErrorKind::NO_RESULT`]
//! rather than a separate state, so severity ranking and chain searches treat
//! it like any other failure while callers can still match on the kind.

use crate::collection::ErrorCollection;
use crate::error::Error;
use crate::fault::{ContractError, Result};
use crate::guard;
use crate::kind::ErrorKind;
use crate::marker;
use crate::render::{Render, RenderStyle};
use std::fmt;

/// A value, or the errors that prevented it.
///
/// # Example
///
/// ```rust
/// use suspicious::{Error, ErrorCollection, ErrorKind, Suspicious};
///
/// fn parse_port(raw: &str) -> Suspicious<u16> {
///     match raw.parse() {
///         Ok(port) => Suspicious::from_value(port),
///         Err(err) => {
///             let error = Error::unexpected_from_exception(err, None, None).unwrap();
///             Suspicious::from_error(error)
///         }
///     }
/// }
///
/// assert_eq!(parse_port("8080").into_value().unwrap(), 8080);
///
/// let bad = parse_port("http");
/// assert!(bad.is_error());
/// assert_eq!(
///     bad.most_severe_deep().unwrap().unwrap().kind(),
///     &ErrorKind::UNEXPECTED
/// );
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub enum Suspicious<T> {
    /// A successfully computed value
    Value(T),
    /// The errors explaining the missing value
    Error(ErrorCollection),
}

/// `Suspicious<Ok>` in the value state
pub fn ok() -> Suspicious<marker::Ok> {
    Suspicious::Value(marker::Ok)
}

/// `Suspicious<Success>` in the value state
pub fn success() -> Suspicious<marker::Success> {
    Suspicious::Value(marker::Success)
}

impl<T> Suspicious<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wrap a value
    pub fn from_value(value: T) -> Self {
        Suspicious::Value(value)
    }

    /// Wrap a value that may be absent; `None` is a contract violation
    pub fn from_option(value: Option<T>) -> Result<Self> {
        guard::not_none("value", value).map(Suspicious::Value)
    }

    /// Wrap an error collection
    pub fn from_error_collection(collection: ErrorCollection) -> Self {
        Suspicious::Error(collection)
    }

    /// Wrap a single error in a collection named after it
    pub fn from_error(error: Error) -> Self {
        Suspicious::Error(ErrorCollection::single(error))
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check for the value state
    pub fn is_value(&self) -> bool {
        matches!(self, Suspicious::Value(_))
    }

    /// Check for the error state
    pub fn is_error(&self) -> bool {
        matches!(self, Suspicious::Error(_))
    }

    /// Explicit success projection; same as `is_value`
    pub fn is_success(&self) -> bool {
        self.is_value()
    }

    /// Error state whose collection chain holds no errors at all.
    ///
    /// Usually a programming error: something claimed failure but recorded
    /// nothing.
    pub fn is_unrecorded_failure(&self) -> bool {
        match self {
            Suspicious::Error(collection) => !collection.contains_errors_deep(),
            Suspicious::Value(_) => false,
        }
    }

    fn state_name(&self) -> &'static str {
        match self {
            Suspicious::Value(_) => "value",
            Suspicious::Error(_) => "error",
        }
    }

    fn collection(&self, operation: &'static str) -> Result<&ErrorCollection> {
        match self {
            Suspicious::Error(collection) => Ok(collection),
            Suspicious::Value(_) => Err(self.wrong_state(operation, "error")),
        }
    }

    fn wrong_state(&self, operation: &'static str, expected: &'static str) -> ContractError {
        tracing::debug!(operation, state = self.state_name(), "operation called in wrong state");
        ContractError::invalid_state(operation, expected, self.state_name())
    }

    // =========================================================================
    // Unwrapping
    // =========================================================================

    /// Borrow the value; fails in the error state
    pub fn unwrap_value(&self) -> Result<&T> {
        match self {
            Suspicious::Value(value) => Ok(value),
            Suspicious::Error(_) => Err(self.wrong_state("unwrap_value", "value")),
        }
    }

    /// Take the value; fails in the error state
    pub fn into_value(self) -> Result<T> {
        match self {
            Suspicious::Value(value) => Ok(value),
            Suspicious::Error(_) => Err(self.wrong_state("into_value", "value")),
        }
    }

    /// Borrow the error collection; fails in the value state
    pub fn unwrap_error_collection(&self) -> Result<&ErrorCollection> {
        self.collection("unwrap_error_collection")
    }

    /// Take the error collection; fails in the value state
    pub fn into_error_collection(self) -> Result<ErrorCollection> {
        match self {
            Suspicious::Error(collection) => Ok(collection),
            Suspicious::Value(_) => Err(self.wrong_state("into_error_collection", "error")),
        }
    }

    /// The value, if any
    pub fn ok_value(self) -> Option<T> {
        match self {
            Suspicious::Value(value) => Some(value),
            Suspicious::Error(_) => None,
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> std::result::Result<T, ErrorCollection> {
        match self {
            Suspicious::Value(value) => Ok(value),
            Suspicious::Error(collection) => Err(collection),
        }
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Transform the value, keeping the error branch as is
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Suspicious<U> {
        match self {
            Suspicious::Value(value) => Suspicious::Value(f(value)),
            Suspicious::Error(collection) => Suspicious::Error(collection),
        }
    }

    /// Chain a computation that may itself fail
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Suspicious<U>) -> Suspicious<U> {
        match self {
            Suspicious::Value(value) => f(value),
            Suspicious::Error(collection) => Suspicious::Error(collection),
        }
    }

    /// Borrow the value branch
    pub fn as_ref(&self) -> Suspicious<&T> {
        match self {
            Suspicious::Value(value) => Suspicious::Value(value),
            Suspicious::Error(collection) => Suspicious::Error(collection.clone()),
        }
    }

    // =========================================================================
    // Error-branch delegation
    // =========================================================================

    /// Add an error to the wrapped collection; fails on duplicates
    pub fn add_error(&self, error: Error) -> Result<()> {
        self.collection("add_error")?.add_error(error)
    }

    /// Add an error unless an identical one is present
    pub fn try_add_error(&self, error: Error) -> Result<bool> {
        Ok(self.collection("try_add_error")?.try_add_error(error))
    }

    /// Set the cause of the wrapped collection; `None` clears it
    pub fn set_cause(&self, cause: Option<ErrorCollection>) -> Result<()> {
        self.collection("set_cause")?.set_cause(cause)
    }

    /// Use another error-state `Suspicious` as the cause
    pub fn set_cause_from<U>(&self, other: &Suspicious<U>) -> Result<()> {
        let collection = self.collection("set_cause_from")?;
        let cause = other.collection("set_cause_from")?;
        collection.set_cause(Some(cause.clone()))
    }

    /// First local error of the given kind
    pub fn find_by_kind(&self, kind: &ErrorKind) -> Result<Option<Error>> {
        Ok(self.collection("find_by_kind")?.find_by_kind(kind))
    }

    /// First error of the given kind anywhere in the chains
    pub fn find_by_kind_deep(&self, kind: &ErrorKind) -> Result<Option<Error>> {
        Ok(self.collection("find_by_kind_deep")?.find_by_kind_deep(kind))
    }

    /// Most severe error anywhere in the chains
    pub fn most_severe_deep(&self) -> Result<Option<Error>> {
        Ok(self.collection("most_severe_deep")?.most_severe_deep())
    }
}

impl<T: fmt::Display> Render for Suspicious<T> {
    fn render(&self, style: &RenderStyle) -> String {
        match self {
            Suspicious::Value(value) => value.to_string(),
            Suspicious::Error(collection) => collection.render(style),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Suspicious<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderStyle::full()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(description: &str) -> Suspicious<u32> {
        let error = Error::failure(description, None).unwrap();
        let collection = ErrorCollection::create("calc", "computation failed", [error]).unwrap();
        Suspicious::from_error_collection(collection)
    }

    #[test]
    fn test_value_state() {
        let s = Suspicious::from_value(42);
        assert!(s.is_value());
        assert!(s.is_success());
        assert!(!s.is_error());
        assert!(!s.is_unrecorded_failure());
        assert_eq!(s.unwrap_value().unwrap(), &42);
        assert_eq!(s.into_value().unwrap(), 42);
    }

    #[test]
    fn test_error_state() {
        let s = failed("overflow");
        assert!(s.is_error());
        assert!(!s.is_success());
        assert_eq!(s.unwrap_error_collection().unwrap().len(), 1);
    }

    #[test]
    fn test_from_option() {
        assert!(Suspicious::from_option(Some(1)).unwrap().is_value());
        assert!(Suspicious::<u8>::from_option(None)
            .is_err_and(|e| e.as_str() == "ValidationError"));
    }

    #[test]
    fn test_wrong_state() {
        let value = Suspicious::from_value("ok");
        assert!(value
            .unwrap_error_collection()
            .is_err_and(|e| e.as_str() == "InvalidStateError"));
        assert!(value
            .add_error(Error::failure("late", None).unwrap())
            .is_err_and(|e| e.as_str() == "InvalidStateError"));
        assert!(value.find_by_kind(&ErrorKind::FAILURE).is_err());
        assert!(value.most_severe_deep().is_err());
        assert!(value.set_cause(None).is_err());

        let error = failed("overflow");
        assert!(error
            .unwrap_value()
            .is_err_and(|e| e.as_str() == "InvalidStateError"));
        assert!(error.into_value().is_err());
    }

    #[test]
    fn test_unrecorded_failure() {
        let collection = ErrorCollection::empty("calc", "computation failed").unwrap();
        let s: Suspicious<u32> = Suspicious::from_error_collection(collection);
        assert!(s.is_error());
        assert!(s.is_unrecorded_failure());

        s.add_error(Error::failure("overflow", None).unwrap()).unwrap();
        assert!(!s.is_unrecorded_failure());
    }

    #[test]
    fn test_from_error() {
        let s: Suspicious<()> = Suspicious::from_error(Error::no_result("no rows", None).unwrap());
        let collection = s.unwrap_error_collection().unwrap();
        assert_eq!(collection.category(), "NoResult");
        assert_eq!(collection.header(), "no rows");
        assert!(s.find_by_kind(&ErrorKind::NO_RESULT).unwrap().is_some());
    }

    #[test]
    fn test_add_error_delegates() {
        let s = failed("overflow");
        assert!(s.try_add_error(Error::failure("underflow", None).unwrap()).unwrap());
        assert!(!s.try_add_error(Error::failure("underflow", None).unwrap()).unwrap());
        assert!(s
            .add_error(Error::failure("overflow", None).unwrap())
            .is_err_and(|e| e.as_str() == "DuplicateError"));
        assert_eq!(s.unwrap_error_collection().unwrap().len(), 2);
    }

    #[test]
    fn test_set_cause_from() {
        let outer = failed("outer");
        let inner = failed("inner");
        outer.set_cause_from(&inner).unwrap();
        assert!(outer
            .unwrap_error_collection()
            .unwrap()
            .contains_errors_deep());
        assert!(inner.set_cause_from(&outer).is_err_and(|e| e.as_str() == "CycleError"));
        assert!(outer.set_cause_from(&outer).is_err_and(|e| e.as_str() == "SelfReferenceError"));
        assert!(outer.set_cause_from(&Suspicious::from_value(1)).is_err());
    }

    #[test]
    fn test_combinators() {
        let doubled = Suspicious::from_value(21).map(|v| v * 2);
        assert_eq!(doubled.ok_value(), Some(42));

        let chained = Suspicious::from_value(1).and_then(|_| failed("nope"));
        assert!(chained.is_error());

        let mapped = failed("nope").map(|v| v + 1);
        assert!(mapped.into_result().is_err());

        let s = Suspicious::from_value(String::from("x"));
        assert_eq!(s.as_ref().into_value().unwrap(), "x");
    }

    #[test]
    fn test_markers() {
        assert!(ok().is_success());
        assert_eq!(success().into_value().unwrap(), marker::Success);
    }

    #[test]
    fn test_display() {
        assert_eq!(Suspicious::from_value(7).to_string(), "7");
        assert_eq!(
            failed("overflow").to_string(),
            "[calc] computation failed: [Failure: overflow]"
        );
    }
}
