//! Error kinds and their severity ranking

use crate::fault::{ContractError, Result};
use crate::guard;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named, priority-ranked classification tag for errors.
///
/// Higher priority means more severe. Four kinds are predefined and occupy
/// reserved slots in the ranking:
///
/// `NO_RESULT` < `FAILURE` < ... < `UNEXPECTED` < `UNSPECIFIED`
///
/// Custom kinds can take any other priority, so they may rank below or above
/// `FAILURE` but never above `UNEXPECTED`. Equality is by name.
///
/// ```rust
/// use suspicious::ErrorKind;
///
/// let timeout = ErrorKind::custom("Timeout", 10).unwrap();
/// assert!(timeout.cmp_priority(&ErrorKind::FAILURE).is_gt());
/// assert!(timeout.cmp_priority(&ErrorKind::UNEXPECTED).is_lt());
/// ```
#[derive(Debug, Clone)]
pub struct ErrorKind {
    name: Cow<'static, str>,
    priority: i32,
}

impl ErrorKind {
    // =========================================================================
    // Predefined kinds
    // =========================================================================

    /// Absence of a result rather than a hard failure
    pub const NO_RESULT: ErrorKind = ErrorKind::predefined_kind("NoResult", i32::MIN);

    /// A deliberately raised domain failure
    pub const FAILURE: ErrorKind = ErrorKind::predefined_kind("Failure", 0);

    /// An uncaught or uncategorized failure, e.g. a wrapped foreign error
    pub const UNEXPECTED: ErrorKind = ErrorKind::predefined_kind("Unexpected", i32::MAX - 1);

    /// A totally unspecified state, worse than anything named
    pub const UNSPECIFIED: ErrorKind = ErrorKind::predefined_kind("Unspecified", i32::MAX);

    const fn predefined_kind(name: &'static str, priority: i32) -> Self {
        ErrorKind {
            name: Cow::Borrowed(name),
            priority,
        }
    }

    /// All predefined kinds, lowest priority first
    pub fn predefined() -> [ErrorKind; 4] {
        [
            ErrorKind::NO_RESULT,
            ErrorKind::FAILURE,
            ErrorKind::UNEXPECTED,
            ErrorKind::UNSPECIFIED,
        ]
    }

    /// Create a custom kind.
    ///
    /// Fails if the name is blank, or if the name or priority is already
    /// taken by a predefined kind.
    pub fn custom(name: impl Into<String>, priority: i32) -> Result<Self> {
        let name = name.into();
        guard::not_blank("name", &name)?;

        for reserved in ErrorKind::predefined() {
            if reserved.name() == name {
                return Err(ContractError::validation(
                    "name",
                    format!("'{}' is reserved for a predefined kind", name),
                ));
            }
            if reserved.priority == priority {
                return Err(ContractError::validation(
                    "priority",
                    format!("{} is reserved for '{}'", priority, reserved.name),
                ));
            }
        }

        Ok(ErrorKind {
            name: Cow::Owned(name),
            priority,
        })
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the kind name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the priority (higher = more severe)
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Check if this is one of the predefined kinds
    pub fn is_predefined(&self) -> bool {
        ErrorKind::predefined().iter().any(|k| k == self)
    }

    // =========================================================================
    // Ranking
    // =========================================================================

    /// Compare two kinds by priority
    pub fn cmp_priority(&self, other: &ErrorKind) -> Ordering {
        self.priority.cmp(&other.priority)
    }

    /// Compare two optional kinds by priority; an absent kind sorts lowest
    pub fn compare(a: Option<&ErrorKind>, b: Option<&ErrorKind>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => a.cmp_priority(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }

    /// Return the most severe kind; ties go to the earliest one.
    ///
    /// Fails if `kinds` is empty.
    pub fn kind_with_highest_priority<'a, I>(kinds: I) -> Result<&'a ErrorKind>
    where
        I: IntoIterator<Item = &'a ErrorKind>,
    {
        let mut kinds = kinds.into_iter();
        let mut highest = kinds
            .next()
            .ok_or_else(|| ContractError::validation("kinds", "must not be empty"))?;

        for kind in kinds {
            if kind.cmp_priority(highest).is_gt() {
                highest = kind;
            }
        }
        Ok(highest)
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ErrorKind {}

impl Hash for ErrorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
