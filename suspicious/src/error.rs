//! The Error node and its cause chain

use crate::fault::{ContractError, Result};
use crate::guard;
use crate::kind::ErrorKind;
use crate::render::{self, Render, RenderStyle};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A single error, optionally caused by another one.
///
/// - `kind`: classification and severity
/// - `description`: human-readable, never blank
/// - `details`: raw diagnostic text such as a captured backtrace; omitted
///   from redacted renderings
/// - `cause`: the error that led to this one
///
/// `Error` is a handle: cloning it shares the same node, and a cause set
/// through one handle is visible through all of them. Cause assignments are
/// checked so the chain never loops back on itself.
///
/// # Example
///
/// ```rust
/// use suspicious::{Error, ErrorKind};
///
/// let disk = Error::failure("disk full", None).unwrap();
/// let write = Error::new(ErrorKind::UNEXPECTED, "write failed").unwrap();
/// write.set_cause(Some(disk.clone())).unwrap();
///
/// assert_eq!(write.find_by_kind(&ErrorKind::FAILURE), Some(disk.clone()));
/// assert!(disk.set_cause(Some(write)).is_err());
/// ```
#[derive(Clone)]
pub struct Error {
    node: Rc<ErrorNode>,
}

struct ErrorNode {
    kind: ErrorKind,
    description: String,
    details: Option<String>,
    cause: RefCell<Option<Error>>,
}

// Unlinks the chain one node at a time so long chains don't overflow the stack.
impl Drop for ErrorNode {
    fn drop(&mut self) {
        let mut next = self.cause.get_mut().take();
        while let Some(error) = next {
            match Rc::try_unwrap(error.node) {
                Ok(mut node) => next = node.cause.get_mut().take(),
                Err(_) => break,
            }
        }
    }
}

impl Error {
    /// Create an error of the given kind
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Result<Self> {
        Self::create(kind, description, None, None)
    }

    /// Create an error with optional details and cause.
    ///
    /// Fails if the description is blank or the cause chain is malformed.
    pub fn create(
        kind: ErrorKind,
        description: impl Into<String>,
        details: Option<String>,
        cause: Option<Error>,
    ) -> Result<Self> {
        let description = description.into();
        guard::not_blank("description", &description)?;

        if let Some(cause) = &cause {
            cause.check_chain(None)?;
        }

        Ok(Error {
            node: Rc::new(ErrorNode {
                kind,
                description,
                details,
                cause: RefCell::new(cause),
            }),
        })
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> &ErrorKind {
        &self.node.kind
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.node.description
    }

    /// Get the details (if any)
    pub fn details(&self) -> Option<&str> {
        self.node.details.as_deref()
    }

    /// Get the direct cause (if any)
    pub fn cause(&self) -> Option<Error> {
        self.node.cause.borrow().clone()
    }

    /// Check if two handles point at the same node
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    // =========================================================================
    // Cause chain
    // =========================================================================

    /// Replace the cause; `None` clears it.
    ///
    /// Fails without touching the current cause if `cause` is this error or
    /// its chain reaches back to this error.
    pub fn set_cause(&self, cause: Option<Error>) -> Result<()> {
        if let Some(cause) = &cause {
            if let Err(err) = cause.check_chain(Some(self)) {
                tracing::debug!(
                    kind = %self.kind(),
                    description = %self.description(),
                    "rejected error cause"
                );
                return Err(err);
            }
        }

        *self.node.cause.borrow_mut() = cause;
        tracing::trace!(
            kind = %self.kind(),
            description = %self.description(),
            "error cause updated"
        );
        Ok(())
    }

    /// Walk the chain starting at `self`, failing on a repeated node or on
    /// reaching `owner`.
    fn check_chain(&self, owner: Option<&Error>) -> Result<()> {
        let mut seen = HashSet::new();
        for link in self.chain() {
            let repeated = !seen.insert(Rc::as_ptr(&link.node));
            let closes_loop = owner.is_some_and(|owner| owner.ptr_eq(&link));
            if repeated || closes_loop {
                let subject = owner.unwrap_or(self);
                return Err(ContractError::cycle(format!(
                    "error '{}'",
                    subject.description()
                )));
            }
        }
        Ok(())
    }

    /// Iterate over this error and its causes, nearest first
    pub fn chain(&self) -> Chain {
        Chain {
            next: Some(self.clone()),
        }
    }

    /// Number of errors in the chain, including this one
    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }

    /// The deepest cause (this error if it has none)
    pub fn root_cause(&self) -> Error {
        self.chain().last().unwrap_or_else(|| self.clone())
    }

    /// First error in the chain with the given kind
    pub fn find_by_kind(&self, kind: &ErrorKind) -> Option<Error> {
        self.chain().find(|e| e.kind() == kind)
    }

    /// Most severe error in the chain; ties go to the one nearest `self`
    pub fn most_severe_in_chain(&self) -> Error {
        let mut chain = self.chain();
        let mut worst = chain.next().unwrap_or_else(|| self.clone());
        for link in chain {
            if link.kind().cmp_priority(worst.kind()).is_gt() {
                worst = link;
            }
        }
        worst
    }

    fn render_node(&self, style: &RenderStyle) -> String {
        let mut out = format!("{}: {}", self.kind(), self.description());
        if style.include_details {
            if let Some(details) = self.details() {
                out.push_str(&format!(" [details: {}]", details));
            }
        }
        out
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl Error {
    /// Create a Failure error
    pub fn failure(description: impl Into<String>, cause: Option<Error>) -> Result<Self> {
        Self::create(ErrorKind::FAILURE, description, None, cause)
    }

    /// Create a NoResult error
    pub fn no_result(description: impl Into<String>, cause: Option<Error>) -> Result<Self> {
        Self::create(ErrorKind::NO_RESULT, description, None, cause)
    }

    /// Create an Unexpected error from a foreign error.
    ///
    /// `details` captures the full message chain (and a backtrace when
    /// capture is enabled). Without a description, one is built from the
    /// message chain.
    pub fn unexpected_from_exception(
        exception: impl Into<anyhow::Error>,
        description: Option<&str>,
        cause: Option<Error>,
    ) -> Result<Self> {
        let exception = exception.into();
        let details = format!("{:?}", exception);
        let description = match description {
            Some(description) => description.to_string(),
            None => {
                let synthesized = format!("{:#}", exception);
                if synthesized.trim().is_empty() {
                    "unexpected error".to_string()
                } else {
                    synthesized
                }
            }
        };
        Self::create(ErrorKind::UNEXPECTED, description, Some(details), cause)
    }
}

/// Iterator over an error and its causes
pub struct Chain {
    next: Option<Error>,
}

impl Iterator for Chain {
    type Item = Error;

    fn next(&mut self) -> Option<Error> {
        let current = self.next.take()?;
        self.next = current.cause();
        Some(current)
    }
}

// =============================================================================
// Equality - structural, including the cause chain
// =============================================================================

// Causes are shared handles, so equality can change after `set_cause`.
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.chain();
        let mut right = other.chain();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) => {
                    if a.ptr_eq(&b) {
                        return true;
                    }
                    if a.kind() != b.kind()
                        || a.description() != b.description()
                        || a.details() != b.details()
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Error {}

// The cause is left out so the hash survives `set_cause`.
impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.description().hash(state);
        self.details().hash(state);
    }
}

// =============================================================================
// Display / Debug
// =============================================================================

impl Render for Error {
    fn render(&self, style: &RenderStyle) -> String {
        let links = self.chain().map(|e| e.render_node(style));
        render::chain(links, &style.error_link, style.max_depth)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderStyle::full()))
    }
}

/// One chain link without its cause
struct Link<'a>(&'a Error);

impl fmt::Debug for Link<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.0.kind().name())
            .field("description", &self.0.description())
            .field("details", &self.0.details())
            .finish()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let causes: Vec<Error> = self.chain().skip(1).collect();
        f.debug_struct("Error")
            .field("kind", &self.kind().name())
            .field("description", &self.description())
            .field("details", &self.details())
            .field("causes", &causes.iter().map(Link).collect::<Vec<_>>())
            .finish()
    }
}
