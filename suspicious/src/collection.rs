//! # Error collections
//!
//! A named, categorized set of [`Error`]s with an optional cause collection.
//! Collections chain the same way errors do, so a failure can be traced
//! across layers: each layer records its own errors and points at the
//! collection of the layer below.

use crate::error::Error;
use crate::fault::{ContractError, Result};
use crate::guard;
use crate::kind::ErrorKind;
use crate::render::{self, Render, RenderStyle};
use std::cell::RefCell;
use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;

/// A categorized, append-only set of errors.
///
/// Errors are unique by structural equality: adding an error identical to
/// one already present is a no-op (`try_add_error`) or a contract violation
/// (`add_error`). Insertion order is kept for rendering and searches.
///
/// Like [`Error`], this is a handle: clones share the same collection.
///
/// Uniqueness is checked on insert. An error's cause can still be changed
/// through any handle afterwards, so two errors that differed only in their
/// causes when added may compare equal later; both stay in the collection.
///
/// ```rust
/// use suspicious::{Error, ErrorCollection, ErrorKind};
///
/// let storage = ErrorCollection::empty("storage", "flush failed").unwrap();
/// storage.add_error(Error::failure("disk full", None).unwrap()).unwrap();
///
/// let api = ErrorCollection::empty("api", "upload rejected").unwrap();
/// api.set_cause(Some(storage)).unwrap();
///
/// assert!(!api.contains_errors());
/// assert!(api.contains_errors_deep());
/// assert!(api.find_by_kind_deep(&ErrorKind::FAILURE).is_some());
/// ```
#[derive(Clone)]
pub struct ErrorCollection {
    node: Rc<CollectionNode>,
}

struct CollectionNode {
    category: String,
    header: String,
    errors: RefCell<ErrorSet>,
    cause: RefCell<Option<ErrorCollection>>,
}

// Unlinks the cause chain one collection at a time.
impl Drop for CollectionNode {
    fn drop(&mut self) {
        let mut next = self.cause.get_mut().take();
        while let Some(collection) = next {
            match Rc::try_unwrap(collection.node) {
                Ok(mut node) => next = node.cause.get_mut().take(),
                Err(_) => break,
            }
        }
    }
}

/// Insertion-ordered errors, indexed by the hash of their immutable fields
#[derive(Default)]
struct ErrorSet {
    items: Vec<Error>,
    index: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
}

impl ErrorSet {
    fn contains(&self, error: &Error) -> bool {
        let fingerprint = self.hasher.hash_one(error);
        self.index
            .get(&fingerprint)
            .is_some_and(|positions| positions.iter().any(|&i| self.items[i] == *error))
    }

    fn insert(&mut self, error: Error) {
        let fingerprint = self.hasher.hash_one(&error);
        self.index
            .entry(fingerprint)
            .or_default()
            .push(self.items.len());
        self.items.push(error);
    }
}

impl ErrorCollection {
    /// Create a collection without errors
    pub fn empty(category: impl Into<String>, header: impl Into<String>) -> Result<Self> {
        let category = category.into();
        let header = header.into();
        guard::not_blank("category", &category)?;
        guard::not_blank("header", &header)?;

        Ok(ErrorCollection {
            node: Rc::new(CollectionNode {
                category,
                header,
                errors: RefCell::new(ErrorSet::default()),
                cause: RefCell::new(None),
            }),
        })
    }

    /// Create a collection from at least one error; duplicates collapse
    pub fn create(
        category: impl Into<String>,
        header: impl Into<String>,
        errors: impl IntoIterator<Item = Error>,
    ) -> Result<Self> {
        let errors: Vec<Error> = errors.into_iter().collect();
        guard::not_empty("errors", &errors)?;

        let collection = Self::empty(category, header)?;
        collection.try_add_errors(errors);
        Ok(collection)
    }

    /// Wrap one error; the category is its kind name and the header its description
    pub fn single(error: Error) -> Self {
        let category = error.kind().name().to_string();
        let header = error.description().to_string();
        let mut errors = ErrorSet::default();
        errors.insert(error);
        ErrorCollection {
            node: Rc::new(CollectionNode {
                category,
                header,
                errors: RefCell::new(errors),
                cause: RefCell::new(None),
            }),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the category
    pub fn category(&self) -> &str {
        &self.node.category
    }

    /// Get the header
    pub fn header(&self) -> &str {
        &self.node.header
    }

    /// Snapshot of the local errors, in insertion order
    pub fn errors(&self) -> Vec<Error> {
        self.node.errors.borrow().items.clone()
    }

    /// Number of local errors
    pub fn len(&self) -> usize {
        self.node.errors.borrow().items.len()
    }

    /// Check if there are no local errors
    pub fn is_empty(&self) -> bool {
        self.node.errors.borrow().items.is_empty()
    }

    /// Get the cause collection (if any)
    pub fn cause(&self) -> Option<ErrorCollection> {
        self.node.cause.borrow().clone()
    }

    /// Check if two handles point at the same collection
    pub fn ptr_eq(&self, other: &ErrorCollection) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    // =========================================================================
    // Adding errors
    // =========================================================================

    /// Add an error, failing if an identical one is already present
    pub fn add_error(&self, error: Error) -> Result<()> {
        if self.contains(&error) {
            tracing::debug!(
                category = %self.category(),
                description = %error.description(),
                "rejected duplicate error"
            );
            return Err(ContractError::duplicate(error.description()));
        }
        self.push(error);
        Ok(())
    }

    /// Add an error unless an identical one is present; returns whether it was added
    pub fn try_add_error(&self, error: Error) -> bool {
        if self.contains(&error) {
            return false;
        }
        self.push(error);
        true
    }

    /// Add several errors; nothing is added if any of them is a duplicate
    pub fn add_errors(&self, errors: impl IntoIterator<Item = Error>) -> Result<()> {
        let errors: Vec<Error> = errors.into_iter().collect();
        let mut batch = ErrorSet::default();
        for error in &errors {
            if self.contains(error) || batch.contains(error) {
                tracing::debug!(
                    category = %self.category(),
                    description = %error.description(),
                    "rejected duplicate error"
                );
                return Err(ContractError::duplicate(error.description()));
            }
            batch.insert(error.clone());
        }
        for error in errors {
            self.push(error);
        }
        Ok(())
    }

    /// Add the errors that are not already present; returns how many were added
    pub fn try_add_errors(&self, errors: impl IntoIterator<Item = Error>) -> usize {
        errors
            .into_iter()
            .filter(|error| self.try_add_error(error.clone()))
            .count()
    }

    fn contains(&self, error: &Error) -> bool {
        self.node.errors.borrow().contains(error)
    }

    fn push(&self, error: Error) {
        tracing::trace!(
            category = %self.category(),
            kind = %error.kind(),
            description = %error.description(),
            "error added"
        );
        self.node.errors.borrow_mut().insert(error);
    }

    // =========================================================================
    // Cause chain
    // =========================================================================

    /// Replace the cause collection; `None` clears it.
    ///
    /// Fails without touching the current cause if `cause` is this collection
    /// or its chain reaches back to it.
    pub fn set_cause(&self, cause: Option<ErrorCollection>) -> Result<()> {
        if let Some(cause) = &cause {
            if cause.ptr_eq(self) {
                tracing::debug!(category = %self.category(), header = %self.header(), "rejected self cause");
                return Err(ContractError::self_reference(self.subject()));
            }

            let mut seen = HashSet::new();
            for link in cause.chain() {
                if link.ptr_eq(self) || !seen.insert(Rc::as_ptr(&link.node)) {
                    tracing::debug!(category = %self.category(), header = %self.header(), "rejected cyclic cause");
                    return Err(ContractError::cycle(self.subject()));
                }
            }
        }

        *self.node.cause.borrow_mut() = cause;
        tracing::trace!(category = %self.category(), header = %self.header(), "collection cause updated");
        Ok(())
    }

    fn subject(&self) -> String {
        format!("collection '{}'", self.header())
    }

    /// Iterate over this collection and its cause collections, nearest first
    pub fn chain(&self) -> CollectionChain {
        CollectionChain {
            next: Some(self.clone()),
        }
    }

    /// Number of collections in the chain, including this one
    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check for local errors only
    pub fn contains_errors(&self) -> bool {
        !self.is_empty()
    }

    /// Check for errors here or anywhere in the cause chain
    pub fn contains_errors_deep(&self) -> bool {
        self.chain().any(|c| c.contains_errors())
    }

    /// Local errors followed by those of each cause collection, nearest first
    pub fn all_errors(&self) -> Vec<Error> {
        self.chain().flat_map(|c| c.errors()).collect()
    }

    /// First local error of the given kind
    pub fn find_by_kind(&self, kind: &ErrorKind) -> Option<Error> {
        self.node
            .errors
            .borrow()
            .items
            .iter()
            .find(|e| e.kind() == kind)
            .cloned()
    }

    /// First error of the given kind, searching every collection in the chain
    /// and every error's own cause chain
    pub fn find_by_kind_deep(&self, kind: &ErrorKind) -> Option<Error> {
        self.all_errors()
            .iter()
            .find_map(|error| error.find_by_kind(kind))
    }

    /// Most severe error reachable from this collection; ties go to the one
    /// found first (local errors before causes, each error before its own causes)
    pub fn most_severe_deep(&self) -> Option<Error> {
        let mut worst: Option<Error> = None;
        for error in self.all_errors() {
            let candidate = error.most_severe_in_chain();
            let replace = worst
                .as_ref()
                .map_or(true, |w| candidate.kind().cmp_priority(w.kind()).is_gt());
            if replace {
                worst = Some(candidate);
            }
        }
        worst
    }

    /// Headline kind of the whole chain, for callers that branch on one code
    pub fn highest_kind_deep(&self) -> Option<ErrorKind> {
        let kinds: Vec<ErrorKind> = self
            .all_errors()
            .iter()
            .flat_map(|e| e.chain())
            .map(|e| e.kind().clone())
            .collect();
        ErrorKind::kind_with_highest_priority(&kinds).ok().cloned()
    }

    fn render_node(&self, style: &RenderStyle) -> String {
        let errors = self.node.errors.borrow();
        let rendered = errors.items.iter().map(|e| e.render(style));
        format!(
            "[{}] {}: [{}]",
            self.category(),
            self.header(),
            render::join(rendered, &style.list_separator)
        )
    }
}

/// Iterator over a collection and its cause collections
pub struct CollectionChain {
    next: Option<ErrorCollection>,
}

impl Iterator for CollectionChain {
    type Item = ErrorCollection;

    fn next(&mut self) -> Option<ErrorCollection> {
        let current = self.next.take()?;
        self.next = current.cause();
        Some(current)
    }
}

impl Render for ErrorCollection {
    fn render(&self, style: &RenderStyle) -> String {
        let links = self.chain().map(|c| c.render_node(style));
        render::chain(links, &style.collection_link, style.max_depth)
    }
}

impl fmt::Display for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderStyle::full()))
    }
}

/// One collection in the chain without its cause
struct Link<'a>(&'a ErrorCollection);

impl fmt::Debug for Link<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCollection")
            .field("category", &self.0.category())
            .field("header", &self.0.header())
            .field("errors", &self.0.node.errors.borrow().items)
            .finish()
    }
}

impl fmt::Debug for ErrorCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let causes: Vec<ErrorCollection> = self.chain().skip(1).collect();
        f.debug_struct("ErrorCollection")
            .field("category", &self.category())
            .field("header", &self.header())
            .field("errors", &self.node.errors.borrow().items)
            .field("causes", &causes.iter().map(Link).collect::<Vec<_>>())
            .finish()
    }
}
