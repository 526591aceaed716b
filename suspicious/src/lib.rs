//! # suspicious
//!
//! A value-or-errors wrapper for explicit, traceable error propagation
//! without panics or ad-hoc error strings.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: What went wrong, ranked by severity
//! - **Error**: One failure, optionally caused by another
//! - **ErrorCollection**: The failures of one layer, optionally caused by the
//!   collection of the layer below
//! - **Suspicious<T>**: Either the value or the collection explaining its absence
//!
//! ## Usage
//!
//! ```rust
//! use suspicious::{Error, ErrorCollection, ErrorKind, Render, Suspicious};
//!
//! let disk = Error::failure("disk full", None).unwrap();
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "write(2) returned ENOSPC");
//! let write = Error::unexpected_from_exception(io, None, Some(disk.clone())).unwrap();
//!
//! let collection = ErrorCollection::create("io", "write failed", [write]).unwrap();
//! let result: Suspicious<String> = Suspicious::from_error_collection(collection);
//!
//! assert_eq!(result.most_severe_deep().unwrap().unwrap().kind(), &ErrorKind::UNEXPECTED);
//! assert_eq!(result.find_by_kind_deep(&ErrorKind::FAILURE).unwrap(), Some(disk));
//!
//! // operators get everything, users get the redacted form
//! let for_logs = result.to_string();
//! let for_users = result.redacted().to_string();
//! assert!(for_logs.contains("details"));
//! assert!(!for_users.contains("details"));
//! ```
//!
//! ## Principles
//!
//! - Contract violations (blank descriptions, cause cycles, wrong-state access,
//!   strict duplicate inserts) are returned as [`ContractError`], never panics
//! - Cause chains are checked on every assignment and never loop
//! - Collections are append-only

mod collection;
mod error;
mod fault;
pub mod guard;
mod kind;
pub mod marker;
pub mod render;
mod suspicious;

pub use collection::{CollectionChain, ErrorCollection};
pub use error::{Chain, Error};
pub use fault::{ContractError, Result};
pub use kind::ErrorKind;
pub use render::{Redacted, Render, RenderStyle};
pub use suspicious::{ok, success, Suspicious};
