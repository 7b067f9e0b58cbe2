//! syndic core: manifest model, policy compilation, and error types.
//!
//! This crate defines what a reconciliation run consumes (the manifest) and
//! the pure transformations applied to it (grant lists into the cluster's
//! nested policy-document format). It intentionally carries no transport or
//! runtime dependencies so the reconciler and its tests can share it freely.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SyndicError`/`Result` so a bad
//! manifest fails the run instead of crashing it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod manifest;
pub mod policy;

/// Shared result type.
pub use error::{Result, SyndicError};
