//! Shared foundational types used across the Strata analysis caches.
//!
//! This crate provides interned qualified names, content hashing for source
//! files and compiled classes, and the internal error type shared by the
//! collaborator traits.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use result::{InternalError, StrataResult};
