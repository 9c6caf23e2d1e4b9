//! Source file model shared by the session and facade caches.
//!
//! This crate provides the [`SourceDb`] that owns every loaded file, the
//! [`FileId`] and [`Span`] types used as file identities and source
//! locations, and the [`FileKind`] tag separating editable sources from
//! precompiled (decompiled) files and scripts.

#![warn(missing_docs)]

pub mod declaration;
pub mod file_id;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use declaration::{Declaration, DeclarationKind};
pub use file_id::FileId;
pub use source_db::{FileSpec, SourceDb};
pub use source_file::{FileKind, SourceFile};
pub use span::Span;
