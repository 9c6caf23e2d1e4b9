//! Source file representation: kind tag, package, facade name and declarations.

use crate::declaration::Declaration;
use crate::file_id::FileId;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strata_common::{ContentHash, Ident};

/// Suffix appended to a file's stem to form its default facade class name.
const FACADE_SUFFIX: &str = "Kt";

/// How a file's content is backed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FileKind {
    /// Live, editable source text that the analysis engine can resolve.
    Source,
    /// A precompiled file: decompiled text standing in for a binary class.
    Compiled,
    /// A script file. Scripts never contribute to facades.
    Script,
}

/// A file registered in the [`SourceDb`](crate::SourceDb).
///
/// Files are immutable once registered and are shared by `Arc`, so every
/// cache that holds on to a file set sees the same instances.
#[derive(Debug)]
pub struct SourceFile {
    /// The unique identifier for this file within its database.
    pub id: FileId,
    /// The filesystem path (or a synthetic name for in-memory files).
    pub path: PathBuf,
    /// Whether the file is editable source, precompiled or a script.
    pub kind: FileKind,
    /// The declared package, interned. The root package is the empty string.
    pub package: Ident,
    /// Qualified name of the facade class this file's top-level callables
    /// compile into (`com.example.FooKt` for `com/example/foo.kt`).
    pub facade_name: Ident,
    /// Top-level declarations, in source order.
    pub declarations: Vec<Declaration>,
    /// The full text content of the file.
    pub content: String,
    /// Hash of the file content.
    pub content_hash: ContentHash,
}

impl SourceFile {
    /// Returns `true` if the file is backed by a decompiled binary class.
    pub fn is_compiled(&self) -> bool {
        self.kind == FileKind::Compiled
    }

    /// Returns `true` if the file is a script.
    pub fn is_script(&self) -> bool {
        self.kind == FileKind::Script
    }

    /// A location covering the start of this file.
    pub fn location(&self) -> Span {
        Span::file_start(self.id)
    }

    /// Top-level classes and objects declared in this file.
    pub fn classes_and_objects(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|decl| decl.kind.is_class_or_object())
    }
}

/// Computes the default short facade name for a file path.
///
/// The file stem is capitalised and suffixed with `Kt`: `foo.kt` becomes
/// `FooKt`, `Foo1.kt` becomes `Foo1Kt`. Characters that cannot appear in a
/// class name are replaced with `_`.
pub fn default_facade_short_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let mut name = String::with_capacity(stem.len() + FACADE_SUFFIX.len());
    for (i, c) in stem.chars().enumerate() {
        let c = if c.is_alphanumeric() || c == '_' { c } else { '_' };
        if i == 0 {
            name.extend(c.to_uppercase());
        } else {
            name.push(c);
        }
    }
    name.push_str(FACADE_SUFFIX);
    name
}
