//! Top-level declarations found in a source file.

use serde::{Deserialize, Serialize};
use strata_common::Ident;

use crate::span::Span;

/// The kind of a top-level declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// A top-level function.
    Function,
    /// A top-level property.
    Property,
    /// A class (including interfaces and enum classes).
    Class,
    /// An object declaration.
    Object,
    /// A type alias.
    TypeAlias,
}

impl DeclarationKind {
    /// Returns `true` for classes and objects, the declarations a decompiled
    /// facade may be paired with.
    pub fn is_class_or_object(self) -> bool {
        matches!(self, DeclarationKind::Class | DeclarationKind::Object)
    }
}

/// A single top-level declaration: its kind, simple name and location.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Declaration {
    /// What sort of declaration this is.
    pub kind: DeclarationKind,
    /// The simple (unqualified) name.
    pub name: Ident,
    /// Where the name appears in its file.
    pub span: Span,
}
