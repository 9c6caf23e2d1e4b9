//! Resolved symbols, as far as the session directory cares about them.

use std::sync::Arc;

use strata_common::Ident;

use crate::session::ModuleSession;

/// A symbol handed back to the session directory by a caller.
///
/// Only symbols produced by this system's own resolution machinery carry
/// the session they were resolved in. Symbols from anywhere else (an index
/// of a foreign language, a stub provider) can be described but not mapped
/// to a session.
#[derive(Debug)]
pub enum ResolvedSymbol<S> {
    /// A symbol resolved through a [`ModuleSession`].
    Analyzed(AnalyzedSymbol<S>),
    /// A symbol from outside the resolution machinery.
    Foreign(ForeignSymbol),
}

impl<S> ResolvedSymbol<S> {
    /// The embedded session, or the foreign symbol that has none.
    pub fn session(&self) -> Result<&Arc<ModuleSession<S>>, &ForeignSymbol> {
        match self {
            ResolvedSymbol::Analyzed(symbol) => Ok(&symbol.session),
            ResolvedSymbol::Foreign(foreign) => Err(foreign),
        }
    }
}

/// A symbol resolved in a session of this system.
#[derive(Debug)]
pub struct AnalyzedSymbol<S> {
    /// The symbol's qualified name.
    pub name: Ident,
    /// The session the symbol was resolved in.
    pub session: Arc<ModuleSession<S>>,
}

impl<S> AnalyzedSymbol<S> {
    /// Creates a symbol resolved in `session`.
    pub fn new(name: Ident, session: Arc<ModuleSession<S>>) -> Self {
        Self { name, session }
    }
}

/// A symbol that did not come from this system's resolution machinery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignSymbol {
    /// Human-readable rendering of the symbol.
    pub description: String,
    /// The provider the symbol came from.
    pub origin: String,
}

impl ForeignSymbol {
    /// Describes a foreign symbol.
    pub fn new(description: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            origin: origin.into(),
        }
    }
}
