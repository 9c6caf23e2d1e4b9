//! Error types for session and facade lookups.

use strata_common::InternalError;
use strata_project::ModuleId;

/// Result type of every lookup in this crate.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that end a single session or facade lookup.
///
/// None of these is recovered from or retried here. Apart from
/// [`Engine`](ResolveError::Engine) they all describe a request that correct
/// callers never make.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The symbol was not produced by this system's resolution machinery and
    /// therefore carries no session.
    #[error("invalid symbol kind: {symbol} (from {origin}) carries no resolution session")]
    InvalidSymbolKind {
        /// Description of the offending symbol.
        symbol: String,
        /// Where the symbol came from.
        origin: String,
    },

    /// The module is not owned by any project and cannot be resolved.
    #[error("invalid module state: {module} has no owning project")]
    InvalidModuleState {
        /// The module that was looked up.
        module: ModuleId,
    },

    /// A facade request mixed editable and precompiled files.
    #[error("source and compiled files are mixed for facade {name}: {files}")]
    MixedFacadeInputs {
        /// The requested facade name.
        name: String,
        /// The offending files with their kinds.
        files: String,
    },

    /// No precompiled file in the request compiles to the requested facade.
    #[error("can't find the representative decompiled file for {name}")]
    MissingRepresentativeFile {
        /// The requested facade name.
        name: String,
    },

    /// The representative file declares more than one top-level class or
    /// object, so the decompiled facade cannot be paired with one of them.
    #[error("representative file {file} of facade {name} declares {count} classes or objects")]
    AmbiguousFacadeClass {
        /// The requested facade name.
        name: String,
        /// Path of the representative file.
        file: String,
        /// Number of top-level classes and objects found.
        count: usize,
    },

    /// The analysis engine failed while building a session or a facade.
    #[error(transparent)]
    Engine(#[from] InternalError),
}
