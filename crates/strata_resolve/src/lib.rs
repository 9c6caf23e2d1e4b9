//! Resolution-session directory and facade construction cache.
//!
//! Both caches sit on a [`GenerationGatedCache`](strata_cache::GenerationGatedCache)
//! bound to the project's generation:
//!
//! - [`SessionDirectory`] hands out one [`ModuleSession`] per module and
//!   generation, whether the caller starts from a source location, a
//!   resolved symbol or the module itself.
//! - [`FacadeCache`] builds the facade artifact for a qualified name and a
//!   set of files, from editable sources or from decompiled classes, and
//!   rejects requests that mix the two.
//!
//! The analysis work itself is delegated to an [`AnalysisEngine`].

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod facade;
pub mod session;
pub mod symbol;

#[cfg(test)]
mod test_support;

pub use engine::{AnalysisEngine, BinaryClass, SourceFacade};
pub use error::{ResolveError, ResolveResult};
pub use facade::{DecompiledFacade, FacadeArtifact, FacadeCache, FacadeKey, FacadeOrigin};
pub use session::{ModuleSession, SessionDirectory, SessionKey};
pub use symbol::{AnalyzedSymbol, ForeignSymbol, ResolvedSymbol};
