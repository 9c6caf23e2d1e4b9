//! The analysis-engine collaborator.

use std::sync::Arc;

use strata_common::{ContentHash, Ident, StrataResult};
use strata_project::{ModuleId, ProjectId};
use strata_source::{Declaration, SourceFile};

use crate::session::ModuleSession;

/// The engine that actually resolves code. The caches only decide *when*
/// to call it.
///
/// Every method may be called more than once for the same inputs when
/// threads race on an absent key, so implementations must not mutate shared
/// state and must return equivalent results for equal inputs.
pub trait AnalysisEngine: Send + Sync {
    /// Per-module resolution state.
    type Session: Send + Sync;

    /// Builds the resolution state of `module`, owned by `project`.
    fn build_session(&self, module: ModuleId, project: ProjectId) -> StrataResult<Self::Session>;

    /// Builds a facade over editable `files`, analysed within `session`
    /// (the session of `first`'s module).
    fn build_source_facade(
        &self,
        session: &ModuleSession<Self::Session>,
        first: &SourceFile,
        name: Ident,
        files: &[Arc<SourceFile>],
    ) -> StrataResult<SourceFacade>;

    /// Builds the binary class backing a precompiled `file`, paired with its
    /// top-level class or object if it has one. `Ok(None)` means the file
    /// has no class to offer and no facade should exist.
    fn build_binary_class(
        &self,
        file: &SourceFile,
        class_or_object: Option<&Declaration>,
    ) -> StrataResult<Option<BinaryClass>>;
}

/// What the engine produces for a source-backed facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFacade {
    /// Top-level callables gathered from every file of the facade.
    pub members: Vec<Declaration>,
}

/// A binary class read back from a precompiled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryClass {
    /// JVM internal name, e.g. `com/example/FooKt`.
    pub internal_name: String,
    /// Hash of the class payload.
    pub stamp: ContentHash,
}
