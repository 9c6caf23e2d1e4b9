//! The resolution-session directory.
//!
//! Callers reach a module's session from whatever they have at hand: a
//! source location, a symbol resolved earlier, or the module itself. All
//! three normalize to a [`ModuleId`], and within one generation every path
//! returns the same `Arc`, so resolution state is shared across calls.

use std::sync::Arc;

use strata_cache::{CacheConfig, CacheStats, GenerationGatedCache};
use strata_project::{GenerationSource, GenerationToken, ModuleId, ProjectId, ProjectModel};
use strata_source::Span;

use crate::engine::AnalysisEngine;
use crate::error::{ResolveError, ResolveResult};
use crate::symbol::ResolvedSymbol;

/// The resolvable state of one module as of one generation.
#[derive(Debug)]
pub struct ModuleSession<S> {
    module: ModuleId,
    project: ProjectId,
    generation: GenerationToken,
    state: S,
}

impl<S> ModuleSession<S> {
    /// Wraps engine state built for `module` in `generation`.
    pub fn new(module: ModuleId, project: ProjectId, generation: GenerationToken, state: S) -> Self {
        Self {
            module,
            project,
            generation,
            state,
        }
    }

    /// The module this session resolves.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// The project owning the module.
    pub fn project(&self) -> ProjectId {
        self.project
    }

    /// The generation the session was built in.
    pub fn generation(&self) -> GenerationToken {
        self.generation
    }

    /// The engine's resolution state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns `true` while `scope` is still in the session's generation.
    ///
    /// Holding a session past its generation is a caller error that the
    /// directory does not detect on its own; this lets callers check.
    pub fn is_valid_in<G: GenerationSource + ?Sized>(&self, scope: &G) -> bool {
        scope.current_generation() == self.generation
    }
}

/// The three key shapes a session can be looked up by.
#[derive(Debug)]
pub enum SessionKey<'a, S> {
    /// A source location; its module is decided by the project model.
    Location(Span),
    /// A symbol carrying the session it was resolved in.
    Symbol(&'a ResolvedSymbol<S>),
    /// A module.
    Module(ModuleId),
}

impl<S> From<Span> for SessionKey<'_, S> {
    fn from(location: Span) -> Self {
        SessionKey::Location(location)
    }
}

impl<S> From<ModuleId> for SessionKey<'_, S> {
    fn from(module: ModuleId) -> Self {
        SessionKey::Module(module)
    }
}

impl<'a, S> From<&'a ResolvedSymbol<S>> for SessionKey<'a, S> {
    fn from(symbol: &'a ResolvedSymbol<S>) -> Self {
        SessionKey::Symbol(symbol)
    }
}

/// Hands out one [`ModuleSession`] per module and generation.
pub struct SessionDirectory<P, E: AnalysisEngine> {
    project: Arc<P>,
    engine: Arc<E>,
    sessions: GenerationGatedCache<ModuleId, Arc<ModuleSession<E::Session>>>,
}

impl<P, E> SessionDirectory<P, E>
where
    P: ProjectModel,
    E: AnalysisEngine,
{
    /// Creates an empty directory over `project`, building sessions with `engine`.
    pub fn new(project: Arc<P>, engine: Arc<E>, config: &CacheConfig) -> Self {
        Self {
            project,
            engine,
            sessions: GenerationGatedCache::new("sessions", config),
        }
    }

    /// The project model (and generation source) of this directory.
    pub fn project(&self) -> &Arc<P> {
        &self.project
    }

    /// The engine sessions are built with.
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Looks up a session by any key shape.
    pub fn session_for(
        &self,
        key: SessionKey<'_, E::Session>,
    ) -> ResolveResult<Arc<ModuleSession<E::Session>>> {
        match key {
            SessionKey::Location(location) => self.session_for_location(location),
            SessionKey::Symbol(symbol) => self.session_for_symbol(symbol),
            SessionKey::Module(module) => self.session_for_module(module),
        }
    }

    /// The session of the module governing `location`.
    pub fn session_for_location(
        &self,
        location: Span,
    ) -> ResolveResult<Arc<ModuleSession<E::Session>>> {
        let module = self.project.owning_module_of(location);
        self.session_for_module(module)
    }

    /// The session `symbol` was resolved in.
    ///
    /// Fails with [`ResolveError::InvalidSymbolKind`] for symbols that did
    /// not come from this system's resolution machinery.
    pub fn session_for_symbol(
        &self,
        symbol: &ResolvedSymbol<E::Session>,
    ) -> ResolveResult<Arc<ModuleSession<E::Session>>> {
        symbol
            .session()
            .map(Arc::clone)
            .map_err(|foreign| ResolveError::InvalidSymbolKind {
                symbol: foreign.description.clone(),
                origin: foreign.origin.clone(),
            })
    }

    /// The session of `module`, built on first use in each generation.
    ///
    /// Fails with [`ResolveError::InvalidModuleState`] if the module has no
    /// owning project.
    pub fn session_for_module(
        &self,
        module: ModuleId,
    ) -> ResolveResult<Arc<ModuleSession<E::Session>>> {
        let project = self
            .project
            .owning_project_of(module)
            .ok_or(ResolveError::InvalidModuleState { module })?;
        self.sessions
            .get_or_try_create(self.project.as_ref(), module, |&module, generation| {
                let state = self.engine.build_session(module, project)?;
                tracing::debug!(%module, %project, %generation, "built resolution session");
                Ok(Arc::new(ModuleSession::new(module, project, generation, state)))
            })
    }

    /// Drops every cached session, as under memory pressure.
    pub fn reclaim(&self) {
        self.sessions.reclaim();
    }

    /// Usage counters of the session cache.
    pub fn stats(&self) -> CacheStats {
        self.sessions.stats()
    }
}
