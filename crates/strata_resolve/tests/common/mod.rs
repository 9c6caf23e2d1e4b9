//! Shared fixture for the integration tests: an in-memory workspace, a
//! source database and an engine that counts what it is asked to build.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use strata_cache::CacheConfig;
use strata_common::{ContentHash, Ident, Interner, StrataResult};
use strata_project::{ModuleId, ProjectId, Workspace};
use strata_resolve::{
    AnalysisEngine, BinaryClass, FacadeCache, ModuleSession, SessionDirectory, SourceFacade,
};
use strata_source::{Declaration, SourceDb, SourceFile};

/// Per-module state handed out by [`CountingEngine`].
#[derive(Debug)]
pub struct ModuleState {
    pub module: ModuleId,
    pub project: ProjectId,
}

/// An engine that builds trivial results and counts its calls.
///
/// With `slow` set, every build sleeps briefly so that concurrent callers
/// overlap inside the builder.
pub struct CountingEngine {
    interner: Arc<Interner>,
    pub session_builds: AtomicUsize,
    pub source_builds: AtomicUsize,
    pub binary_builds: AtomicUsize,
    pub no_binary_class: AtomicBool,
    pub slow: AtomicBool,
}

impl CountingEngine {
    pub fn new(interner: Arc<Interner>) -> Self {
        Self {
            interner,
            session_builds: AtomicUsize::new(0),
            source_builds: AtomicUsize::new(0),
            binary_builds: AtomicUsize::new(0),
            no_binary_class: AtomicBool::new(false),
            slow: AtomicBool::new(false),
        }
    }

    pub fn sessions(&self) -> usize {
        self.session_builds.load(Ordering::SeqCst)
    }

    pub fn source_facades(&self) -> usize {
        self.source_builds.load(Ordering::SeqCst)
    }

    pub fn binary_classes(&self) -> usize {
        self.binary_builds.load(Ordering::SeqCst)
    }

    fn pause(&self) {
        if self.slow.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(5));
        }
    }
}

impl AnalysisEngine for CountingEngine {
    type Session = ModuleState;

    fn build_session(&self, module: ModuleId, project: ProjectId) -> StrataResult<ModuleState> {
        self.session_builds.fetch_add(1, Ordering::SeqCst);
        self.pause();
        Ok(ModuleState { module, project })
    }

    fn build_source_facade(
        &self,
        _session: &ModuleSession<ModuleState>,
        _first: &SourceFile,
        _name: Ident,
        files: &[Arc<SourceFile>],
    ) -> StrataResult<SourceFacade> {
        self.source_builds.fetch_add(1, Ordering::SeqCst);
        self.pause();
        Ok(SourceFacade {
            members: files
                .iter()
                .flat_map(|file| file.declarations.iter().copied())
                .collect(),
        })
    }

    fn build_binary_class(
        &self,
        file: &SourceFile,
        _class_or_object: Option<&Declaration>,
    ) -> StrataResult<Option<BinaryClass>> {
        self.binary_builds.fetch_add(1, Ordering::SeqCst);
        self.pause();
        if self.no_binary_class.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(BinaryClass {
            internal_name: self.interner.resolve(file.facade_name).replace('.', "/"),
            stamp: file.content_hash,
        }))
    }
}

pub type Directory = SessionDirectory<Workspace, CountingEngine>;
pub type Facades = FacadeCache<Workspace, CountingEngine>;

pub struct Harness {
    pub interner: Arc<Interner>,
    pub workspace: Arc<Workspace>,
    pub db: SourceDb,
    pub engine: Arc<CountingEngine>,
    pub sessions: Arc<Directory>,
    pub facades: Facades,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&CacheConfig::default())
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        let interner = Arc::new(Interner::new());
        let workspace = Arc::new(Workspace::new(ProjectId::from_raw(7)));
        let engine = Arc::new(CountingEngine::new(Arc::clone(&interner)));
        let sessions = Arc::new(SessionDirectory::new(
            Arc::clone(&workspace),
            Arc::clone(&engine),
            config,
        ));
        let facades = FacadeCache::new(Arc::clone(&sessions), Arc::clone(&interner), config);
        Self {
            db: SourceDb::new(Arc::clone(&interner)),
            interner,
            workspace,
            engine,
            sessions,
            facades,
        }
    }

    pub fn name(&self, qualified: &str) -> Ident {
        self.interner.get_or_intern(qualified)
    }
}

/// Hash of a fixed string, for asserting stamps.
pub fn stamp_of(content: &str) -> ContentHash {
    ContentHash::from_bytes(content.as_bytes())
}
