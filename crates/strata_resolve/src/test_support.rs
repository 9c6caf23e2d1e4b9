//! A scripted analysis engine and fixture for the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use strata_cache::CacheConfig;
use strata_common::{ContentHash, Ident, Interner, InternalError, StrataResult};
use strata_project::{ModuleId, ProjectId, Workspace};
use strata_source::{Declaration, SourceDb, SourceFile};

use crate::engine::{AnalysisEngine, BinaryClass, SourceFacade};
use crate::facade::FacadeCache;
use crate::session::{ModuleSession, SessionDirectory};

#[derive(Debug)]
pub(crate) struct FakeSession {
    pub(crate) module: ModuleId,
}

pub(crate) struct FakeEngine {
    interner: Arc<Interner>,
    sessions: AtomicUsize,
    facades: AtomicUsize,
    binaries: AtomicUsize,
    fail_sessions: AtomicBool,
    withhold_binaries: AtomicBool,
}

impl FakeEngine {
    pub(crate) fn new(interner: Arc<Interner>) -> Self {
        Self {
            interner,
            sessions: AtomicUsize::new(0),
            facades: AtomicUsize::new(0),
            binaries: AtomicUsize::new(0),
            fail_sessions: AtomicBool::new(false),
            withhold_binaries: AtomicBool::new(false),
        }
    }

    pub(crate) fn session_builds(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }

    pub(crate) fn facade_builds(&self) -> usize {
        self.facades.load(Ordering::SeqCst)
    }

    pub(crate) fn binary_builds(&self) -> usize {
        self.binaries.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_sessions(&self, fail: bool) {
        self.fail_sessions.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn withhold_binary_classes(&self, withhold: bool) {
        self.withhold_binaries.store(withhold, Ordering::SeqCst);
    }
}

impl AnalysisEngine for FakeEngine {
    type Session = FakeSession;

    fn build_session(&self, module: ModuleId, _project: ProjectId) -> StrataResult<FakeSession> {
        if self.fail_sessions.load(Ordering::SeqCst) {
            return Err(InternalError::new(format!("cannot analyse {module}")));
        }
        self.sessions.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession { module })
    }

    fn build_source_facade(
        &self,
        session: &ModuleSession<FakeSession>,
        _first: &SourceFile,
        _name: Ident,
        files: &[Arc<SourceFile>],
    ) -> StrataResult<SourceFacade> {
        assert_eq!(session.state().module, session.module());
        self.facades.fetch_add(1, Ordering::SeqCst);
        let members = files
            .iter()
            .flat_map(|file| file.declarations.iter().copied())
            .filter(|decl| !decl.kind.is_class_or_object())
            .collect();
        Ok(SourceFacade { members })
    }

    fn build_binary_class(
        &self,
        file: &SourceFile,
        _class_or_object: Option<&Declaration>,
    ) -> StrataResult<Option<BinaryClass>> {
        self.binaries.fetch_add(1, Ordering::SeqCst);
        if self.withhold_binaries.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(BinaryClass {
            internal_name: self.interner.resolve(file.facade_name).replace('.', "/"),
            stamp: ContentHash::from_bytes(file.content.as_bytes()),
        }))
    }
}

pub(crate) struct Fixture {
    pub(crate) workspace: Arc<Workspace>,
    pub(crate) interner: Arc<Interner>,
    pub(crate) db: SourceDb,
    pub(crate) engine: Arc<FakeEngine>,
    pub(crate) directory: Arc<SessionDirectory<Workspace, FakeEngine>>,
    pub(crate) facades: FacadeCache<Workspace, FakeEngine>,
}

pub(crate) fn fixture() -> Fixture {
    fixture_with(&CacheConfig::default())
}

pub(crate) fn fixture_with(config: &CacheConfig) -> Fixture {
    let interner = Arc::new(Interner::new());
    let workspace = Arc::new(Workspace::new(ProjectId::from_raw(1)));
    let engine = Arc::new(FakeEngine::new(Arc::clone(&interner)));
    let directory = Arc::new(SessionDirectory::new(
        Arc::clone(&workspace),
        Arc::clone(&engine),
        config,
    ));
    let facades = FacadeCache::new(Arc::clone(&directory), Arc::clone(&interner), config);
    Fixture {
        workspace,
        db: SourceDb::new(Arc::clone(&interner)),
        interner,
        engine,
        directory,
        facades,
    }
}
