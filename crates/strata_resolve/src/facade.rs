//! The facade construction cache.
//!
//! A facade is the class that a set of files' top-level callables compile
//! into (`com.example.FooKt`). It is built either from editable sources,
//! through a resolution session, or from the binary class behind
//! precompiled files. Requests mixing the two kinds are rejected.

use std::collections::BTreeSet;
use std::sync::Arc;

use strata_cache::{CacheConfig, CacheStats, GenerationGatedCache};
use strata_common::{Ident, Interner};
use strata_project::ProjectModel;
use strata_source::{Declaration, FileId, FileKind, SourceFile};

use crate::engine::{AnalysisEngine, BinaryClass, SourceFacade};
use crate::error::{ResolveError, ResolveResult};
use crate::session::SessionDirectory;

/// Cache key of a facade: its qualified name and the set of files behind it.
///
/// The file set is ordered and deduplicated, so two requests naming the same
/// files in a different order share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacadeKey {
    /// Qualified facade name.
    pub name: Ident,
    /// Identifiers of the contributing files.
    pub files: BTreeSet<FileId>,
}

impl FacadeKey {
    /// Builds the key for `name` over `files`.
    pub fn new(name: Ident, files: &[Arc<SourceFile>]) -> Self {
        Self {
            name,
            files: files.iter().map(|file| file.id).collect(),
        }
    }
}

/// A built facade.
#[derive(Debug)]
pub struct FacadeArtifact {
    /// Qualified facade name.
    pub name: Ident,
    /// Contributing files, ordered by id.
    pub files: Vec<Arc<SourceFile>>,
    /// How the facade was produced.
    pub origin: FacadeOrigin,
}

impl FacadeArtifact {
    /// Returns `true` if the facade was read back from a binary class.
    pub fn is_decompiled(&self) -> bool {
        matches!(self.origin, FacadeOrigin::Decompiled(_))
    }

    /// Identifiers of the contributing files.
    pub fn file_ids(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.iter().map(|file| file.id)
    }
}

/// The two ways a facade can be produced.
#[derive(Debug)]
pub enum FacadeOrigin {
    /// Analysed from editable sources.
    Source(SourceFacade),
    /// Read back from the binary class of precompiled files.
    Decompiled(DecompiledFacade),
}

/// A facade backed by a binary class.
#[derive(Debug)]
pub struct DecompiledFacade {
    /// The class read from the representative file.
    pub class: BinaryClass,
    /// The file whose own facade name is the requested one.
    pub representative: Arc<SourceFile>,
    /// The representative file's top-level class or object, if any.
    pub class_or_object: Option<Declaration>,
}

/// Builds and caches facades per name, file set and generation.
pub struct FacadeCache<P, E: AnalysisEngine> {
    sessions: Arc<SessionDirectory<P, E>>,
    interner: Arc<Interner>,
    facades: GenerationGatedCache<FacadeKey, Option<Arc<FacadeArtifact>>>,
}

impl<P, E> FacadeCache<P, E>
where
    P: ProjectModel,
    E: AnalysisEngine,
{
    /// Creates an empty cache. Source-backed facades are analysed in
    /// sessions from `sessions`, and names are rendered through `interner`.
    pub fn new(
        sessions: Arc<SessionDirectory<P, E>>,
        interner: Arc<Interner>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            sessions,
            interner,
            facades: GenerationGatedCache::new("facades", config),
        }
    }

    /// The session directory facades are analysed with.
    pub fn sessions(&self) -> &Arc<SessionDirectory<P, E>> {
        &self.sessions
    }

    /// Returns the facade named `declared_name` over `files`.
    ///
    /// Script files are ignored; if nothing else remains the answer is
    /// `None` and the cache is not consulted. Failed builds are not cached.
    pub fn facade_for(
        &self,
        declared_name: Ident,
        files: &[Arc<SourceFile>],
    ) -> ResolveResult<Option<Arc<FacadeArtifact>>> {
        let mut files: Vec<Arc<SourceFile>> = files
            .iter()
            .filter(|file| !file.is_script())
            .cloned()
            .collect();
        if files.is_empty() {
            return Ok(None);
        }
        files.sort_by_key(|file| file.id);
        files.dedup_by_key(|file| file.id);

        let key = FacadeKey::new(declared_name, &files);
        let scope = self.sessions.project().as_ref();
        self.facades
            .get_or_try_create(scope, key, |key, _| self.build(key.name, files))
    }

    fn build(
        &self,
        name: Ident,
        files: Vec<Arc<SourceFile>>,
    ) -> ResolveResult<Option<Arc<FacadeArtifact>>> {
        if files.iter().all(|file| file.kind == FileKind::Source) {
            self.build_from_source(name, files).map(Some)
        } else if files.iter().all(|file| file.is_compiled()) {
            self.build_from_binary(name, files)
        } else {
            Err(ResolveError::MixedFacadeInputs {
                name: self.interner.resolve(name).to_string(),
                files: describe_files(&files),
            })
        }
    }

    fn build_from_source(
        &self,
        name: Ident,
        files: Vec<Arc<SourceFile>>,
    ) -> ResolveResult<Arc<FacadeArtifact>> {
        let first = &files[0];
        let session = self.sessions.session_for_location(first.location())?;
        let facade = self
            .sessions
            .engine()
            .build_source_facade(&session, first, name, &files)?;
        tracing::debug!(
            facade = self.interner.resolve(name),
            module = %session.module(),
            files = files.len(),
            "built source facade"
        );
        Ok(Arc::new(FacadeArtifact {
            name,
            files,
            origin: FacadeOrigin::Source(facade),
        }))
    }

    fn build_from_binary(
        &self,
        name: Ident,
        files: Vec<Arc<SourceFile>>,
    ) -> ResolveResult<Option<Arc<FacadeArtifact>>> {
        let display_name = self.interner.resolve(name);
        let representative = files
            .iter()
            .find(|file| file.facade_name == name)
            .cloned()
            .ok_or_else(|| ResolveError::MissingRepresentativeFile {
                name: display_name.to_string(),
            })?;

        let mut classes = representative.classes_and_objects();
        let class_or_object = classes.next().copied();
        let extra = classes.count();
        if extra > 0 {
            return Err(ResolveError::AmbiguousFacadeClass {
                name: display_name.to_string(),
                file: representative.path.display().to_string(),
                count: extra + 1,
            });
        }

        let Some(class) = self
            .sessions
            .engine()
            .build_binary_class(&representative, class_or_object.as_ref())?
        else {
            tracing::debug!(facade = display_name, "no binary class behind facade");
            return Ok(None);
        };
        tracing::debug!(
            facade = display_name,
            class = %class.internal_name,
            files = files.len(),
            "built decompiled facade"
        );
        Ok(Some(Arc::new(FacadeArtifact {
            name,
            files,
            origin: FacadeOrigin::Decompiled(DecompiledFacade {
                class,
                representative,
                class_or_object,
            }),
        })))
    }

    /// Drops every cached facade, as under memory pressure.
    pub fn reclaim(&self) {
        self.facades.reclaim();
    }

    /// Number of facades currently cached, including cached absences.
    pub fn len(&self) -> usize {
        self.facades.len()
    }

    /// Returns `true` if no facade is cached.
    pub fn is_empty(&self) -> bool {
        self.facades.is_empty()
    }

    /// Usage counters of the facade cache.
    pub fn stats(&self) -> CacheStats {
        self.facades.stats()
    }
}

fn describe_files(files: &[Arc<SourceFile>]) -> String {
    let described: Vec<String> = files
        .iter()
        .map(|file| {
            let kind = match file.kind {
                FileKind::Source => "source",
                FileKind::Compiled => "compiled",
                FileKind::Script => "script",
            };
            format!("{} ({kind})", file.path.display())
        })
        .collect();
    format!("[{}]", described.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, Fixture};
    use proptest::prelude::*;
    use strata_source::{DeclarationKind, FileSpec};

    #[test]
    fn source_facade_is_shared_across_orderings() {
        let Fixture { workspace, mut db, facades, interner, engine, .. } = fixture();
        let app = workspace.add_module("app");
        let foo1 = db.add(FileSpec::source("Foo1.kt").package("com.example").jvm_name("FooKt"));
        let foo2 = db.add(FileSpec::source("Foo2.kt").package("com.example").jvm_name("FooKt"));
        workspace.assign_file(foo1.id, app);
        workspace.assign_file(foo2.id, app);
        let name = interner.get_or_intern("com.example.FooKt");

        let a = facades.facade_for(name, &[foo1.clone(), foo2.clone()]).unwrap().unwrap();
        let b = facades.facade_for(name, &[foo2, foo1]).unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_decompiled());
        assert_eq!(engine.facade_builds(), 1);
    }

    #[test]
    fn scripts_are_ignored() {
        let Fixture { mut db, facades, interner, .. } = fixture();
        let script = db.add(FileSpec::script("build.kts"));
        let name = interner.get_or_intern("BuildKt");

        assert!(facades.facade_for(name, &[script]).unwrap().is_none());
        assert!(facades.facade_for(name, &[]).unwrap().is_none());
        assert!(facades.is_empty());
        assert_eq!(facades.stats().misses, 0);
    }

    #[test]
    fn mixed_inputs_fail_and_are_not_cached() {
        let Fixture { mut db, facades, interner, .. } = fixture();
        let src = db.add(FileSpec::source("Foo1.kt").package("com.example"));
        let bin = db.add(FileSpec::compiled("Foo2.kt").package("com.example"));
        let name = interner.get_or_intern("com.example.FooKt");

        let err = facades.facade_for(name, &[src, bin]).unwrap_err();
        match err {
            ResolveError::MixedFacadeInputs { name, files } => {
                assert_eq!(name, "com.example.FooKt");
                assert_eq!(files, "[Foo1.kt (source), Foo2.kt (compiled)]");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(facades.is_empty());
    }

    #[test]
    fn decompiled_facade_uses_representative_file() {
        let Fixture { mut db, facades, interner, .. } = fixture();
        let part = db.add(FileSpec::compiled("FooPart.kt").package("com.example"));
        let rep = db.add(
            FileSpec::compiled("Foo.kt")
                .package("com.example")
                .declare(DeclarationKind::Object, "Registry"),
        );
        let name = interner.get_or_intern("com.example.FooKt");

        let artifact = facades.facade_for(name, &[part, rep.clone()]).unwrap().unwrap();
        let FacadeOrigin::Decompiled(decompiled) = &artifact.origin else {
            panic!("expected a decompiled facade");
        };
        assert!(Arc::ptr_eq(&decompiled.representative, &rep));
        assert_eq!(decompiled.class.internal_name, "com/example/FooKt");
        let class = decompiled.class_or_object.unwrap();
        assert_eq!(interner.resolve(class.name), "Registry");
        assert_eq!(artifact.files.len(), 2);
    }

    #[test]
    fn missing_representative_is_an_error() {
        let Fixture { mut db, facades, interner, .. } = fixture();
        let bin = db.add(FileSpec::compiled("Bar.kt").package("com.example"));
        let name = interner.get_or_intern("com.example.FooKt");

        let err = facades.facade_for(name, &[bin]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingRepresentativeFile {
                name: "com.example.FooKt".to_string()
            }
        );
        assert!(facades.is_empty());
    }

    #[test]
    fn several_classes_in_representative_are_ambiguous() {
        let Fixture { mut db, facades, interner, .. } = fixture();
        let bin = db.add(
            FileSpec::compiled("Foo.kt")
                .package("com.example")
                .declare(DeclarationKind::Class, "A")
                .declare(DeclarationKind::Function, "helper")
                .declare(DeclarationKind::Object, "B"),
        );
        let name = interner.get_or_intern("com.example.FooKt");

        let err = facades.facade_for(name, &[bin]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::AmbiguousFacadeClass { count: 2, .. }
        ));
    }

    #[test]
    fn absent_binary_class_is_cached_as_none() {
        let Fixture { mut db, facades, interner, engine, .. } = fixture();
        let bin = db.add(FileSpec::compiled("Foo.kt").package("com.example"));
        let name = interner.get_or_intern("com.example.FooKt");
        engine.withhold_binary_classes(true);

        assert!(facades.facade_for(name, &[bin.clone()]).unwrap().is_none());
        assert!(facades.facade_for(name, &[bin]).unwrap().is_none());
        assert_eq!(engine.binary_builds(), 1);
        assert_eq!(facades.len(), 1);
    }

    #[test]
    fn modification_rebuilds_facade() {
        let Fixture { workspace, mut db, facades, interner, .. } = fixture();
        let foo = db.add(FileSpec::source("Foo.kt").package("com.example"));
        let name = interner.get_or_intern("com.example.FooKt");

        let before = facades.facade_for(name, &[foo.clone()]).unwrap().unwrap();
        workspace.record_modification();
        let after = facades.facade_for(name, &[foo]).unwrap().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(facades.stats().discarded_generations, 1);
    }

    proptest! {
        #[test]
        fn key_ignores_order_and_duplicates(picks in proptest::collection::vec(0usize..6, 1..12)) {
            let interner = Arc::new(Interner::new());
            let mut db = strata_source::SourceDb::new(Arc::clone(&interner));
            let pool: Vec<_> = (0..6)
                .map(|i| db.add(FileSpec::source(format!("F{i}.kt"))))
                .collect();
            let name = interner.get_or_intern("FKt");

            let chosen: Vec<_> = picks.iter().map(|&i| Arc::clone(&pool[i])).collect();
            let mut reversed = chosen.clone();
            reversed.reverse();
            let mut unique = chosen.clone();
            unique.sort_by_key(|file| file.id);
            unique.dedup_by_key(|file| file.id);

            let key = FacadeKey::new(name, &chosen);
            prop_assert_eq!(&key, &FacadeKey::new(name, &reversed));
            prop_assert_eq!(&key, &FacadeKey::new(name, &unique));
            prop_assert_eq!(key.files.len(), unique.len());
        }
    }
}
