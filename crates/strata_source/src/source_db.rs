//! Central database of every file known to an analysis host.

use crate::declaration::{Declaration, DeclarationKind};
use crate::file_id::FileId;
use crate::source_file::{default_facade_short_name, FileKind, SourceFile};
use crate::span::Span;
use std::path::PathBuf;
use std::sync::Arc;
use strata_common::{ContentHash, Interner};

/// Description of a file to register in a [`SourceDb`].
///
/// ```ignore
/// let spec = FileSpec::source("src/foo.kt")
///     .package("com.example")
///     .declare(DeclarationKind::Function, "foo");
/// let file = db.add(spec);
/// ```
#[derive(Debug, Clone)]
pub struct FileSpec {
    path: PathBuf,
    kind: FileKind,
    package: String,
    jvm_name: Option<String>,
    content: String,
    declarations: Vec<(DeclarationKind, String)>,
}

impl FileSpec {
    /// Starts describing a file of the given kind.
    pub fn new(path: impl Into<PathBuf>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            kind,
            package: String::new(),
            jvm_name: None,
            content: String::new(),
            declarations: Vec::new(),
        }
    }

    /// An editable source file.
    pub fn source(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileKind::Source)
    }

    /// A precompiled (decompiled) file.
    pub fn compiled(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileKind::Compiled)
    }

    /// A script file.
    pub fn script(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FileKind::Script)
    }

    /// Sets the declared package (dot separated).
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Overrides the short facade name, as a `@file:JvmName` annotation does.
    pub fn jvm_name(mut self, name: impl Into<String>) -> Self {
        self.jvm_name = Some(name.into());
        self
    }

    /// Sets the file text.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Adds a top-level declaration.
    pub fn declare(mut self, kind: DeclarationKind, name: impl Into<String>) -> Self {
        self.declarations.push((kind, name.into()));
        self
    }
}

/// The source database, owning every registered [`SourceFile`].
///
/// Names are interned through the shared [`Interner`] so that the facade
/// names recorded here compare equal to names interned by callers.
pub struct SourceDb {
    interner: Arc<Interner>,
    files: Vec<Arc<SourceFile>>,
}

impl SourceDb {
    /// Creates an empty database using the given interner.
    pub fn new(interner: Arc<Interner>) -> Self {
        Self {
            interner,
            files: Vec::new(),
        }
    }

    /// The interner shared with this database.
    pub fn interner(&self) -> &Arc<Interner> {
        &self.interner
    }

    /// Registers a file and returns the shared handle to it.
    pub fn add(&mut self, spec: FileSpec) -> Arc<SourceFile> {
        let id = FileId::from_raw(self.files.len() as u32);
        let short_name = spec
            .jvm_name
            .unwrap_or_else(|| default_facade_short_name(&spec.path));
        let declarations = spec
            .declarations
            .iter()
            .map(|(kind, name)| Declaration {
                kind: *kind,
                name: self.interner.get_or_intern(name),
                span: declaration_span(id, &spec.content, name),
            })
            .collect();
        let file = Arc::new(SourceFile {
            id,
            path: spec.path,
            kind: spec.kind,
            package: self.interner.get_or_intern(&spec.package),
            facade_name: self.interner.qualify(&spec.package, &short_name),
            declarations,
            content_hash: ContentHash::from_bytes(spec.content.as_bytes()),
            content: spec.content,
        });
        self.files.push(Arc::clone(&file));
        file
    }

    /// Returns the file registered under `id`.
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &Arc<SourceFile> {
        &self.files[id.as_raw() as usize]
    }

    /// All registered files, in registration order.
    pub fn files(&self) -> &[Arc<SourceFile>] {
        &self.files
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file has been registered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Locates the first occurrence of `name` in `content`; falls back to the
/// start of the file when the text does not mention it.
fn declaration_span(file: FileId, content: &str, name: &str) -> Span {
    match content.find(name) {
        Some(start) => Span::new(file, start as u32, (start + name.len()) as u32),
        None => Span::file_start(file),
    }
}
