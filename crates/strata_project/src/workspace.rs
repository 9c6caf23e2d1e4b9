//! In-memory project model.

use std::collections::HashMap;

use parking_lot::RwLock;
use strata_source::{FileId, Span};

use crate::generation::{GenerationSource, GenerationToken, ModificationTracker};
use crate::ids::{ModuleId, ProjectId};
use crate::model::ProjectModel;

/// Name of the module that owns files no other module claims.
const DETACHED_MODULE_NAME: &str = "<detached>";

/// A project held entirely in memory.
///
/// Modules are registered explicitly and files are assigned to them. Files
/// nobody assigned belong to the project's detached module. Every
/// structural change advances the project's generation.
pub struct Workspace {
    project: ProjectId,
    tracker: ModificationTracker,
    state: RwLock<WorkspaceState>,
}

struct WorkspaceState {
    modules: Vec<ModuleEntry>,
    files: HashMap<FileId, ModuleId>,
    detached: ModuleId,
}

struct ModuleEntry {
    name: String,
    project: Option<ProjectId>,
}

impl Workspace {
    /// Creates a workspace for `project` containing only the detached module.
    pub fn new(project: ProjectId) -> Self {
        let detached = ModuleId::from_raw(0);
        Self {
            project,
            tracker: ModificationTracker::new(),
            state: RwLock::new(WorkspaceState {
                modules: vec![ModuleEntry {
                    name: DETACHED_MODULE_NAME.to_string(),
                    project: Some(project),
                }],
                files: HashMap::new(),
                detached,
            }),
        }
    }

    /// The project this workspace models.
    pub fn project(&self) -> ProjectId {
        self.project
    }

    /// The module owning files that were never assigned.
    pub fn detached_module(&self) -> ModuleId {
        self.state.read().detached
    }

    /// Registers a module owned by this workspace's project.
    pub fn add_module(&self, name: impl Into<String>) -> ModuleId {
        self.insert_module(name.into(), Some(self.project))
    }

    /// Registers a module that no project owns.
    ///
    /// Sessions cannot be built for such a module; it exists so hosts can
    /// model libraries that were unloaded while references to them survive.
    pub fn add_orphan_module(&self, name: impl Into<String>) -> ModuleId {
        self.insert_module(name.into(), None)
    }

    fn insert_module(&self, name: String, project: Option<ProjectId>) -> ModuleId {
        let id = {
            let mut state = self.state.write();
            let id = ModuleId::from_raw(state.modules.len() as u32);
            state.modules.push(ModuleEntry { name, project });
            id
        };
        self.tracker.advance();
        id
    }

    /// Assigns `file` to `module`, replacing any previous assignment.
    pub fn assign_file(&self, file: FileId, module: ModuleId) {
        self.state.write().files.insert(file, module);
        self.tracker.advance();
    }

    /// Detaches `module` from its project.
    pub fn detach_module(&self, module: ModuleId) {
        if let Some(entry) = self.state.write().modules.get_mut(module.as_raw() as usize) {
            entry.project = None;
        }
        self.tracker.advance();
    }

    /// Records an edit that may change analysis results anywhere in the project.
    pub fn record_modification(&self) -> GenerationToken {
        self.tracker.advance()
    }

    /// The display name of `module`, if it is registered.
    pub fn module_name(&self, module: ModuleId) -> Option<String> {
        self.state
            .read()
            .modules
            .get(module.as_raw() as usize)
            .map(|entry| entry.name.clone())
    }
}

impl GenerationSource for Workspace {
    fn current_generation(&self) -> GenerationToken {
        self.tracker.current()
    }
}

impl ProjectModel for Workspace {
    fn owning_module_of(&self, location: Span) -> ModuleId {
        let state = self.state.read();
        state
            .files
            .get(&location.file)
            .copied()
            .unwrap_or(state.detached)
    }

    fn owning_project_of(&self, module: ModuleId) -> Option<ProjectId> {
        self.state
            .read()
            .modules
            .get(module.as_raw() as usize)
            .and_then(|entry| entry.project)
    }
}
