//! The project-model collaborator trait.

use crate::generation::GenerationSource;
use crate::ids::{ModuleId, ProjectId};
use strata_source::Span;

/// What the caches need to know about the host's project structure.
///
/// A project model is also the generation source for its scope: whenever
/// its structure or any analysed text changes, its generation advances.
pub trait ProjectModel: GenerationSource {
    /// The module whose resolution state governs `location`.
    ///
    /// This lookup is total. Hosts map locations outside any declared module
    /// to some catch-all module of their own.
    fn owning_module_of(&self, location: Span) -> ModuleId;

    /// The project owning `module`, or `None` for a module that has been
    /// detached from (or was never attached to) a project.
    fn owning_project_of(&self, module: ModuleId) -> Option<ProjectId>;
}
