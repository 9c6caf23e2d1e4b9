//! The project model seen by the analysis caches.
//!
//! This crate defines the [`GenerationToken`] that marks a validity epoch of a
//! project, the [`GenerationSource`] that issues it, module and project
//! identities, and the [`ProjectModel`] collaborator trait the caches consult
//! to map locations to modules and modules to projects. [`Workspace`] is an
//! in-memory implementation of that trait.

#![warn(missing_docs)]

pub mod generation;
pub mod ids;
pub mod model;
pub mod workspace;

pub use generation::{GenerationSource, GenerationToken, ModificationTracker};
pub use ids::{ModuleId, ProjectId};
pub use model::ProjectModel;
pub use workspace::Workspace;
