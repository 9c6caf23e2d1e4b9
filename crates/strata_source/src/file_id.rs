//! Opaque identity of a source file.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a file registered in the [`SourceDb`](crate::SourceDb).
///
/// Facade keys are sets of `FileId`s: two requests naming the same files in
/// a different order produce the same key. The ordering on `FileId` exists
/// only so those sets can be kept sorted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Creates a `FileId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file#{}", self.0)
    }
}
