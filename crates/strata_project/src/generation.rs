//! Generation tokens and the sources that issue them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A validity epoch of a project.
///
/// Every cached value derived from the project is valid only while the
/// project's current token equals the token the value was built under.
/// Tokens only ever move forward.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GenerationToken(u64);

impl GenerationToken {
    /// The token of a project nobody has modified yet.
    pub const INITIAL: GenerationToken = GenerationToken(0);

    /// Creates a token from a raw counter value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenerationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Anything that can report the current generation of a scope.
///
/// Cache operations take the scope explicitly, so a test can drive
/// invalidation through a fake source instead of a real project.
pub trait GenerationSource: Send + Sync {
    /// The token describing the scope's current truth.
    fn current_generation(&self) -> GenerationToken;
}

/// Project-wide modification tracker: a monotonically advancing counter.
///
/// The host calls [`advance`](Self::advance) whenever a change may affect
/// analysis results anywhere in the project.
#[derive(Debug, Default)]
pub struct ModificationTracker {
    count: AtomicU64,
}

impl ModificationTracker {
    /// Creates a tracker positioned at [`GenerationToken::INITIAL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a project-wide modification and returns the new token.
    pub fn advance(&self) -> GenerationToken {
        let next = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(generation = next, "project generation advanced");
        GenerationToken(next)
    }

    /// The current token.
    pub fn current(&self) -> GenerationToken {
        GenerationToken(self.count.load(Ordering::Acquire))
    }
}

impl GenerationSource for ModificationTracker {
    fn current_generation(&self) -> GenerationToken {
        self.current()
    }
}
