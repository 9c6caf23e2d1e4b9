//! Values that a cache may hold weakly and lose under memory pressure.

use std::sync::{Arc, Weak};

use strata_config::Retention;

/// A cache value that can be held through a weak handle.
///
/// Under [`Retention::Soft`] a cache stores only the handle. The value
/// survives for as long as some caller still owns a clone of it; after that
/// [`upgrade`](Self::upgrade) fails and the cache treats the key as absent.
pub trait Reclaimable: Clone {
    /// The weak form of the value.
    type Handle;

    /// Produces a handle that does not keep the value alive.
    fn downgrade(&self) -> Self::Handle;

    /// Recovers the value if it is still alive.
    fn upgrade(handle: &Self::Handle) -> Option<Self>;
}

impl<T: ?Sized> Reclaimable for Arc<T> {
    type Handle = Weak<T>;

    fn downgrade(&self) -> Weak<T> {
        Arc::downgrade(self)
    }

    fn upgrade(handle: &Weak<T>) -> Option<Self> {
        handle.upgrade()
    }
}

/// `None` is a real cached outcome ("nothing should exist for this key") and
/// is never reclaimed.
impl<T: Reclaimable> Reclaimable for Option<T> {
    type Handle = Option<T::Handle>;

    fn downgrade(&self) -> Self::Handle {
        self.as_ref().map(T::downgrade)
    }

    fn upgrade(handle: &Self::Handle) -> Option<Self> {
        match handle {
            None => Some(None),
            Some(inner) => T::upgrade(inner).map(Some),
        }
    }
}

/// How an entry is stored in a generation map.
pub(crate) enum Held<V: Reclaimable> {
    Strong(V),
    Soft(V::Handle),
}

impl<V: Reclaimable> Held<V> {
    pub(crate) fn new(value: &V, retention: Retention) -> Self {
        match retention {
            Retention::Strong => Held::Strong(value.clone()),
            Retention::Soft => Held::Soft(value.downgrade()),
        }
    }

    /// The stored value, or `None` once it has been reclaimed.
    pub(crate) fn restore(&self) -> Option<V> {
        match self {
            Held::Strong(value) => Some(value.clone()),
            Held::Soft(handle) => V::upgrade(handle),
        }
    }
}
