use std::sync::{Arc, Weak};

/// A cached instance, either owned or merely observed.
///
/// Only `Arc`-backed values can be held, so a weak observation of a plain value is
/// impossible to express. `T` may be unsized to allow trait objects.
#[derive(Debug)]
pub enum Reference<T: ?Sized> {
    /// Keeps the instance alive for as long as the reference is held.
    Strong(Arc<T>),
    /// Yields the instance only while some other owner keeps it alive.
    ///
    /// Once the instance is dropped the allocation is freed only when this reference is.
    Weak(Weak<T>),
}

impl<T: ?Sized> Reference<T> {
    /// Takes ownership of `instance`.
    pub fn strong(instance: Arc<T>) -> Self {
        Reference::Strong(instance)
    }

    /// Observes `instance` without owning it.
    pub fn weak(instance: &Arc<T>) -> Self {
        Reference::Weak(Arc::downgrade(instance))
    }

    /// Returns the instance if it is still alive.
    ///
    /// Always `Some` for [`Reference::Strong`]. For [`Reference::Weak`] absence is the
    /// expected outcome once every owner has released the instance.
    pub fn instance(&self) -> Option<Arc<T>> {
        match self {
            Reference::Strong(instance) => Some(Arc::clone(instance)),
            Reference::Weak(observed) => observed.upgrade(),
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Reference::Strong(_) => true,
            Reference::Weak(observed) => observed.strong_count() > 0,
        }
    }
}

impl<T: ?Sized> Clone for Reference<T> {
    fn clone(&self) -> Self {
        match self {
            Reference::Strong(instance) => Reference::Strong(Arc::clone(instance)),
            Reference::Weak(observed) => Reference::Weak(Weak::clone(observed)),
        }
    }
}
