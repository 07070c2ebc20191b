//! Owned registries and the borrowed handle passed to factories.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::registry_trait::{RegistryApi, Storage, TraceSlot};

/// An isolated registry instance.
///
/// All operations come from [`RegistryApi`]. Coordinators, and any instances they
/// retain, live as long as the container.
///
/// # Examples
///
/// ```
/// use dependency_registry::{Container, Options, RegistryApi};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// let container = Container::new();
/// container
///     .register::<dyn Greeter, ()>(Options::SHARED | Options::RETAINED, |_, ()| {
///         Ok(Arc::new(English) as Arc<dyn Greeter>)
///     })
///     .unwrap();
///
/// let greeter = container.resolve::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// ```
pub struct Container {
    storage: Storage,
    trace: TraceSlot,
}

impl Container {
    pub fn new() -> Self {
        Container {
            storage: Mutex::new(HashMap::new()),
            trace: Mutex::new(None),
        }
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.storage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryApi for Container {
    fn storage(&self) -> &Storage {
        &self.storage
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.len())
            .finish_non_exhaustive()
    }
}

/// A borrowed handle onto a registry.
///
/// Factories receive one so they can resolve their own dependencies. It exposes the full
/// [`RegistryApi`], registration included.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    storage: &'a Storage,
    trace: &'a TraceSlot,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(storage: &'a Storage, trace: &'a TraceSlot) -> Self {
        Resolver { storage, trace }
    }
}

impl RegistryApi for Resolver<'_> {
    fn storage(&self) -> &Storage {
        self.storage
    }

    fn trace(&self) -> &TraceSlot {
        self.trace
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
