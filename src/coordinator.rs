//! Per-registration factory, lifetime policy and cache.

use std::any;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace};

use crate::{Lifetime, Reference, RegistryApi, RegistryError, RegistryEvent, Resolver};

/// Signature of a registered factory.
///
/// Factories receive a [`Resolver`] for nested lookups and the parameters supplied by the
/// caller of `resolve`.
pub type Factory<T, P> =
    dyn Fn(&Resolver<'_>, P) -> Result<Arc<T>, RegistryError> + Send + Sync + 'static;

/// Owns one factory and the instance it last produced.
///
/// For cached lifetimes the cache lock is held while the factory runs, so concurrent
/// resolutions of an empty coordinator produce a single instance. A factory that resolves
/// its own registration, directly or through a cycle, deadlocks.
pub(crate) struct Coordinator<T: ?Sized, P> {
    factory: Box<Factory<T, P>>,
    lifetime: Lifetime,
    cached: Mutex<Option<Reference<T>>>,
}

impl<T, P> Coordinator<T, P>
where
    T: ?Sized + Send + Sync + 'static,
    P: 'static,
{
    pub(crate) fn new(lifetime: Lifetime, factory: Box<Factory<T, P>>) -> Self {
        Coordinator {
            factory,
            lifetime,
            cached: Mutex::new(None),
        }
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub(crate) fn resolve(
        &self,
        resolver: &Resolver<'_>,
        parameters: P,
    ) -> Result<Arc<T>, RegistryError> {
        let instance = if self.lifetime.is_cached() {
            let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

            if let Some(instance) = cached.as_ref().and_then(Reference::instance) {
                trace!(type_name = any::type_name::<T>(), "resolved cached instance");
                return Ok(instance);
            }

            // a dead weak reference still pins its allocation
            *cached = None;

            let instance = self.construct(resolver, parameters)?;
            *cached = self.cache_entry(&instance);
            instance
        } else {
            self.construct(resolver, parameters)?
        };

        // the cache lock must not be held while the trace callback runs
        resolver.emit_event(&RegistryEvent::Construct {
            type_name: any::type_name::<T>(),
            lifetime: self.lifetime,
        });

        Ok(instance)
    }

    fn construct(&self, resolver: &Resolver<'_>, parameters: P) -> Result<Arc<T>, RegistryError> {
        debug!(
            type_name = any::type_name::<T>(),
            lifetime = %self.lifetime,
            "constructing instance"
        );
        (self.factory)(resolver, parameters)
    }

    fn cache_entry(&self, instance: &Arc<T>) -> Option<Reference<T>> {
        match self.lifetime {
            Lifetime::Transient => None,
            Lifetime::Shared => Some(Reference::weak(instance)),
            Lifetime::Retained => Some(Reference::strong(Arc::clone(instance))),
        }
    }

    #[cfg(test)]
    fn is_populated(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(Reference::is_alive)
    }

    #[cfg(test)]
    fn is_vacant(&self) -> bool {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}
