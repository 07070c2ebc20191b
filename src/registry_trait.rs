//! Core trait defining registry behavior.
//!
//! This module provides the `RegistryApi` trait with default implementations for
//! registration, resolution and tracing. Implementors only supply access to the
//! coordinator mapping and the trace slot, which lets an owned [`Container`], a borrowed
//! [`Resolver`] handle and a `define_registry!` module share one implementation.
//!
//! Registrations are keyed by (resolved type, registrant tag, parameters type). Each key
//! holds at most one factory; registering the same key again is rejected, never replaced.
//!
//! [`Container`]: crate::Container

use std::any::{self, Any};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, trace, warn};

use crate::coordinator::Coordinator;
use crate::{
    Lifetime, Options, Registrant, RegistrationKey, RegistryError, RegistryEvent, Resolver,
    DEFAULT_REGISTRANT,
};

/// Mapping from registration key to a type-erased coordinator.
pub type Storage = Mutex<HashMap<RegistrationKey, Arc<dyn Any + Send + Sync>>>;

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Holds an optional tracing callback.
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`storage` and `trace`) to be implemented by the implementor.
pub trait RegistryApi {
    // -------------------------------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------------------------------

    /// Access the coordinator mapping.
    fn storage(&self) -> &Storage;

    /// Access the trace callback slot.
    fn trace(&self) -> &TraceSlot;

    /// Borrow a handle that factories use for nested lookups.
    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.storage(), self.trace())
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked for every registration, resolution, construction and
    /// successful construction and existence check. No registry lock is held while it runs,
    /// so it may use the registry itself.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Emit a registry event using the current callback, if any.
    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register a factory for `T` under `registrant`, taking parameters of type `P`.
    ///
    /// Nothing is constructed until the first resolution.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UndefinedLifetime`] if `options` is not a defined policy
    /// - [`RegistryError::DuplicateRegistration`] if the key is already taken
    ///
    /// Neither failure modifies the registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use dependency_registry::{Container, Options, RegistryApi};
    /// use std::sync::Arc;
    ///
    /// let container = Container::new();
    /// container
    ///     .register_with::<String, u32>("repeat", Options::empty(), |_, count| {
    ///         Ok(Arc::new("ab".repeat(count as usize)))
    ///     })
    ///     .unwrap();
    ///
    /// let value = container.resolve_with::<String, _>("repeat", 2u32).unwrap();
    /// assert_eq!(&*value, "abab");
    /// ```
    fn register_with<T, P>(
        &self,
        registrant: impl Registrant,
        options: Options,
        factory: impl Fn(&Resolver<'_>, P) -> Result<Arc<T>, RegistryError> + Send + Sync + 'static,
    ) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        P: 'static,
    {
        let type_name = any::type_name::<T>();
        let lifetime = Lifetime::try_from(options)?;
        let key = RegistrationKey::new::<T, P>(registrant);

        {
            let mut storage = self.storage().lock().unwrap_or_else(PoisonError::into_inner);

            match storage.entry(key) {
                Entry::Occupied(occupied) => {
                    debug!(key = ?occupied.key(), "rejected duplicate registration");
                    return Err(RegistryError::DuplicateRegistration { type_name });
                }
                Entry::Vacant(vacant) => {
                    debug!(key = ?vacant.key(), %lifetime, "registered factory");
                    vacant.insert(Arc::new(Coordinator::<T, P>::new(lifetime, Box::new(factory))));
                }
            }
        }

        self.emit_event(&RegistryEvent::Register {
            type_name,
            lifetime,
        });

        Ok(())
    }

    /// Register a factory under [`DEFAULT_REGISTRANT`].
    fn register<T, P>(
        &self,
        options: Options,
        factory: impl Fn(&Resolver<'_>, P) -> Result<Arc<T>, RegistryError> + Send + Sync + 'static,
    ) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        P: 'static,
    {
        self.register_with(DEFAULT_REGISTRANT, options, factory)
    }

    /// Register a pre-built instance under `registrant`.
    ///
    /// The instance is resolved with `()` parameters and owned by the registry.
    fn register_instance_with<T>(
        &self,
        registrant: impl Registrant,
        instance: Arc<T>,
    ) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register_with::<T, ()>(
            registrant,
            Options::SHARED | Options::RETAINED,
            move |_, ()| Ok(Arc::clone(&instance)),
        )
    }

    /// Register a pre-built instance under [`DEFAULT_REGISTRANT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dependency_registry::{Container, RegistryApi};
    /// use std::sync::Arc;
    ///
    /// let container = Container::new();
    /// container.register_instance(Arc::new(42u64)).unwrap();
    ///
    /// let answer = container.resolve::<u64>().unwrap();
    /// assert_eq!(*answer, 42);
    /// ```
    fn register_instance<T>(&self, instance: Arc<T>) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register_instance_with(DEFAULT_REGISTRANT, instance)
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Resolve `T` registered under `registrant` with parameters of type `P`.
    ///
    /// The mapping lock is released before the coordinator runs, so factories may resolve
    /// or register other entries through their [`Resolver`].
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnregisteredType`] if nothing is registered for the key
    /// - whatever the factory returns, unchanged
    fn resolve_with<T, P>(
        &self,
        registrant: impl Registrant,
        parameters: P,
    ) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        P: 'static,
    {
        let type_name = any::type_name::<T>();
        let key = RegistrationKey::new::<T, P>(registrant);

        let entry = self
            .storage()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();

        let coordinator = entry.and_then(|entry| match entry.downcast::<Coordinator<T, P>>() {
            Ok(coordinator) => Some(coordinator),
            Err(_) => {
                warn!(?key, "registered coordinator has an unexpected shape");
                None
            }
        });

        self.emit_event(&RegistryEvent::Resolve {
            type_name,
            found: coordinator.is_some(),
        });

        match coordinator {
            Some(coordinator) => {
                trace!(type_name, lifetime = %coordinator.lifetime(), "resolving");
                coordinator.resolve(&self.resolver(), parameters)
            }
            None => Err(RegistryError::UnregisteredType { type_name }),
        }
    }

    /// Resolve `T` registered under `registrant` with `()` parameters.
    fn resolve_using<T>(&self, registrant: impl Registrant) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with(registrant, ())
    }

    /// Resolve `T` registered under [`DEFAULT_REGISTRANT`] with `()` parameters.
    fn resolve<T>(&self) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with(DEFAULT_REGISTRANT, ())
    }

    /// Check whether a factory is registered for `T`, `registrant` and `P`.
    ///
    /// Never constructs an instance.
    fn contains<T, P>(&self, registrant: impl Registrant) -> bool
    where
        T: ?Sized + 'static,
        P: 'static,
    {
        let key = RegistrationKey::new::<T, P>(registrant);
        let found = self
            .storage()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key);

        self.emit_event(&RegistryEvent::Contains {
            type_name: any::type_name::<T>(),
            found,
        });

        found
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
