//! Macros for creating process-wide registries.
//!
//! This module provides a macro-based approach to declare a named, lazily initialized
//! registry with ergonomic free functions.

/// Creates a process-wide registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily initialized [`Container`](crate::Container) static (hidden)
/// - Free functions delegating to [`RegistryApi`](crate::RegistryApi)
/// - `container()` for trait-based access
///
/// # Examples
///
/// ```rust
/// use dependency_registry::{define_registry, Options};
/// use std::sync::Arc;
///
/// define_registry!(services);
///
/// services::register::<String, ()>(Options::SHARED | Options::RETAINED, |_, ()| {
///     Ok(Arc::new("Hello".to_string()))
/// })
/// .unwrap();
///
/// let message: Arc<String> = services::resolve().unwrap();
/// assert_eq!(&*message, "Hello");
/// ```
///
/// # Multiple Registries
///
/// Every invocation creates an isolated registry:
///
/// ```rust
/// use dependency_registry::define_registry;
/// use std::sync::Arc;
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// database::register_instance(Arc::new("db_connection".to_string())).unwrap();
///
/// assert!(database::resolve::<String>().is_ok());
/// assert!(cache::resolve::<String>().is_err());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            use $crate::{
                Container, Options, Registrant, RegistryApi, RegistryError, RegistryEvent,
                Resolver,
            };

            static CONTAINER: LazyLock<Container> = LazyLock::new(Container::new);

            /// The container backing this registry.
            pub fn container() -> &'static Container {
                &CONTAINER
            }

            /// Register a factory under `registrant`.
            pub fn register_with<T, P>(
                registrant: impl Registrant,
                options: Options,
                factory: impl Fn(&Resolver<'_>, P) -> Result<Arc<T>, RegistryError>
                    + Send
                    + Sync
                    + 'static,
            ) -> Result<(), RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
                P: 'static,
            {
                CONTAINER.register_with(registrant, options, factory)
            }

            /// Register a factory under the default registrant.
            pub fn register<T, P>(
                options: Options,
                factory: impl Fn(&Resolver<'_>, P) -> Result<Arc<T>, RegistryError>
                    + Send
                    + Sync
                    + 'static,
            ) -> Result<(), RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
                P: 'static,
            {
                CONTAINER.register(options, factory)
            }

            /// Register a pre-built instance under `registrant`.
            pub fn register_instance_with<T>(
                registrant: impl Registrant,
                instance: Arc<T>,
            ) -> Result<(), RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.register_instance_with(registrant, instance)
            }

            /// Register a pre-built instance under the default registrant.
            pub fn register_instance<T>(instance: Arc<T>) -> Result<(), RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.register_instance(instance)
            }

            /// Resolve `T` registered under `registrant` with `parameters`.
            pub fn resolve_with<T, P>(
                registrant: impl Registrant,
                parameters: P,
            ) -> Result<Arc<T>, RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
                P: 'static,
            {
                CONTAINER.resolve_with(registrant, parameters)
            }

            /// Resolve `T` registered under `registrant`.
            pub fn resolve_using<T>(registrant: impl Registrant) -> Result<Arc<T>, RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.resolve_using(registrant)
            }

            /// Resolve `T` registered under the default registrant.
            pub fn resolve<T>() -> Result<Arc<T>, RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.resolve()
            }

            /// Check if a factory is registered.
            pub fn contains<T, P>(registrant: impl Registrant) -> bool
            where
                T: ?Sized + 'static,
                P: 'static,
            {
                CONTAINER.contains::<T, P>(registrant)
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
                CONTAINER.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                CONTAINER.clear_trace_callback()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Options, DEFAULT_REGISTRANT};
    use std::sync::Arc;

    #[test]
    fn test_define_registry_macro() {
        define_registry!(test_reg);

        test_reg::register_instance(Arc::new(100i32)).unwrap();
        let value: Arc<i32> = test_reg::resolve().unwrap();
        assert_eq!(*value, 100);

        assert!(test_reg::contains::<i32, ()>(DEFAULT_REGISTRANT));
        assert!(!test_reg::contains::<f64, ()>(DEFAULT_REGISTRANT));
    }

    #[test]
    fn test_multiple_registries() {
        define_registry!(reg_a);
        define_registry!(reg_b);

        reg_a::register_instance(Arc::new(1i32)).unwrap();
        reg_b::register_instance(Arc::new(2i32)).unwrap();

        let a_val: Arc<i32> = reg_a::resolve().unwrap();
        let b_val: Arc<i32> = reg_b::resolve().unwrap();

        assert_eq!(*a_val, 1);
        assert_eq!(*b_val, 2);
    }

    #[test]
    fn test_tagged_and_parameterized() {
        define_registry!(tagged);

        tagged::register_with::<String, &'static str>("upper", Options::empty(), |_, s| {
            Ok(Arc::new(s.to_uppercase()))
        })
        .unwrap();

        let value = tagged::resolve_with::<String, _>("upper", "shout").unwrap();
        assert_eq!(&*value, "SHOUT");
        assert!(tagged::resolve_using::<String>("upper").is_err());
        assert!(tagged::container().len() == 1);
    }

    #[test]
    fn test_tracing() {
        define_registry!(trace_test);

        use std::sync::Mutex;
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        trace_test::set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(format!("{}", event));
        });

        trace_test::register_instance(Arc::new(42i32)).unwrap();
        let _: Arc<i32> = trace_test::resolve().unwrap();
        let _ = trace_test::contains::<i32, ()>(DEFAULT_REGISTRANT);
        trace_test::clear_trace_callback();

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 4);
        assert!(recorded[0].starts_with("register"));
        assert!(recorded[1].starts_with("resolve"));
        assert!(recorded[2].starts_with("construct"));
        assert!(recorded[3].starts_with("contains"));
    }
}
