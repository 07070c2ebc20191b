use crate::Lifetime;

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use dependency_registry::{Lifetime, RegistryEvent};
///
/// let event = RegistryEvent::Register { type_name: "i32", lifetime: Lifetime::Shared };
/// assert_eq!(event.to_string(), "register { type_name: i32, lifetime: shared }");
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A factory was registered.
    Register {
        /// The resolved type name (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
        /// The normalized lifetime of the registration
        lifetime: Lifetime,
    },

    /// A type was requested from the registry.
    Resolve {
        type_name: &'static str,
        /// Whether a registration was found for the requested key
        found: bool,
    },

    /// A factory produced a new instance because no live cached instance existed.
    ///
    /// Emitted once the instance is built and cached. Failed constructions emit nothing.
    Construct {
        type_name: &'static str,
        lifetime: Lifetime,
    },

    /// A registration existence check was performed.
    Contains { type_name: &'static str, found: bool },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                type_name,
                lifetime,
            } => {
                write!(f, "register {{ type_name: {type_name}, lifetime: {lifetime} }}")
            }
            RegistryEvent::Resolve { type_name, found } => {
                write!(f, "resolve {{ type_name: {type_name}, found: {found} }}")
            }
            RegistryEvent::Construct {
                type_name,
                lifetime,
            } => {
                write!(f, "construct {{ type_name: {type_name}, lifetime: {lifetime} }}")
            }
            RegistryEvent::Contains { type_name, found } => {
                write!(f, "contains {{ type_name: {type_name}, found: {found} }}")
            }
        }
    }
}
