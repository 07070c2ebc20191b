//! # Dependency Registry
//!
//! A thread-safe registry of factories for abstract capabilities. Independent parts of a
//! program register factories keyed by the resolved type, a registrant tag and a parameters
//! type, and resolve instances on demand.
//!
//! ## Quick Start
//!
//! ```rust
//! use dependency_registry::{Container, Options, RegistryApi};
//! use std::sync::Arc;
//!
//! let container = Container::new();
//!
//! // Register a factory
//! container
//!     .register::<String, ()>(Options::SHARED | Options::RETAINED, |_, ()| {
//!         Ok(Arc::new("Hello, World!".to_string()))
//!     })
//!     .unwrap();
//!
//! // Resolve the instance
//! let message = container.resolve::<String>().unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! ```
//!
//! ## Lifetimes
//!
//! - `Options::empty()`: a new instance on every resolution
//! - `Options::SHARED`: one instance, observed weakly; rebuilt once every holder drops it
//! - `Options::SHARED | Options::RETAINED`: one instance, owned by the registry
//!
//! ## Main Types
//!
//! - [`RegistryApi`] - registration and resolution, implemented by every registry
//! - [`Container`] - an isolated registry instance
//! - [`Resolver`] - the handle factories use for nested resolution
//! - [`define_registry!`] - declare a named process-wide registry; [`global`] is one

mod container;
mod coordinator;
mod key;
mod lifetime;
mod macros;
mod reference;
mod registry_error;
mod registry_event;
mod registry_trait;

pub use container::{Container, Resolver};
pub use coordinator::Factory;
pub use key::{DefaultRegistrant, Registrant, RegistrationKey, DEFAULT_REGISTRANT};
pub use lifetime::{Lifetime, Options};
pub use reference::Reference;
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{RegistryApi, Storage, TraceCallback, TraceSlot};

crate::define_registry!(global);

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;
