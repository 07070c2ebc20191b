use thiserror::Error;

use crate::lifetime::Options;

/// Errors produced by registration and resolution.
///
/// Registry failures are local and leave no partial state behind: a failed
/// registration does not touch the mapping and a failed resolution does not
/// touch any cached instance.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A factory is already registered for the same type, registrant and parameters type.
    #[error("a factory is already registered for type: {type_name}")]
    DuplicateRegistration { type_name: &'static str },

    /// No factory is registered for the requested type, registrant and parameters type.
    #[error("no factory registered for type: {type_name}")]
    UnregisteredType { type_name: &'static str },

    /// The lifetime options do not name a defined policy (`RETAINED` without `SHARED`).
    #[error("undefined lifetime options: {options:?}")]
    UndefinedLifetime { options: Options },

    /// A factory failed with an error of its own.
    #[error(transparent)]
    Factory(Box<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wraps an arbitrary factory error.
    ///
    /// Registry errors raised by nested resolutions should be propagated with `?`
    /// instead, so the caller sees them unchanged.
    pub fn factory(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RegistryError::Factory(error.into())
    }

    /// Name of the type the error refers to, if any.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            RegistryError::DuplicateRegistration { type_name }
            | RegistryError::UnregisteredType { type_name } => Some(type_name),
            RegistryError::UndefinedLifetime { .. } | RegistryError::Factory(_) => None,
        }
    }
}
