//! Instance lifetime policies.
//!
//! Registrations are configured with an [`Options`] flag set which is normalized into a
//! [`Lifetime`] when the factory is registered. Only three combinations are meaningful:
//!
//! | Options                 | Lifetime                | Cached as              |
//! |-------------------------|-------------------------|------------------------|
//! | `empty()`               | [`Lifetime::Transient`] | nothing                |
//! | `SHARED`                | [`Lifetime::Shared`]    | non-owning observation |
//! | `SHARED \| RETAINED`    | [`Lifetime::Retained`]  | owning reference       |
//!
//! `RETAINED` on its own is rejected with [`RegistryError::UndefinedLifetime`].

use std::fmt;

use crate::RegistryError;

bitflags::bitflags! {
    /// Lifetime flags supplied at registration time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Options: u8 {
        /// Produce at most one live instance and hand it to every caller.
        const SHARED = 1 << 0;
        /// Keep the shared instance alive for as long as the registry lives.
        const RETAINED = 1 << 1;
    }
}

/// A normalized lifetime policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// A new instance on every resolution.
    Transient,
    /// One instance while somebody outside the registry holds it.
    Shared,
    /// One instance owned by the registry.
    Retained,
}

impl Lifetime {
    /// Whether resolutions consult the cache at all.
    pub fn is_cached(self) -> bool {
        !matches!(self, Lifetime::Transient)
    }
}

impl TryFrom<Options> for Lifetime {
    type Error = RegistryError;

    fn try_from(options: Options) -> Result<Self, Self::Error> {
        if options.is_empty() {
            Ok(Lifetime::Transient)
        } else if options == Options::SHARED {
            Ok(Lifetime::Shared)
        } else if options == Options::SHARED | Options::RETAINED {
            Ok(Lifetime::Retained)
        } else {
            Err(RegistryError::UndefinedLifetime { options })
        }
    }
}

impl From<Lifetime> for Options {
    fn from(lifetime: Lifetime) -> Self {
        match lifetime {
            Lifetime::Transient => Options::empty(),
            Lifetime::Shared => Options::SHARED,
            Lifetime::Retained => Options::SHARED | Options::RETAINED,
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifetime::Transient => write!(f, "transient"),
            Lifetime::Shared => write!(f, "shared"),
            Lifetime::Retained => write!(f, "retained"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_combinations() {
        assert_eq!(
            Lifetime::try_from(Options::empty()).unwrap(),
            Lifetime::Transient
        );
        assert_eq!(
            Lifetime::try_from(Options::SHARED).unwrap(),
            Lifetime::Shared
        );
        assert_eq!(
            Lifetime::try_from(Options::SHARED | Options::RETAINED).unwrap(),
            Lifetime::Retained
        );
    }

    #[test]
    fn test_retained_alone_is_rejected() {
        let err = Lifetime::try_from(Options::RETAINED).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UndefinedLifetime { options } if options == Options::RETAINED
        ));
    }

    #[test]
    fn test_default_options_are_transient() {
        assert_eq!(
            Lifetime::try_from(Options::default()).unwrap(),
            Lifetime::Transient
        );
    }

    #[test]
    fn test_into_options() {
        for lifetime in [Lifetime::Transient, Lifetime::Shared, Lifetime::Retained] {
            assert_eq!(Lifetime::try_from(Options::from(lifetime)).unwrap(), lifetime);
        }
    }

    #[test]
    fn test_is_cached() {
        assert!(!Lifetime::Transient.is_cached());
        assert!(Lifetime::Shared.is_cached());
        assert!(Lifetime::Retained.is_cached());
    }

    #[test]
    fn test_display() {
        assert_eq!(Lifetime::Transient.to_string(), "transient");
        assert_eq!(Lifetime::Shared.to_string(), "shared");
        assert_eq!(Lifetime::Retained.to_string(), "retained");
    }
}
