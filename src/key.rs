//! Registration keys and registrant tags.
//!
//! A registration is addressed by the resolved type, a caller-chosen registrant tag and
//! the parameters type. Tags are type-erased so that any hashable value can be used to
//! tell several factories for the same type apart.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type-erased registrant tag.
///
/// Implemented for every `Eq + Hash + Debug + Send + Sync + 'static` type. Two tags are
/// equal only if they have the same concrete type and compare equal.
pub trait Registrant: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn eq_registrant(&self, other: &dyn Registrant) -> bool;

    fn hash_registrant(&self, state: &mut dyn Hasher);
}

impl<T> Registrant for T
where
    T: Any + Eq + Hash + fmt::Debug + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_registrant(&self, other: &dyn Registrant) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn hash_registrant(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// Tag used whenever the caller does not pick a registrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DefaultRegistrant;

/// The registrant passed by every convenience entry point.
pub const DEFAULT_REGISTRANT: DefaultRegistrant = DefaultRegistrant;

/// Composite key of (resolved type, registrant tag, parameters type).
pub struct RegistrationKey {
    resolved: TypeId,
    resolved_name: &'static str,
    registrant: Box<dyn Registrant>,
    parameters: TypeId,
    parameters_name: &'static str,
}

impl RegistrationKey {
    pub fn new<T, P>(registrant: impl Registrant) -> Self
    where
        T: ?Sized + 'static,
        P: 'static,
    {
        RegistrationKey {
            resolved: TypeId::of::<T>(),
            resolved_name: any::type_name::<T>(),
            registrant: Box::new(registrant),
            parameters: TypeId::of::<P>(),
            parameters_name: any::type_name::<P>(),
        }
    }

    pub fn resolved_name(&self) -> &'static str {
        self.resolved_name
    }

    pub fn parameters_name(&self) -> &'static str {
        self.parameters_name
    }

    pub fn registrant(&self) -> &dyn Registrant {
        self.registrant.as_ref()
    }
}

impl PartialEq for RegistrationKey {
    fn eq(&self, other: &Self) -> bool {
        self.resolved == other.resolved
            && self.parameters == other.parameters
            && self.registrant.eq_registrant(other.registrant.as_ref())
    }
}

impl Eq for RegistrationKey {}

impl Hash for RegistrationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolved.hash(state);
        self.parameters.hash(state);
        self.registrant.hash_registrant(state);
    }
}

impl fmt::Debug for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationKey")
            .field("resolved", &self.resolved_name)
            .field("registrant", &self.registrant)
            .field("parameters", &self.parameters_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    #[derive(Debug, PartialEq, Eq, Hash)]
    enum Tag {
        One,
        Two,
    }

    #[derive(Debug, PartialEq, Eq, Hash)]
    enum OtherTag {
        One,
    }

    trait Service {}

    fn hash_of(key: &RegistrationKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_components_give_equal_keys() {
        let a = RegistrationKey::new::<dyn Service, String>(Tag::One);
        let b = RegistrationKey::new::<dyn Service, String>(Tag::One);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_any_component_differs() {
        let base = RegistrationKey::new::<dyn Service, String>(Tag::One);
        assert_ne!(base, RegistrationKey::new::<String, String>(Tag::One));
        assert_ne!(base, RegistrationKey::new::<dyn Service, String>(Tag::Two));
        assert_ne!(base, RegistrationKey::new::<dyn Service, u32>(Tag::One));
    }

    #[test]
    fn test_tags_of_different_types_never_match() {
        let a = RegistrationKey::new::<u8, ()>(Tag::One);
        let b = RegistrationKey::new::<u8, ()>(OtherTag::One);
        assert_ne!(a, b);
    }

    #[test]
    fn test_string_tags() {
        let a = RegistrationKey::new::<u8, ()>("one");
        let b = RegistrationKey::new::<u8, ()>("one");
        let c = RegistrationKey::new::<u8, ()>(String::from("one"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_keys_in_hash_set() {
        let mut set = HashSet::new();
        assert!(set.insert(RegistrationKey::new::<u8, ()>(DEFAULT_REGISTRANT)));
        assert!(set.insert(RegistrationKey::new::<u8, ()>(Tag::One)));
        assert!(!set.insert(RegistrationKey::new::<u8, ()>(DefaultRegistrant)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_debug_uses_type_names() {
        let key = RegistrationKey::new::<u8, String>(Tag::Two);
        let debug = format!("{key:?}");
        assert!(debug.contains("u8"));
        assert!(debug.contains("Two"));
        assert!(debug.contains("alloc::string::String"));
        assert_eq!(key.resolved_name(), "u8");
        assert_eq!(key.parameters_name(), "alloc::string::String");
    }
}
