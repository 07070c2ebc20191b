//! Integration tests for the process-wide `global` registry.
//!
//! NOTE: All tests use #[serial] because they share the same static registry (global).
//! Running them in parallel would cause interference with the trace callback.

use dependency_registry::{global, Options, RegistryApi, RegistryError, DEFAULT_REGISTRANT};
use serial_test::serial;
use std::sync::{Arc, Mutex};

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum Env {
    Test,
    Staging,
}

#[test]
#[serial]
fn test_register_and_resolve_trait_object() {
    global::register_with::<dyn Clock, ()>(Env::Test, Options::SHARED | Options::RETAINED, |_, ()| {
        Ok(Arc::new(FixedClock(1_700_000_000)) as Arc<dyn Clock>)
    })
    .unwrap();

    let clock = global::resolve_using::<dyn Clock>(Env::Test).unwrap();
    assert_eq!(clock.now(), 1_700_000_000);

    let again = global::resolve_using::<dyn Clock>(Env::Test).unwrap();
    assert!(Arc::ptr_eq(&clock, &again));
}

#[test]
#[serial]
fn test_duplicate_in_global_is_rejected() {
    global::register_instance_with(Env::Staging, Arc::new(FixedClock(5)) as Arc<dyn Clock>)
        .unwrap();

    let err = global::register_instance_with(Env::Staging, Arc::new(FixedClock(6)) as Arc<dyn Clock>)
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateRegistration { .. }));

    assert_eq!(
        global::resolve_using::<dyn Clock>(Env::Staging).unwrap().now(),
        5
    );
}

#[test]
#[serial]
fn test_container_access_matches_free_functions() {
    struct Marker;

    global::container()
        .register_instance(Arc::new(Marker))
        .unwrap();

    assert!(global::contains::<Marker, ()>(DEFAULT_REGISTRANT));
    assert!(global::resolve::<Marker>().is_ok());
}

#[test]
#[serial]
fn test_global_trace_callback() {
    struct Traced;

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    global::set_trace_callback(move |event| sink.lock().unwrap().push(event.to_string()));

    global::register::<Traced, u8>(Options::empty(), |_, n| {
        assert_eq!(n, 3);
        Ok(Arc::new(Traced))
    })
    .unwrap();
    let _ = global::resolve_with::<Traced, _>(DEFAULT_REGISTRANT, 3u8).unwrap();
    global::clear_trace_callback();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 3);
    assert!(captured[0].starts_with("register"));
    assert!(captured[2].starts_with("construct"));
}
