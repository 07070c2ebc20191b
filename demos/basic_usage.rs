//! Basic usage example for dependency-registry.
//!
//! Demonstrates:
//! - Registering factories for a trait under two registrant tags
//! - Transient, shared and retained lifetimes
//! - Factories resolving their own dependencies
//! - Watching registry activity with a trace callback
//!
//! Run with: `cargo run --example basic_usage`

use dependency_registry::{define_registry, Options, RegistryApi, RegistryError};
use std::sync::Arc;

// Create an isolated registry for this example
define_registry!(app);

#[derive(Debug, PartialEq, Eq, Hash)]
enum Store {
    Remote,
    Cached,
}

#[derive(Debug)]
struct AppConfig {
    base_url: String,
}

trait UserService: Send + Sync {
    fn describe(&self) -> String;
}

struct RemoteUserService {
    config: Arc<AppConfig>,
}

impl UserService for RemoteUserService {
    fn describe(&self) -> String {
        format!("remote users at {}", self.config.base_url)
    }
}

struct CachedUserService {
    capacity: usize,
}

impl UserService for CachedUserService {
    fn describe(&self) -> String {
        format!("cached users (capacity {})", self.capacity)
    }
}

fn main() -> Result<(), RegistryError> {
    println!("=== dependency-registry: Basic Usage ===\n");

    app::set_trace_callback(|event| println!("   [trace] {event}"));

    // -------------------------------------------------------------------------
    // 1. Register a pre-built instance (retained for the registry's lifetime)
    // -------------------------------------------------------------------------
    println!("1. Registering configuration...");

    app::register_instance(Arc::new(AppConfig {
        base_url: "https://api.example.com".to_string(),
    }))?;

    // -------------------------------------------------------------------------
    // 2. Register two providers of the same capability
    // -------------------------------------------------------------------------
    println!("\n2. Registering user services...");

    app::register_with::<dyn UserService, ()>(Store::Remote, Options::empty(), |resolver, ()| {
        Ok(Arc::new(RemoteUserService {
            config: resolver.resolve::<AppConfig>()?,
        }) as Arc<dyn UserService>)
    })?;

    app::register_with::<dyn UserService, usize>(Store::Cached, Options::SHARED, |_, capacity| {
        Ok(Arc::new(CachedUserService { capacity }) as Arc<dyn UserService>)
    })?;

    // -------------------------------------------------------------------------
    // 3. Resolve them
    // -------------------------------------------------------------------------
    println!("\n3. Resolving...");

    let remote = app::resolve_using::<dyn UserService>(Store::Remote)?;
    println!("   {}", remote.describe());

    let cached = app::resolve_with::<dyn UserService, _>(Store::Cached, 128usize)?;
    let again = app::resolve_with::<dyn UserService, _>(Store::Cached, 256usize)?;
    println!("   {}", cached.describe());
    println!("   shared while held: {}", Arc::ptr_eq(&cached, &again));

    drop((cached, again));
    let rebuilt = app::resolve_with::<dyn UserService, _>(Store::Cached, 256usize)?;
    println!("   rebuilt after release: {}", rebuilt.describe());

    // -------------------------------------------------------------------------
    // 4. Errors
    // -------------------------------------------------------------------------
    println!("\n4. Errors...");

    if let Err(err) = app::register_instance(Arc::new(AppConfig {
        base_url: "http://localhost".to_string(),
    })) {
        println!("   {err}");
    }

    if let Err(err) = app::resolve::<dyn UserService>() {
        println!("   {err}");
    }

    app::clear_trace_callback();
    println!("\n=== Done ===");
    Ok(())
}
