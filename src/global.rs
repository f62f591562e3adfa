//! Process-wide shared registry.
//!
//! Prefer owning a [`UnitRegistry`] and passing it where it is needed; the
//! shared instance is for code that has no such owner.

use crate::builtin::register_builtins;
use crate::error::RegistryError;
use crate::registry::{construct, UnitRegistry};
use crate::unit::Unit;
use lazy_static::lazy_static;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref INSTANCE: RwLock<UnitRegistry> = RwLock::new(seeded());
}

fn seeded() -> UnitRegistry {
    let mut registry = UnitRegistry::new();
    if let Err(err) = register_builtins(&mut registry) {
        log::error!("Failed to register built-in units: {}", err);
    }
    registry
}

/// The shared registry, created with the built-in units on first access.
pub fn instance() -> &'static RwLock<UnitRegistry> {
    &INSTANCE
}

// Every registry operation leaves the map consistent, so a poisoned lock is
// still safe to use.
fn read() -> RwLockReadGuard<'static, UnitRegistry> {
    instance()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write() -> RwLockWriteGuard<'static, UnitRegistry> {
    instance()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register `factory` under `name` in the shared registry.
pub fn register<F>(name: &str, factory: F) -> Result<(), RegistryError>
where
    F: Fn() -> Box<dyn Unit> + Send + Sync + 'static,
{
    write().register(name, factory)
}

/// Register a typed unit in the shared registry.
pub fn register_unit<T: crate::unit::UnitDef>() -> Result<(), RegistryError> {
    write().register_unit::<T>()
}

/// Construct a unit from the shared registry. The factory runs without the lock held.
pub fn create(name: &str) -> Result<Box<dyn Unit>, RegistryError> {
    let factory = read().get(name)?;
    construct(name, factory.as_ref())
}

/// Whether `name` is registered in the shared registry.
pub fn contains(name: &str) -> bool {
    read().contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn instance_is_stable() {
        assert!(ptr::eq(instance(), instance()));
    }

    #[test]
    fn instance_holds_builtins() {
        assert!(contains("Dummy"));
        assert_eq!(create("Dummy").unwrap().name(), "Dummy");
    }

    #[test]
    fn instance_rejects_builtin_redefinition() {
        assert_eq!(
            register_unit::<crate::builtin::DummyUnit>(),
            Err(RegistryError::DuplicateName("Dummy".to_string()))
        );
    }
}
