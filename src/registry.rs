//! Registry module: name-indexed catalog of unit factories.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use crate::builtin::register_builtins;
use crate::error::RegistryError;
use crate::invariant_ppt::{
    assert_invariant, FACTORY_FRESH_INSTANCE, FACTORY_NAME_MATCH, REGISTRY_LOOKUP_DEFINED,
    REGISTRY_NAME_UNIQUE,
};
use crate::unit::{Unit, UnitDef};
use std::collections::HashMap;
use std::ops::Index;
use std::sync::Arc;

/// Zero-argument constructor producing a freshly owned unit.
pub type UnitFactory = Arc<dyn Fn() -> Box<dyn Unit> + Send + Sync>;

/// Catalog mapping unique unit names to their factories.
///
/// The registry owns factories only; every unit it constructs belongs to the
/// caller.
#[derive(Clone, Default)]
pub struct UnitRegistry {
    factories: HashMap<String, UnitFactory>,
}

impl std::fmt::Debug for UnitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl UnitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in units.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register `factory` under `name`.
    ///
    /// A name that is already taken is rejected and the existing factory is kept.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Unit> + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.factories.contains_key(name) {
            log::warn!("Rejected duplicate registration of unit '{}'", name);
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.factories.insert(name.to_string(), Arc::new(factory));

        assert_invariant(
            REGISTRY_NAME_UNIQUE,
            self.factories.contains_key(name),
            "Name maps to exactly one factory",
            Some(name),
        );
        log::debug!("Registered unit '{}'", name);
        Ok(())
    }

    /// Register a typed unit under its [`UnitDef::NAME`].
    pub fn register_unit<T: UnitDef>(&mut self) -> Result<(), RegistryError> {
        self.register(T::NAME, || Box::new(T::create()) as Box<dyn Unit>)
    }

    /// Install `factory` under `name`, returning the factory it displaced.
    pub fn replace<F>(&mut self, name: &str, factory: F) -> Result<Option<UnitFactory>, RegistryError>
    where
        F: Fn() -> Box<dyn Unit> + Send + Sync + 'static,
    {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let previous = self.factories.insert(name.to_string(), Arc::new(factory));
        if previous.is_some() {
            log::debug!("Replaced factory for unit '{}'", name);
        } else {
            log::debug!("Registered unit '{}'", name);
        }
        Ok(previous)
    }

    /// Remove the factory registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Option<UnitFactory> {
        self.factories.remove(name)
    }

    /// Look up the factory registered under `name`.
    pub fn get(&self, name: &str) -> Result<UnitFactory, RegistryError> {
        match self.factories.get(name) {
            Some(factory) => {
                assert_invariant(
                    REGISTRY_LOOKUP_DEFINED,
                    true,
                    "Lookup of registered name yields its factory",
                    Some(name),
                );
                Ok(Arc::clone(factory))
            }
            None => {
                log::warn!("Lookup of unregistered unit '{}'", name);
                Err(RegistryError::NotFound(name.to_string()))
            }
        }
    }

    /// Construct a new unit registered under `name`.
    ///
    /// Fails with [`RegistryError::NameMismatch`] when the factory produces a
    /// unit reporting a different name than its key.
    pub fn create(&self, name: &str) -> Result<Box<dyn Unit>, RegistryError> {
        let factory = self.get(name)?;
        construct(name, factory.as_ref())
    }

    /// Whether a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no factory is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Invoke `factory` and check the unit it builds answers to `name`.
pub(crate) fn construct(
    name: &str,
    factory: &(dyn Fn() -> Box<dyn Unit> + Send + Sync),
) -> Result<Box<dyn Unit>, RegistryError> {
    let unit = factory();
    if unit.name() != name {
        log::error!(
            "Factory for '{}' produced unit named '{}'",
            name,
            unit.name()
        );
        return Err(RegistryError::NameMismatch {
            expected: name.to_string(),
            actual: unit.name().to_string(),
        });
    }
    assert_invariant(
        FACTORY_NAME_MATCH,
        true,
        "Constructed unit reports its registry key",
        Some(name),
    );
    assert_invariant(
        FACTORY_FRESH_INSTANCE,
        true,
        "Factory returned an owned instance",
        Some(name),
    );
    Ok(unit)
}

impl Index<&str> for UnitRegistry {
    type Output = dyn Fn() -> Box<dyn Unit> + Send + Sync;

    /// Returns the factory registered under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not registered. Use [`UnitRegistry::get`] for a
    /// fallible lookup.
    fn index(&self, name: &str) -> &Self::Output {
        match self.factories.get(name) {
            Some(factory) => factory.as_ref(),
            None => panic!("no unit registered under '{}'", name),
        }
    }
}
