//! Built-in units and the startup registration step.

use crate::error::{RegistryError, UnitError};
use crate::registry::UnitRegistry;
use crate::unit::{ParamValue, Unit, UnitDef};

/// Placeholder unit: no inputs, no outputs, ignores parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DummyUnit;

impl Unit for DummyUnit {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn set_parameter(&mut self, _key: &str, _value: ParamValue) -> Result<(), UnitError> {
        Ok(())
    }

    fn execute(&self, _inputs: &[f32], _outputs: &mut [f32]) -> Result<(), UnitError> {
        Ok(())
    }

    fn input_count(&self) -> usize {
        0
    }

    fn output_count(&self) -> usize {
        0
    }
}

impl UnitDef for DummyUnit {
    const NAME: &'static str = "Dummy";

    fn create() -> Self {
        DummyUnit
    }
}

/// Register every built-in unit. Call once while assembling a registry.
pub fn register_builtins(registry: &mut UnitRegistry) -> Result<(), RegistryError> {
    crate::register_units!(registry, DummyUnit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn dummy_contract() {
        let mut dummy = DummyUnit::create();
        assert_eq!(dummy.name(), "Dummy");
        assert_eq!(dummy.input_count(), 0);
        assert_eq!(dummy.output_count(), 0);
        dummy.set_parameter("anything", Arc::new(42u32)).unwrap();
        let mut out = [7.0f32; 2];
        dummy.execute(&[], &mut out).unwrap();
        // No-op: outputs untouched
        assert_eq!(out, [7.0, 7.0]);
    }

    #[test]
    fn builtins_register_once() {
        let mut registry = UnitRegistry::new();
        register_builtins(&mut registry).unwrap();
        assert_eq!(registry.names(), vec!["Dummy"]);
        assert_eq!(
            register_builtins(&mut registry),
            Err(RegistryError::DuplicateName("Dummy".to_string()))
        );
    }
}
