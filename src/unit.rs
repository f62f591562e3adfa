//! Trait-based unit definitions.

#![forbid(unsafe_code)]

use crate::error::UnitError;
use crate::invariant_ppt::{assert_invariant, EXEC_BUFFER_BOUNDS};
use std::any::Any;
use std::sync::Arc;

/// Opaque, shared parameter value. Units downcast it to the type they expect.
pub type ParamValue = Arc<dyn Any + Send + Sync>;

/// Object-safe unit contract; this is what the registry hands out.
pub trait Unit: Send + Sync {
    /// Stable identifier, equal to the key the unit is registered under.
    fn name(&self) -> &str;

    /// Set a named parameter before execution.
    fn set_parameter(&mut self, key: &str, value: ParamValue) -> Result<(), UnitError>;

    /// Transform `inputs` into `outputs`.
    fn execute(&self, inputs: &[f32], outputs: &mut [f32]) -> Result<(), UnitError>;

    /// Number of input samples consumed by one `execute` call.
    fn input_count(&self) -> usize;

    /// Number of output samples produced by one `execute` call.
    fn output_count(&self) -> usize;
}

/// Typed unit definition; implement this to register a unit by type.
pub trait UnitDef: Unit + Sized + 'static {
    /// Registry key for this unit type.
    const NAME: &'static str;

    /// Construct a fresh instance with default parameters.
    fn create() -> Self;
}

/// Execute `unit` after checking the buffers against its declared counts.
pub fn execute_checked(
    unit: &dyn Unit,
    inputs: &[f32],
    outputs: &mut [f32],
) -> Result<(), UnitError> {
    let expected = unit.input_count();
    if inputs.len() < expected {
        return Err(UnitError::InputSize {
            expected,
            actual: inputs.len(),
        });
    }
    let expected = unit.output_count();
    if outputs.len() < expected {
        return Err(UnitError::OutputSize {
            expected,
            actual: outputs.len(),
        });
    }
    assert_invariant(
        EXEC_BUFFER_BOUNDS,
        true,
        "Buffers cover declared unit counts",
        Some(unit.name()),
    );
    unit.execute(inputs, outputs)
}

/// Downcast a parameter value, mapping a type mismatch to [`UnitError::ParameterType`].
pub fn param_as<T: Any + Send + Sync>(key: &str, value: &ParamValue) -> Result<Arc<T>, UnitError> {
    Arc::clone(value)
        .downcast::<T>()
        .map_err(|_| UnitError::ParameterType(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Copies `width` inputs to outputs, scaled by `factor`.
    struct Scale {
        width: usize,
        factor: f32,
    }

    impl Unit for Scale {
        fn name(&self) -> &str {
            "Scale"
        }

        fn set_parameter(&mut self, key: &str, value: ParamValue) -> Result<(), UnitError> {
            match key {
                "factor" => {
                    self.factor = *param_as::<f32>(key, &value)?;
                    Ok(())
                }
                _ => Err(UnitError::UnknownParameter(key.to_string())),
            }
        }

        fn execute(&self, inputs: &[f32], outputs: &mut [f32]) -> Result<(), UnitError> {
            for (o, &i) in outputs[..self.width].iter_mut().zip(&inputs[..self.width]) {
                *o = i * self.factor;
            }
            Ok(())
        }

        fn input_count(&self) -> usize {
            self.width
        }

        fn output_count(&self) -> usize {
            self.width
        }
    }

    #[test]
    fn checked_execute_runs_unit() {
        let mut unit = Scale { width: 4, factor: 1.0 };
        unit.set_parameter("factor", Arc::new(2.0f32)).unwrap();
        let mut out = vec![0.0; 4];
        execute_checked(&unit, &[1.0, 2.0, 3.0, 4.0], &mut out).unwrap();
        assert_eq!(out, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn checked_execute_rejects_short_input() {
        let unit = Scale { width: 4, factor: 1.0 };
        let mut out = vec![0.0; 4];
        assert_eq!(
            execute_checked(&unit, &[1.0], &mut out),
            Err(UnitError::InputSize {
                expected: 4,
                actual: 1
            })
        );
        // Outputs untouched on rejection
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn checked_execute_rejects_short_output() {
        let unit = Scale { width: 2, factor: 1.0 };
        let mut out = vec![0.0; 1];
        assert_eq!(
            execute_checked(&unit, &[1.0, 1.0], &mut out),
            Err(UnitError::OutputSize {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn parameter_type_mismatch() {
        let mut unit = Scale { width: 1, factor: 1.0 };
        let err = unit
            .set_parameter("factor", Arc::new("loud".to_string()))
            .unwrap_err();
        assert_eq!(err, UnitError::ParameterType("factor".to_string()));
        assert_eq!(unit.factor, 1.0);
    }

    #[test]
    fn unknown_parameter_rejected() {
        let mut unit = Scale { width: 1, factor: 1.0 };
        assert_eq!(
            unit.set_parameter("bias", Arc::new(0.5f32)),
            Err(UnitError::UnknownParameter("bias".to_string()))
        );
    }
}
