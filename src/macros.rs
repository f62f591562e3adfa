//! Registration macros.

/// Register several [`UnitDef`](crate::unit::UnitDef) types with a registry.
///
/// Evaluates to `Result<(), RegistryError>` and stops at the first failure.
///
/// ```
/// use veles_units::builtin::DummyUnit;
/// use veles_units::registry::UnitRegistry;
/// use veles_units::unit::Unit;
///
/// let mut registry = UnitRegistry::new();
/// veles_units::register_units!(registry, DummyUnit).unwrap();
/// assert_eq!(registry["Dummy"]().name(), "Dummy");
/// ```
#[macro_export]
macro_rules! register_units {
    ($registry:expr, $($unit:ty),+ $(,)?) => {
        (|| -> ::core::result::Result<(), $crate::error::RegistryError> {
            $( $registry.register_unit::<$unit>()?; )+
            Ok(())
        })()
    };
}
