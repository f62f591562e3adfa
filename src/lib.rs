//! Name-indexed registry and factory for pluggable compute units.
//!
//! A [`Unit`](unit::Unit) transforms an input `f32` buffer into an output
//! `f32` buffer. Units are registered under a unique name in a
//! [`UnitRegistry`](registry::UnitRegistry) and constructed by that name:
//!
//! ```
//! use veles_units::prelude::*;
//!
//! let registry = UnitRegistry::with_builtins().unwrap();
//! let dummy = registry["Dummy"]();
//! assert_eq!(dummy.name(), "Dummy");
//! ```

pub mod builtin;
pub mod error;
pub mod global;
#[doc(hidden)]
pub mod invariant_ppt;
mod macros;
pub mod registry;
pub mod unit;

/// Commonly used types and traits.
pub mod prelude {
    pub use crate::builtin::{register_builtins, DummyUnit};
    pub use crate::error::{RegistryError, UnitError};
    pub use crate::registry::{UnitFactory, UnitRegistry};
    pub use crate::unit::{execute_checked, param_as, ParamValue, Unit, UnitDef};
}
