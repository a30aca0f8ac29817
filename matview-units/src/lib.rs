//! Matview Units - SI display-unit conversion
//!
//! Quantities in the archive are SI-denominated, with each quantity
//! annotated by an algebraic unit expression such as `"joule"` or
//! `"1 / meter^2"`. This crate converts those values into whatever unit
//! system the user prefers for display, and rewrites the unit label to
//! match.
//!
//! Dimensions covered (each with its registered units):
//! - Time (second, atomic unit of time)
//! - Length (meter, bohr, ångström)
//! - Mass (kilogram, electron mass, unified atomic mass unit)
//! - Current (ampere, atomic unit of current)
//! - Substance (mole)
//! - Luminosity (candela)
//! - Temperature (kelvin, celsius, fahrenheit, atomic unit of temperature)
//! - Force (newton, atomic unit of force)
//! - Pressure (pascal, gigapascal, atomic unit of pressure)
//! - Energy (joule, electron volt, hartree)
//! - Power (watt), Frequency (hertz)
//! - Electrical (volt, farad, coulomb, elementary charge, henry)
//! - Magnetic (tesla, weber, bohr magneton)
//!
//! Conversion is pure and synchronous: the registry and its tables are
//! read-only after startup, every call is independent, and identical
//! inputs always produce identical outputs.

mod convert;
mod dimension;
mod error;
mod expr;
mod registry;
mod system;

pub use convert::{convert_si, convert_si_label, convert_si_values, relabel_si};
pub use dimension::Dimension;
pub use error::ConvertError;
pub use expr::{parse_unit, UnitExpr, UnitOp};
pub use registry::{UnitDef, UnitRegistry, REGISTRY};
pub use system::UnitSystem;
