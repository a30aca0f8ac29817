//! Physical dimension taxonomy
//!
//! Dimensions key the conversion tables and unit systems. Derived
//! quantities (energy, pressure, ...) are dimensions in their own right:
//! the archive annotates each quantity with one SI unit expression, and
//! conversion only ever swaps whole units within a dimension.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A physical dimension, named the way the archive metainfo names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Time,
    Length,
    Mass,
    Current,
    Substance,
    Luminosity,
    Temperature,
    Force,
    Pressure,
    Energy,
    Power,
    Frequency,
    ElectricPotential,
    Capacitance,
    Charge,
    MagneticField,
    MagneticFlux,
    MagneticDipole,
    Inductance,
    Dimensionless,
}

impl Dimension {
    /// All dimensions, in table order.
    pub const ALL: [Dimension; 20] = [
        Dimension::Time,
        Dimension::Length,
        Dimension::Mass,
        Dimension::Current,
        Dimension::Substance,
        Dimension::Luminosity,
        Dimension::Temperature,
        Dimension::Force,
        Dimension::Pressure,
        Dimension::Energy,
        Dimension::Power,
        Dimension::Frequency,
        Dimension::ElectricPotential,
        Dimension::Capacitance,
        Dimension::Charge,
        Dimension::MagneticField,
        Dimension::MagneticFlux,
        Dimension::MagneticDipole,
        Dimension::Inductance,
        Dimension::Dimensionless,
    ];

    /// Snake-case name as used in unit-system maps.
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Time => "time",
            Dimension::Length => "length",
            Dimension::Mass => "mass",
            Dimension::Current => "current",
            Dimension::Substance => "substance",
            Dimension::Luminosity => "luminosity",
            Dimension::Temperature => "temperature",
            Dimension::Force => "force",
            Dimension::Pressure => "pressure",
            Dimension::Energy => "energy",
            Dimension::Power => "power",
            Dimension::Frequency => "frequency",
            Dimension::ElectricPotential => "electric_potential",
            Dimension::Capacitance => "capacitance",
            Dimension::Charge => "charge",
            Dimension::MagneticField => "magnetic_field",
            Dimension::MagneticFlux => "magnetic_flux",
            Dimension::MagneticDipole => "magnetic_dipole",
            Dimension::Inductance => "inductance",
            Dimension::Dimensionless => "dimensionless",
        }
    }

    /// Temperature is the only non-multiplicative dimension: its units
    /// differ by an additive offset as well as a factor.
    pub fn is_multiplicative(&self) -> bool {
        !matches!(self, Dimension::Temperature)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_are_snake_case() {
        let json = serde_json::to_string(&Dimension::ElectricPotential).unwrap();
        assert_eq!(json, "\"electric_potential\"");

        let parsed: Dimension = serde_json::from_str("\"magnetic_flux\"").unwrap();
        assert_eq!(parsed, Dimension::MagneticFlux);
    }

    #[test]
    fn test_display_matches_serde() {
        for dimension in Dimension::ALL {
            let json = serde_json::to_string(&dimension).unwrap();
            assert_eq!(json, format!("\"{}\"", dimension));
        }
    }

    #[test]
    fn test_only_temperature_is_non_multiplicative() {
        for dimension in Dimension::ALL {
            assert_eq!(
                dimension.is_multiplicative(),
                dimension != Dimension::Temperature
            );
        }
    }
}
