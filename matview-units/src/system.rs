//! Unit systems
//!
//! A unit system maps each dimension to the unit it should be displayed
//! in. One system is active per conversion call and is supplied by the
//! caller (typically from user preference state); dimensions left out keep
//! their SI unit.

use crate::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-supplied mapping from dimension to preferred display unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub label: String,
    pub description: String,
    units: HashMap<Dimension, String>,
}

impl UnitSystem {
    pub fn empty(label: &str, description: &str) -> Self {
        UnitSystem {
            label: label.to_string(),
            description: description.to_string(),
            units: HashMap::new(),
        }
    }

    /// Builder: choose a unit for a dimension.
    pub fn with_unit(mut self, dimension: Dimension, unit: &str) -> Self {
        self.set_unit(dimension, unit);
        self
    }

    pub fn set_unit(&mut self, dimension: Dimension, unit: &str) {
        self.units.insert(dimension, unit.to_string());
    }

    /// The system's unit for a dimension, if it names one.
    pub fn unit_for(&self, dimension: Dimension) -> Option<&str> {
        self.units.get(&dimension).map(String::as_str)
    }

    pub fn units(&self) -> &HashMap<Dimension, String> {
        &self.units
    }

    /// International System of Units.
    pub fn si() -> Self {
        UnitSystem::empty("SI", "International System of Units (SI)")
            .with_unit(Dimension::Time, "second")
            .with_unit(Dimension::Length, "meter")
            .with_unit(Dimension::Mass, "kilogram")
            .with_unit(Dimension::Current, "ampere")
            .with_unit(Dimension::Substance, "mole")
            .with_unit(Dimension::Luminosity, "candela")
            .with_unit(Dimension::Temperature, "kelvin")
            .with_unit(Dimension::Force, "newton")
            .with_unit(Dimension::Pressure, "pascal")
            .with_unit(Dimension::Energy, "joule")
            .with_unit(Dimension::Power, "watt")
            .with_unit(Dimension::Frequency, "hertz")
            .with_unit(Dimension::ElectricPotential, "volt")
            .with_unit(Dimension::Charge, "coulomb")
    }

    /// Hartree atomic units.
    pub fn atomic() -> Self {
        UnitSystem::empty("Atomic units", "Hartree atomic units")
            .with_unit(Dimension::Time, "atomic_unit_of_time")
            .with_unit(Dimension::Length, "bohr")
            .with_unit(Dimension::Mass, "electron_mass")
            .with_unit(Dimension::Current, "atomic_unit_of_current")
            .with_unit(Dimension::Temperature, "atomic_unit_of_temperature")
            .with_unit(Dimension::Force, "atomic_unit_of_force")
            .with_unit(Dimension::Energy, "hartree")
            .with_unit(Dimension::Pressure, "atomic_unit_of_pressure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let system = UnitSystem::empty("Custom", "display lengths in ångström")
            .with_unit(Dimension::Length, "angstrom");
        assert_eq!(system.unit_for(Dimension::Length), Some("angstrom"));
        assert_eq!(system.unit_for(Dimension::Energy), None);
    }

    #[test]
    fn test_si_maps_each_dimension_to_itself() {
        let system = UnitSystem::si();
        assert_eq!(system.unit_for(Dimension::Temperature), Some("kelvin"));
        assert_eq!(system.unit_for(Dimension::Energy), Some("joule"));
    }

    #[test]
    fn test_serde_round_trip() {
        let system = UnitSystem::atomic();
        let json = serde_json::to_string(&system).unwrap();
        let back: UnitSystem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, system);
    }
}
