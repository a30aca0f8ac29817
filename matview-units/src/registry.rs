//! Static unit registry and precomputed conversion tables
//!
//! Every unit is registered with its dimension, display strings and the
//! linear map taking it to the dimension's SI unit. From that the
//! constructor precomputes, per dimension, the complete pairwise
//! multiplier matrix (and, for temperature, the additive constant matrix),
//! so a conversion call is plain table lookups. The registry is built once
//! and read-only afterwards.

use crate::system::UnitSystem;
use crate::{ConvertError, Dimension};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Global unit registry
pub static REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// A registered unit: identity plus the linear map to its dimension's SI
/// unit (`value_si = value * si_factor + si_offset`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDef {
    /// Canonical name, e.g. "electron_volt"
    pub name: String,
    pub dimension: Dimension,
    /// Human-readable label, e.g. "Electron volt"
    pub label: String,
    /// Display abbreviation, e.g. "eV"
    pub abbreviation: String,
    pub si_factor: f64,
    /// Nonzero only for temperature units
    pub si_offset: f64,
}

impl UnitDef {
    fn new(
        name: &str,
        dimension: Dimension,
        label: &str,
        abbreviation: &str,
        si_factor: f64,
    ) -> Self {
        UnitDef {
            name: name.to_string(),
            dimension,
            label: label.to_string(),
            abbreviation: abbreviation.to_string(),
            si_factor,
            si_offset: 0.0,
        }
    }

    fn with_offset(
        name: &str,
        dimension: Dimension,
        label: &str,
        abbreviation: &str,
        si_factor: f64,
        si_offset: f64,
    ) -> Self {
        UnitDef {
            si_offset,
            ..UnitDef::new(name, dimension, label, abbreviation, si_factor)
        }
    }
}

/// Pairwise conversion data for one dimension.
#[derive(Debug, Clone, Default)]
struct ConversionTable {
    /// The dimension's canonical SI unit (factor 1, offset 0)
    si_unit: String,
    /// `multipliers[from][to]`
    multipliers: HashMap<String, HashMap<String, f64>>,
    /// `constants[from][to]`, present only where the offset is nonzero
    constants: HashMap<String, HashMap<String, f64>>,
}

/// Registry of all known units and their conversion tables
pub struct UnitRegistry {
    units: HashMap<String, UnitDef>,
    tables: HashMap<Dimension, ConversionTable>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            tables: HashMap::new(),
        };
        registry.register_base_units();
        registry.register_derived_units();
        registry.build_tables();
        registry
    }

    /// Look up a unit by name.
    pub fn get(&self, name: &str) -> Result<&UnitDef, ConvertError> {
        self.units
            .get(name)
            .ok_or_else(|| ConvertError::UnknownUnit(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// All unit names registered for a dimension.
    pub fn units_of(&self, dimension: Dimension) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .units
            .values()
            .filter(|unit| unit.dimension == dimension)
            .map(|unit| unit.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// The canonical SI unit of a dimension.
    pub fn si_unit(&self, dimension: Dimension) -> Option<&str> {
        self.tables
            .get(&dimension)
            .map(|table| table.si_unit.as_str())
    }

    /// Multiplicative factor taking `from` into `to` within `dimension`.
    pub fn multiplier(
        &self,
        dimension: Dimension,
        from: &str,
        to: &str,
    ) -> Result<f64, ConvertError> {
        self.tables
            .get(&dimension)
            .and_then(|table| table.multipliers.get(from))
            .and_then(|row| row.get(to))
            .copied()
            .ok_or_else(|| ConvertError::MissingFactor {
                dimension,
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Additive constant for a non-multiplicative pair; `None` where the
    /// conversion is a pure scaling.
    pub fn constant(&self, dimension: Dimension, from: &str, to: &str) -> Option<f64> {
        self.tables
            .get(&dimension)?
            .constants
            .get(from)?
            .get(to)
            .copied()
    }

    /// Check that a unit system maps each dimension it covers to one of
    /// that dimension's registered units.
    pub fn validate_system(&self, system: &UnitSystem) -> Result<(), ConvertError> {
        for (dimension, unit) in system.units() {
            let def = self.get(unit)?;
            if def.dimension != *dimension {
                return Err(ConvertError::MissingFactor {
                    dimension: *dimension,
                    from: unit.to_string(),
                    to: unit.to_string(),
                });
            }
        }
        Ok(())
    }

    fn register(&mut self, unit: UnitDef) {
        self.units.insert(unit.name.clone(), unit);
    }

    fn register_base_units(&mut self) {
        // Time
        self.register(UnitDef::new("second", Dimension::Time, "Second", "s", 1.0));
        self.register(UnitDef::new(
            "atomic_unit_of_time",
            Dimension::Time,
            "Atomic unit of time",
            "a_u_time",
            2.418_884_326_585_7e-17,
        ));
        // Length
        self.register(UnitDef::new("meter", Dimension::Length, "Meter", "m", 1.0));
        self.register(UnitDef::new(
            "bohr",
            Dimension::Length,
            "Bohr",
            "bohr",
            5.291_772_109_03e-11,
        ));
        self.register(UnitDef::new(
            "angstrom",
            Dimension::Length,
            "Ångstrom",
            "Å",
            1e-10,
        ));
        // Mass
        self.register(UnitDef::new(
            "kilogram",
            Dimension::Mass,
            "Kilogram",
            "kg",
            1.0,
        ));
        self.register(UnitDef::new(
            "electron_mass",
            Dimension::Mass,
            "Electron mass",
            "mₑ",
            9.109_383_701_5e-31,
        ));
        self.register(UnitDef::new(
            "unified_atomic_mass_unit",
            Dimension::Mass,
            "Unified atomic mass unit",
            "u",
            1.660_539_066_60e-27,
        ));
        // Current
        self.register(UnitDef::new(
            "ampere",
            Dimension::Current,
            "Ampere",
            "A",
            1.0,
        ));
        self.register(UnitDef::new(
            "atomic_unit_of_current",
            Dimension::Current,
            "Atomic unit of current",
            "a_u_current",
            6.623_618_237_510e-3,
        ));
        // Substance
        self.register(UnitDef::new(
            "mole",
            Dimension::Substance,
            "Mole",
            "mole",
            1.0,
        ));
        // Luminosity
        self.register(UnitDef::new(
            "candela",
            Dimension::Luminosity,
            "Candela",
            "cd",
            1.0,
        ));
        // Temperature. Celsius and Fahrenheit carry offsets; the atomic
        // unit of temperature is hartree over the Boltzmann constant.
        self.register(UnitDef::new(
            "kelvin",
            Dimension::Temperature,
            "Kelvin",
            "K",
            1.0,
        ));
        self.register(UnitDef::with_offset(
            "celsius",
            Dimension::Temperature,
            "Celsius",
            "°C",
            1.0,
            273.15,
        ));
        self.register(UnitDef::with_offset(
            "fahrenheit",
            Dimension::Temperature,
            "Fahrenheit",
            "°F",
            5.0 / 9.0,
            459.67 * 5.0 / 9.0,
        ));
        self.register(UnitDef::new(
            "atomic_unit_of_temperature",
            Dimension::Temperature,
            "Atomic unit of temperature",
            "a_u_temperature",
            3.157_750_248_040_7e5,
        ));
        // Dimensionless
        self.register(UnitDef::new(
            "dimensionless",
            Dimension::Dimensionless,
            "Dimensionless",
            "",
            1.0,
        ));
    }

    fn register_derived_units(&mut self) {
        // Force
        self.register(UnitDef::new("newton", Dimension::Force, "Newton", "N", 1.0));
        self.register(UnitDef::new(
            "atomic_unit_of_force",
            Dimension::Force,
            "Atomic unit of force",
            "a_u_force",
            8.238_723_498_3e-8,
        ));
        // Pressure
        self.register(UnitDef::new(
            "pascal",
            Dimension::Pressure,
            "Pascal",
            "Pa",
            1.0,
        ));
        self.register(UnitDef::new(
            "gigapascal",
            Dimension::Pressure,
            "Gigapascal",
            "GPa",
            1e9,
        ));
        self.register(UnitDef::new(
            "atomic_unit_of_pressure",
            Dimension::Pressure,
            "Atomic unit of pressure",
            "a_u_pressure",
            2.942_101_569_7e13,
        ));
        // Energy
        self.register(UnitDef::new("joule", Dimension::Energy, "Joule", "J", 1.0));
        self.register(UnitDef::new(
            "electron_volt",
            Dimension::Energy,
            "Electron volt",
            "eV",
            1.602_176_634e-19,
        ));
        self.register(UnitDef::new(
            "hartree",
            Dimension::Energy,
            "Hartree",
            "Ha",
            4.359_744_722_207_1e-18,
        ));
        // Power
        self.register(UnitDef::new("watt", Dimension::Power, "Watt", "W", 1.0));
        // Frequency
        self.register(UnitDef::new(
            "hertz",
            Dimension::Frequency,
            "Hertz",
            "Hz",
            1.0,
        ));
        // Electric potential
        self.register(UnitDef::new(
            "volt",
            Dimension::ElectricPotential,
            "Volt",
            "V",
            1.0,
        ));
        // Capacitance
        self.register(UnitDef::new(
            "farad",
            Dimension::Capacitance,
            "Farad",
            "F",
            1.0,
        ));
        // Charge
        self.register(UnitDef::new(
            "coulomb",
            Dimension::Charge,
            "Coulomb",
            "C",
            1.0,
        ));
        self.register(UnitDef::new(
            "elementary_charge",
            Dimension::Charge,
            "Elementary charge",
            "e",
            1.602_176_634e-19,
        ));
        // Magnetic field
        self.register(UnitDef::new(
            "tesla",
            Dimension::MagneticField,
            "Tesla",
            "T",
            1.0,
        ));
        // Magnetic flux
        self.register(UnitDef::new(
            "weber",
            Dimension::MagneticFlux,
            "Weber",
            "Wb",
            1.0,
        ));
        // Magnetic dipole
        self.register(UnitDef::new(
            "bohr_magneton",
            Dimension::MagneticDipole,
            "Bohr magneton",
            "Bm",
            9.274_010_078_3e-24,
        ));
        // Inductance
        self.register(UnitDef::new(
            "henry",
            Dimension::Inductance,
            "Henry",
            "H",
            1.0,
        ));
    }

    /// Precompute the pairwise matrices. Converting `from` into `to` goes
    /// through the SI unit: `a = f_from / f_to`, `b = (c_from - c_to) / f_to`,
    /// with `b` stored only when nonzero.
    fn build_tables(&mut self) {
        let mut tables: HashMap<Dimension, ConversionTable> = HashMap::new();
        for from in self.units.values() {
            let table = tables.entry(from.dimension).or_default();
            if from.si_factor == 1.0 && from.si_offset == 0.0 {
                table.si_unit = from.name.clone();
            }
            for to in self.units.values() {
                if to.dimension != from.dimension {
                    continue;
                }
                let a = from.si_factor / to.si_factor;
                let b = (from.si_offset - to.si_offset) / to.si_factor;
                table
                    .multipliers
                    .entry(from.name.clone())
                    .or_default()
                    .insert(to.name.clone(), a);
                if b != 0.0 {
                    table
                        .constants
                        .entry(from.name.clone())
                        .or_default()
                        .insert(to.name.clone(), b);
                }
            }
        }
        self.tables = tables;
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
