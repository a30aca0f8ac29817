//! SI display-unit conversion
//!
//! Values stored in the archive are SI-denominated. These functions turn
//! them into the caller's preferred unit system, scaling scalars or
//! arbitrarily nested arrays and rewriting the unit label to match. All
//! operations are pure: identical inputs yield identical outputs.

use crate::expr::{self, UnitExpr};
use crate::registry::{UnitDef, REGISTRY};
use crate::system::UnitSystem;
use crate::{ConvertError, Dimension};
use matview_core::Payload;
use std::collections::HashMap;

/// Convert `value`, denominated in the SI unit expression `unit`, into
/// `system`. Returns the converted payload together with the display
/// label, which is standardized against the system even when no scaling
/// was necessary.
pub fn convert_si(
    value: &Payload,
    unit: &str,
    system: &UnitSystem,
) -> Result<(Payload, String), ConvertError> {
    let (converted, label) = convert_inner(value, unit, system, true)?;
    Ok((converted, label.unwrap_or_default()))
}

/// Value-only variant of [`convert_si`].
pub fn convert_si_values(
    value: &Payload,
    unit: &str,
    system: &UnitSystem,
) -> Result<Payload, ConvertError> {
    let (converted, _) = convert_inner(value, unit, system, false)?;
    Ok(converted)
}

fn convert_inner(
    value: &Payload,
    unit: &str,
    system: &UnitSystem,
    want_label: bool,
) -> Result<(Payload, Option<String>), ConvertError> {
    let source = unit.replace("**", "^");
    let source = source.trim();

    // A lone temperature unit converts affinely. Temperature inside a
    // larger expression is a temperature range: the offset does not apply
    // there and the generic multiplicative path below handles it.
    if let Ok(def) = REGISTRY.get(source) {
        if def.dimension == Dimension::Temperature {
            return convert_temperature(value, def, system, want_label);
        }
    }

    let root = expr::parse_unit(source)?;

    // Resolve every symbol up front so an unknown unit aborts before any
    // numeric work. A dimension the system says nothing about keeps the
    // unit the expression already has.
    let mut targets: HashMap<String, (Dimension, String)> = HashMap::new();
    for name in root.symbols() {
        let def = REGISTRY.get(&name)?;
        let target = system
            .unit_for(def.dimension)
            .unwrap_or(name.as_str())
            .to_string();
        targets.insert(name, (def.dimension, target));
    }

    let needs_scaling = targets.iter().any(|(name, (_, target))| name != target);

    let converted = if needs_scaling {
        let mut scope = HashMap::with_capacity(targets.len());
        for (name, (dimension, target)) in &targets {
            scope.insert(name.clone(), REGISTRY.multiplier(*dimension, name, target)?);
        }
        let factor = root.evaluate(&scope)?;
        value.scale(factor)
    } else {
        value.clone()
    };

    let label = want_label.then(|| rewrite_label(&root, system));
    Ok((converted, label))
}

fn convert_temperature(
    value: &Payload,
    from: &UnitDef,
    system: &UnitSystem,
    want_label: bool,
) -> Result<(Payload, Option<String>), ConvertError> {
    let target = match system.unit_for(Dimension::Temperature) {
        Some(unit) => unit.to_string(),
        None => from.name.clone(),
    };
    let multiplier = REGISTRY.multiplier(Dimension::Temperature, &from.name, &target)?;
    let constant = REGISTRY.constant(Dimension::Temperature, &from.name, &target);

    let mut converted = if multiplier != 1.0 {
        value.scale(multiplier)
    } else {
        value.clone()
    };
    if let Some(constant) = constant {
        converted = converted.shift(constant);
    }

    let label = if want_label {
        Some(REGISTRY.get(&target)?.abbreviation.clone())
    } else {
        None
    };
    Ok((converted, label))
}

/// Rewrite a unit expression into the target system's display
/// abbreviations without touching any values. Symbols without a registry
/// entry pass through unchanged.
pub fn convert_si_label(unit: &str, system: &UnitSystem) -> Result<String, ConvertError> {
    let root = expr::parse_unit(unit)?;
    Ok(rewrite_label(&root, system))
}

/// Rewrite a unit expression to the target system's unit names (not
/// display abbreviations), so the result can denominate a follow-up
/// conversion.
pub fn relabel_si(unit: &str, system: &UnitSystem) -> Result<String, ConvertError> {
    let root = expr::parse_unit(unit)?;
    let mut names = HashMap::new();
    for name in root.symbols() {
        let def = REGISTRY.get(&name)?;
        if let Some(target) = system.unit_for(def.dimension) {
            names.insert(name, target.to_string());
        }
    }
    Ok(root.rename(&names).to_string())
}

fn rewrite_label(root: &UnitExpr, system: &UnitSystem) -> String {
    let mut names = HashMap::new();
    for name in root.symbols() {
        if let Ok(def) = REGISTRY.get(&name) {
            let target = system.unit_for(def.dimension).unwrap_or(name.as_str());
            if let Ok(target_def) = REGISTRY.get(target) {
                names.insert(name.clone(), target_def.abbreviation.clone());
            }
        }
    }
    root.rename(&names).to_string()
}
