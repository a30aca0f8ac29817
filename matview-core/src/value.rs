//! Numeric payloads
//!
//! Quantities arrive from the archive as either a bare number or an
//! arbitrarily deep, possibly jagged nesting of numbers (lattice vectors,
//! atom positions, band structures). `Payload` keeps that structure as-is:
//! there is no fixed rank, depth is discovered by inspecting the data.

use serde::{Deserialize, Serialize};

/// A scalar or an arbitrarily nested, possibly jagged array of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Scalar(f64),
    Array(Vec<Payload>),
}

impl Payload {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Payload::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Payload]> {
        match self {
            Payload::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Multiply every leaf by `factor`, preserving the nesting shape.
    pub fn scale(&self, factor: f64) -> Payload {
        self.map_leaves(&|x| x * factor)
    }

    /// Add `addend` to every leaf, preserving the nesting shape.
    ///
    /// Only meaningful for non-multiplicative conversions (temperature
    /// offsets); everything else is covered by [`Payload::scale`].
    pub fn shift(&self, addend: f64) -> Payload {
        self.map_leaves(&|x| x + addend)
    }

    fn map_leaves(&self, f: &dyn Fn(f64) -> f64) -> Payload {
        match self {
            Payload::Scalar(x) => Payload::Scalar(f(*x)),
            Payload::Array(items) => {
                Payload::Array(items.iter().map(|item| item.map_leaves(f)).collect())
            }
        }
    }
}

impl From<f64> for Payload {
    fn from(x: f64) -> Self {
        Payload::Scalar(x)
    }
}

impl From<Vec<f64>> for Payload {
    fn from(xs: Vec<f64>) -> Self {
        Payload::Array(xs.into_iter().map(Payload::Scalar).collect())
    }
}

impl From<Vec<Vec<f64>>> for Payload {
    fn from(xs: Vec<Vec<f64>>) -> Self {
        Payload::Array(xs.into_iter().map(Payload::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scale_scalar() {
        let value = Payload::from(2.5);
        assert_eq!(value.scale(4.0), Payload::from(10.0));
    }

    #[test]
    fn test_scale_jagged_array() {
        let value = Payload::from(vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]);
        let scaled = value.scale(10.0);
        assert_eq!(
            scaled,
            Payload::from(vec![vec![10.0, 20.0], vec![30.0, 40.0, 50.0]])
        );
    }

    #[test]
    fn test_shift_preserves_shape() {
        let value = Payload::Array(vec![
            Payload::from(vec![0.0]),
            Payload::from(1.0),
            Payload::Array(vec![Payload::Array(vec![Payload::from(2.0)])]),
        ]);
        let shifted = value.shift(-273.15);
        assert_eq!(
            shifted,
            Payload::Array(vec![
                Payload::from(vec![-273.15]),
                Payload::from(1.0 - 273.15),
                Payload::Array(vec![Payload::Array(vec![Payload::from(2.0 - 273.15)])]),
            ])
        );
    }

    #[test]
    fn test_scale_empty_array() {
        let value = Payload::Array(vec![]);
        assert_eq!(value.scale(3.0), Payload::Array(vec![]));
    }

    #[test]
    fn test_deserialize_nested_json() {
        let value: Payload = serde_json::from_value(json!([[1.0, 2.0], [3.0]])).unwrap();
        assert_eq!(value, Payload::from(vec![vec![1.0, 2.0], vec![3.0]]));

        let scalar: Payload = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(scalar, Payload::from(42.0));
    }
}
