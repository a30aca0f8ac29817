//! Conversion errors
//!
//! All three kinds propagate to the caller synchronously; nothing is
//! swallowed and no partial conversion is ever returned. Missing table
//! entries are configuration defects, not runtime conditions.

use crate::Dimension;
use thiserror::Error;

/// Error type for unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A symbol in a unit expression has no registry entry
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// The unit expression is not well-formed algebra
    #[error("malformed unit expression: {0}")]
    Parse(String),

    /// The conversion table lacks an entry for a unit pair
    #[error("no conversion factor for {dimension}: {from} -> {to}")]
    MissingFactor {
        dimension: Dimension,
        from: String,
        to: String,
    },
}
