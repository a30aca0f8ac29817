//! Matview Core - Fundamental types
//!
//! This crate provides the value types shared across Matview:
//! - `Payload`: a scalar or an arbitrarily nested numeric array

mod value;

pub use value::Payload;
