//! # Gateway Normalizer
//!
//! Turns loosely formatted model replies into JSON values.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extract;

pub use extract::{extract, extract_as, extract_object, value_type};
