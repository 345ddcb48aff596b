//! Compiled-in rate tables and reference values

pub mod base_values;
pub mod rates;

pub use base_values::base_fob_value;
pub use rates::{RateTable, ServiceFees, RATES};
