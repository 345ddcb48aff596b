//! Calculation services

pub mod cost_engine;
pub mod market_compare;
pub mod value_estimator;

pub use cost_engine::compute_breakdown;
pub use market_compare::compare_with_local_market;
pub use value_estimator::estimate_fob_value;
