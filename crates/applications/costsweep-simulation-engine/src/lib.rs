//! Costsweep Simulation Engine
//!
//! Monthly cost sweep of an always-on VM against a pay-per-invocation
//! function service, over a range of average job durations.

pub mod error;
pub mod pricing;
pub mod types;
pub mod cost_models;
pub mod scenarios;
pub mod report;
pub mod sweep;

pub use error::{CostError, Result};
pub use pricing::PricingConstants;
pub use sweep::{CostSweep, SweepResult};
pub use types::{DurationRange, Scenario, Service};
