//! Pricing tables and free-tier thresholds for both services
//!
//! Defaults describe a two-vCPU ARM nano VM and a 512 MB function with the
//! standard monthly free tier. A partial JSON file can override any field;
//! missing fields keep their default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result};

/// Hours billed per day for an always-on VM
pub const HOURS_PER_DAY: f64 = 24.0;

/// Days in the billing month
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Milliseconds in the 30-day billing month
pub const MILLISECONDS_PER_MONTH: f64 = HOURS_PER_DAY * DAYS_PER_MONTH * 3600.0 * 1000.0;

/// MB → GB (1 / 1024)
pub const MB_TO_GB: f64 = 0.0009765625;

/// ms → s
pub const MS_TO_SECONDS: f64 = 0.001;

/// Fixed-capacity virtual machine pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmPricing {
    /// On-demand price ($/hr)
    pub hourly_price: f64,
    /// vCPUs available to run jobs in parallel
    pub vcpu_count: u32,
}

impl Default for VmPricing {
    fn default() -> Self {
        VmPricing {
            hourly_price: 0.0042,
            vcpu_count: 2,
        }
    }
}

/// Pay-per-invocation function pricing, including its free tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionPricing {
    pub request_price: f64,              // $ per request
    pub execution_price_per_gb_sec: f64, // $ per GB-second
    pub memory_mb: f64,
    pub ephemeral_storage_mb: f64,
    pub ephemeral_storage_price_per_gb_sec: f64,

    // Monthly free tier
    pub free_compute_gb_sec: f64,
    pub free_requests: u64,
    pub free_ephemeral_storage_gb: f64,
}

impl Default for FunctionPricing {
    fn default() -> Self {
        FunctionPricing {
            request_price: 0.0000002,
            execution_price_per_gb_sec: 0.0000166667,
            memory_mb: 512.0,
            ephemeral_storage_mb: 512.0,
            ephemeral_storage_price_per_gb_sec: 0.0000000309,
            free_compute_gb_sec: 400_000.0,
            free_requests: 1_000_000,
            free_ephemeral_storage_gb: 0.5,
        }
    }
}

/// Both pricing tables, loaded once per run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConstants {
    pub vm: VmPricing,
    pub function: FunctionPricing,
}

impl PricingConstants {
    /// Load pricing overrides from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse pricing overrides from JSON text
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let pricing: PricingConstants = serde_json::from_str(raw)?;
        pricing.validate()?;
        Ok(pricing)
    }

    /// Reject negative or non-finite prices, sizes, and free-tier allowances
    pub fn validate(&self) -> Result<()> {
        let vm = &self.vm;
        let f = &self.function;
        let fields = [
            ("vm.hourly_price", vm.hourly_price),
            ("function.request_price", f.request_price),
            ("function.execution_price_per_gb_sec", f.execution_price_per_gb_sec),
            ("function.memory_mb", f.memory_mb),
            ("function.ephemeral_storage_mb", f.ephemeral_storage_mb),
            (
                "function.ephemeral_storage_price_per_gb_sec",
                f.ephemeral_storage_price_per_gb_sec,
            ),
            ("function.free_compute_gb_sec", f.free_compute_gb_sec),
            ("function.free_ephemeral_storage_gb", f.free_ephemeral_storage_gb),
        ];

        match fields
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(CostError::invalid_input(format!(
                "{} must be a non-negative number, got {}",
                name, value
            ))),
            None => Ok(()),
        }
    }
}

/// Usage beyond a free-tier allowance, never negative
pub fn free_tier_excess(consumed: f64, free_tier: f64) -> f64 {
    (consumed - free_tier).max(0.0)
}

/// Round a dollar amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
