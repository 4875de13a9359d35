//! Core types for the cost sweep

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result};

/// Compute model being priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    /// Fixed-capacity virtual machine, billed per hour
    Vm,
    /// Pay-per-invocation function service
    Function,
}

impl Service {
    /// The service being compared against
    pub fn other(self) -> Service {
        match self {
            Service::Vm => Service::Function,
            Service::Function => Service::Vm,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Vm => write!(f, "VM"),
            Service::Function => write!(f, "Function"),
        }
    }
}

/// One point in the duration sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub average_job_duration_ms: u64,
    pub jobs_per_month: u64,
    pub cost: Option<f64>,        // Monthly cost in $, rounded to cents
    pub service: Option<Service>, // Set together with cost
}

impl Scenario {
    /// Unpriced scenario as emitted by the generator
    pub fn new(average_job_duration_ms: u64, jobs_per_month: u64) -> Self {
        Scenario {
            average_job_duration_ms,
            jobs_per_month,
            cost: None,
            service: None,
        }
    }

    /// Copy of this scenario with its cost populated for `service`
    pub fn priced(&self, service: Service, cost: f64) -> Self {
        Scenario {
            cost: Some(cost),
            service: Some(service),
            ..self.clone()
        }
    }

    pub fn is_priced(&self) -> bool {
        self.cost.is_some()
    }
}

/// Inclusive range of average job durations, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Largest number of durations a single sweep may cover
pub const MAX_SWEEP_LEN: u64 = 50_000_000;

impl DurationRange {
    /// The canonical sweep: 1 ms to 15 minutes
    pub const CANONICAL: DurationRange = DurationRange {
        start_ms: 1,
        end_ms: 900_000,
    };

    /// Create a range, rejecting zero durations, inverted bounds, and sweeps
    /// longer than [`MAX_SWEEP_LEN`]
    pub fn new(start_ms: u64, end_ms: u64) -> Result<Self> {
        if start_ms == 0 {
            return Err(CostError::invalid_input(
                "average job duration must be at least 1 ms",
            ));
        }
        if end_ms < start_ms {
            return Err(CostError::invalid_input(format!(
                "duration range is inverted: {}..={} ms",
                start_ms, end_ms
            )));
        }
        if end_ms - start_ms >= MAX_SWEEP_LEN {
            return Err(CostError::invalid_input(format!(
                "duration range {}..={} ms exceeds the {} scenario limit",
                start_ms, end_ms, MAX_SWEEP_LEN
            )));
        }
        Ok(DurationRange { start_ms, end_ms })
    }

    /// Number of durations covered; 0 for an inverted range
    pub fn len(&self) -> usize {
        self.end_ms
            .checked_sub(self.start_ms)
            .map_or(0, |span| span.saturating_add(1) as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> RangeInclusive<u64> {
        self.start_ms..=self.end_ms
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        DurationRange::CANONICAL
    }
}

/// Capacity of the VM that sets the implied monthly job volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmCapacity {
    pub vcpu_count: u32,
}

impl VmCapacity {
    pub fn new(vcpu_count: u32) -> Result<Self> {
        if vcpu_count == 0 {
            return Err(CostError::invalid_input("VM must have at least one vCPU"));
        }
        Ok(VmCapacity { vcpu_count })
    }
}

/// Unrounded function cost components for one workload
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCostBreakdown {
    pub compute_cost: f64,
    pub request_cost: f64,
    pub ephemeral_storage_cost: f64,
}

impl FunctionCostBreakdown {
    /// Sum of the components, rounded to cents
    pub fn total(&self) -> f64 {
        crate::pricing::round_cents(
            self.compute_cost + self.request_cost + self.ephemeral_storage_cost,
        )
    }
}
