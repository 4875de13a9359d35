//! End-to-end sweep: generate → price (VM) → price (function) → compare
//!
//! Each stage receives the previous stage's output explicitly; nothing is
//! shared between runs.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cost_models::{CostModel, FunctionCostModel, VmCostModel};
use crate::error::Result;
use crate::pricing::PricingConstants;
use crate::report::{ComparisonReport, ComparisonSummary};
use crate::scenarios::ScenarioGenerator;
use crate::types::{DurationRange, Scenario, Service, VmCapacity};

/// Result of a sweep run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub range: DurationRange,
    pub pricing: PricingConstants,
    pub summary: ComparisonSummary,
    pub vm_scenarios: Vec<Scenario>,
    pub function_scenarios: Vec<Scenario>,
}

/// Runs the full comparison for one set of prices
#[derive(Debug, Clone)]
pub struct CostSweep {
    pricing: PricingConstants,
}

impl CostSweep {
    pub fn new(pricing: PricingConstants) -> Self {
        CostSweep { pricing }
    }

    pub fn pricing(&self) -> &PricingConstants {
        &self.pricing
    }

    /// Price both services over `range` and build the comparison
    pub fn run(&self, range: DurationRange) -> Result<(ComparisonReport, ComparisonSummary)> {
        self.pricing.validate()?;
        let capacity = VmCapacity::new(self.pricing.vm.vcpu_count)?;
        let scenarios = ScenarioGenerator::new(capacity).generate(range)?;

        let vm_model = VmCostModel::new(self.pricing.vm.clone());
        let vm_scenarios = vm_model.price(&scenarios)?;
        info!(monthly_cost = vm_model.monthly_cost(), "priced VM scenarios");

        let function_scenarios = FunctionCostModel::new(self.pricing.function.clone()).price(&scenarios)?;
        info!(count = function_scenarios.len(), "priced function scenarios");

        let report = ComparisonReport::new(vm_scenarios, function_scenarios)?;
        let summary = report.summary()?;

        let spikes = report.rounding_spikes(Service::Function);
        if !spikes.is_empty() {
            warn!(
                count = spikes.len(),
                first_ms = spikes[0].average_job_duration_ms,
                "one-cent rounding spikes in function costs"
            );
        }
        debug!(?summary, "comparison complete");

        Ok((report, summary))
    }

    /// Like [`CostSweep::run`], keeping every priced scenario for output
    pub fn run_detailed(&self, range: DurationRange) -> Result<SweepResult> {
        let (report, summary) = self.run(range)?;
        Ok(SweepResult {
            range,
            pricing: self.pricing.clone(),
            summary,
            vm_scenarios: report.scenarios(Service::Vm).to_vec(),
            function_scenarios: report.scenarios(Service::Function).to_vec(),
        })
    }
}
