//! Monthly cost models for the two compute options
//!
//! - VM: flat hourly price, independent of the workload
//! - Function: per-request fee plus GB-second execution and ephemeral storage
//!   charges, each after the monthly free tier

use tracing::debug;

use crate::error::{CostError, Result};
use crate::pricing::{
    free_tier_excess, round_cents, FunctionPricing, VmPricing, DAYS_PER_MONTH, HOURS_PER_DAY,
    MB_TO_GB, MS_TO_SECONDS,
};
use crate::types::{FunctionCostBreakdown, Scenario, Service};

/// Cost model trait
pub trait CostModel {
    /// Service this model prices
    fn service(&self) -> Service;

    /// Monthly cost of one scenario, rounded to cents
    fn scenario_cost(&self, scenario: &Scenario) -> Result<f64>;

    /// Price every scenario, returning populated copies in the same order
    fn price(&self, scenarios: &[Scenario]) -> Result<Vec<Scenario>> {
        let service = self.service();
        let priced = scenarios
            .iter()
            .map(|s| self.scenario_cost(s).map(|cost| s.priced(service, cost)))
            .collect::<Result<Vec<_>>>()?;

        debug!(%service, count = priced.len(), "priced scenarios");
        Ok(priced)
    }
}

/// Always-on virtual machine
#[derive(Debug, Clone)]
pub struct VmCostModel {
    pricing: VmPricing,
}

impl VmCostModel {
    pub fn new(pricing: VmPricing) -> Self {
        VmCostModel { pricing }
    }

    /// Monthly cost of running the VM around the clock
    pub fn monthly_cost(&self) -> f64 {
        round_cents(self.pricing.hourly_price * HOURS_PER_DAY * DAYS_PER_MONTH)
    }
}

impl CostModel for VmCostModel {
    fn service(&self) -> Service {
        Service::Vm
    }

    fn scenario_cost(&self, _scenario: &Scenario) -> Result<f64> {
        // Capacity is paid for whether or not jobs use it
        Ok(self.monthly_cost())
    }
}

/// Pay-per-invocation function service
#[derive(Debug, Clone)]
pub struct FunctionCostModel {
    pricing: FunctionPricing,
}

impl FunctionCostModel {
    pub fn new(pricing: FunctionPricing) -> Self {
        FunctionCostModel { pricing }
    }

    /// Cost components for a month of `requests_per_month` invocations
    /// averaging `avg_duration_ms` each
    ///
    /// Free-tier deductions never push a component below zero. A workload
    /// with no requests or zero-length jobs costs nothing.
    pub fn breakdown(
        &self,
        requests_per_month: u64,
        avg_duration_ms: f64,
    ) -> Result<FunctionCostBreakdown> {
        if !avg_duration_ms.is_finite() || avg_duration_ms < 0.0 {
            return Err(CostError::invalid_input(format!(
                "average duration must be a non-negative number of ms, got {}",
                avg_duration_ms
            )));
        }

        // No work done, nothing billed (request fees included)
        if requests_per_month == 0 || avg_duration_ms == 0.0 {
            return Ok(FunctionCostBreakdown::default());
        }

        let p = &self.pricing;
        let requests = requests_per_month as f64;
        let compute_seconds = requests * avg_duration_ms * MS_TO_SECONDS;

        let memory_gb = p.memory_mb * MB_TO_GB;
        let billable_gb_sec = free_tier_excess(memory_gb * compute_seconds, p.free_compute_gb_sec);
        let compute_cost = billable_gb_sec * p.execution_price_per_gb_sec;

        let billable_requests = free_tier_excess(requests, p.free_requests as f64);
        let request_cost = billable_requests * p.request_price;

        let ephemeral_gb = p.ephemeral_storage_mb * MB_TO_GB;
        let billable_ephemeral_gb = free_tier_excess(ephemeral_gb, p.free_ephemeral_storage_gb);
        let ephemeral_storage_cost =
            billable_ephemeral_gb * compute_seconds * p.ephemeral_storage_price_per_gb_sec;

        Ok(FunctionCostBreakdown {
            compute_cost,
            request_cost,
            ephemeral_storage_cost,
        })
    }

    /// Monthly cost, rounded to cents
    pub fn monthly_cost(&self, requests_per_month: u64, avg_duration_ms: f64) -> Result<f64> {
        Ok(self.breakdown(requests_per_month, avg_duration_ms)?.total())
    }
}

impl CostModel for FunctionCostModel {
    fn service(&self) -> Service {
        Service::Function
    }

    fn scenario_cost(&self, scenario: &Scenario) -> Result<f64> {
        self.monthly_cost(
            scenario.jobs_per_month,
            scenario.average_job_duration_ms as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function_model() -> FunctionCostModel {
        FunctionCostModel::new(FunctionPricing::default())
    }

    #[test]
    fn test_vm_monthly_cost() {
        let model = VmCostModel::new(VmPricing::default());
        assert_eq!(model.monthly_cost(), 3.02);
    }

    #[test]
    fn test_vm_cost_ignores_workload() {
        let model = VmCostModel::new(VmPricing::default());
        let short = model.scenario_cost(&Scenario::new(1, 5_184_000_000)).unwrap();
        let long = model.scenario_cost(&Scenario::new(900_000, 5_760)).unwrap();
        assert_eq!(short, long);
        assert_eq!(short, model.monthly_cost());
    }

    #[test]
    fn test_function_cost_one_ms_jobs() {
        let cost = function_model().monthly_cost(5_184_000_000, 1.0).unwrap();
        assert!((cost - 1073.13).abs() < 0.015, "got {}", cost);
    }

    #[test]
    fn test_function_cost_fifteen_minute_jobs() {
        let cost = function_model().monthly_cost(5_760, 900_000.0).unwrap();
        assert!((cost - 36.53).abs() < 0.015, "got {}", cost);
    }

    #[test]
    fn test_function_cost_zero_inputs() {
        let model = function_model();
        assert_eq!(model.monthly_cost(0, 250.0).unwrap(), 0.0);
        assert_eq!(model.monthly_cost(1_000_000_000, 0.0).unwrap(), 0.0);
        assert_eq!(model.monthly_cost(0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_function_cost_within_free_tier() {
        // 1M requests * 100 ms * 0.5 GB = 50,000 GB-s, all free
        let cost = function_model().monthly_cost(1_000_000, 100.0).unwrap();
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn test_function_cost_non_negative() {
        let model = function_model();
        for requests in [0, 1, 999_999, 1_000_000, 1_000_001, 5_184_000_000] {
            for duration in [0.0, 0.5, 1.0, 100.0, 5_184.0, 900_000.0] {
                let cost = model.monthly_cost(requests, duration).unwrap();
                assert!(cost >= 0.0, "{} requests @ {} ms cost {}", requests, duration, cost);
            }
        }
    }

    #[test]
    fn test_function_cost_rejects_bad_duration() {
        let model = function_model();
        assert!(matches!(model.monthly_cost(10, -1.0), Err(CostError::InvalidInput(_))));
        assert!(matches!(model.monthly_cost(10, f64::NAN), Err(CostError::InvalidInput(_))));
    }

    #[test]
    fn test_breakdown_components() {
        let breakdown = function_model().breakdown(5_184_000_000, 1.0).unwrap();

        // (5.184e9 - 1e6) * $0.20 per million
        assert!((breakdown.request_cost - 1036.6).abs() < 1e-6);
        // (0.5 GB * 5.184e6 s - 400,000) * $0.0000166667
        assert!((breakdown.compute_cost - 36.5334064).abs() < 1e-4);
        // 512 MB ephemeral storage is inside the free tier
        assert_eq!(breakdown.ephemeral_storage_cost, 0.0);
    }

    #[test]
    fn test_ephemeral_storage_beyond_free_tier() {
        let model = FunctionCostModel::new(FunctionPricing {
            ephemeral_storage_mb: 10_240.0,
            ..FunctionPricing::default()
        });
        let breakdown = model.breakdown(1_000, 1_000.0).unwrap();

        // 9.5 GB billable * 1,000 s * $0.0000000309
        assert!((breakdown.ephemeral_storage_cost - 9.5 * 1_000.0 * 0.0000000309).abs() < 1e-12);
    }

    #[test]
    fn test_price_populates_scenarios() {
        let scenarios = vec![Scenario::new(1, 5_184_000_000), Scenario::new(900_000, 5_760)];
        let priced = function_model().price(&scenarios).unwrap();

        assert_eq!(priced.len(), 2);
        assert!(priced.iter().all(|s| s.service == Some(Service::Function)));
        assert_eq!(priced[0].average_job_duration_ms, 1);
        assert!((priced[1].cost.unwrap() - 36.53).abs() < 0.015);
    }
}
