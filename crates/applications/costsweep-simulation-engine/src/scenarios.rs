//! Scenario generation over a sweep of average job durations
//!
//! For each duration the generator derives how many jobs the VM could run in
//! a month if every vCPU stayed busy. That volume is what the function
//! service would have to absorb to do the same work.

use tracing::info;

use crate::error::Result;
use crate::pricing::MILLISECONDS_PER_MONTH;
use crate::types::{DurationRange, Scenario, VmCapacity};

/// Generates unpriced scenarios for a VM of fixed capacity
#[derive(Debug, Clone, Copy)]
pub struct ScenarioGenerator {
    capacity: VmCapacity,
}

impl ScenarioGenerator {
    pub fn new(capacity: VmCapacity) -> Self {
        ScenarioGenerator { capacity }
    }

    /// Jobs the VM completes in a month at `duration_ms` per job
    pub fn jobs_per_month(&self, duration_ms: u64) -> u64 {
        (MILLISECONDS_PER_MONTH / duration_ms as f64 * self.capacity.vcpu_count as f64).round()
            as u64
    }

    /// One scenario per duration in `range`, ascending
    pub fn generate(&self, range: DurationRange) -> Result<Vec<Scenario>> {
        // Re-validate: fields are public
        let range = DurationRange::new(range.start_ms, range.end_ms)?;

        let scenarios: Vec<Scenario> = range
            .iter()
            .map(|d| Scenario::new(d, self.jobs_per_month(d)))
            .collect();

        info!(
            start_ms = range.start_ms,
            end_ms = range.end_ms,
            vcpus = self.capacity.vcpu_count,
            count = scenarios.len(),
            "generated scenarios"
        );
        Ok(scenarios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CostError;

    fn generator() -> ScenarioGenerator {
        ScenarioGenerator::new(VmCapacity::new(2).unwrap())
    }

    #[test]
    fn test_jobs_per_month_endpoints() {
        let generator = generator();
        assert_eq!(generator.jobs_per_month(1), 5_184_000_000);
        assert_eq!(generator.jobs_per_month(900_000), 5_760);
    }

    #[test]
    fn test_jobs_scale_with_vcpus() {
        let single = ScenarioGenerator::new(VmCapacity::new(1).unwrap());
        assert_eq!(single.jobs_per_month(1_000), 2_592_000);
        assert_eq!(generator().jobs_per_month(1_000), 5_184_000);
    }

    #[test]
    fn test_generate_ordered_and_unpriced() {
        let scenarios = generator().generate(DurationRange::new(1, 1_000).unwrap()).unwrap();

        assert_eq!(scenarios.len(), 1_000);
        assert_eq!(scenarios.first().unwrap().average_job_duration_ms, 1);
        assert_eq!(scenarios.last().unwrap().average_job_duration_ms, 1_000);
        assert!(scenarios.iter().all(|s| s.cost.is_none() && s.service.is_none()));
    }

    #[test]
    fn test_jobs_per_month_monotonic() {
        let scenarios = generator().generate(DurationRange::new(1, 50_000).unwrap()).unwrap();

        for pair in scenarios.windows(2) {
            assert!(
                pair[0].jobs_per_month >= pair[1].jobs_per_month,
                "{} ms: {} jobs, {} ms: {} jobs",
                pair[0].average_job_duration_ms,
                pair[0].jobs_per_month,
                pair[1].average_job_duration_ms,
                pair[1].jobs_per_month,
            );
        }
    }

    #[test]
    fn test_generate_is_repeatable() {
        let range = DurationRange::new(100, 5_000).unwrap();
        let first = generator().generate(range).unwrap();
        let second = generator().generate(range).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_rejects_zero_duration() {
        let range = DurationRange {
            start_ms: 0,
            end_ms: 10,
        };
        assert!(matches!(generator().generate(range), Err(CostError::InvalidInput(_))));
    }
}
