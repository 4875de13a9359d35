//! Full 1 ms - 15 min sweep with the default prices

use costsweep_simulation_engine::{
    report::percentage_savings, CostSweep, DurationRange, PricingConstants, Service,
};

#[test]
fn test_canonical_sweep() {
    let sweep = CostSweep::new(PricingConstants::default());
    let (report, summary) = sweep.run(DurationRange::CANONICAL).unwrap();

    let vm = report.scenarios(Service::Vm);
    let function = report.scenarios(Service::Function);
    assert_eq!(vm.len(), 900_000);
    assert_eq!(function.len(), 900_000);

    // Endpoints of the sweep
    assert_eq!(function[0].jobs_per_month, 5_184_000_000);
    assert!((function[0].cost.unwrap() - 1073.13).abs() < 0.015);
    assert_eq!(function[899_999].jobs_per_month, 5_760);
    assert!((function[899_999].cost.unwrap() - 36.53).abs() < 0.015);

    // Flat VM cost: every scenario ties, first one wins
    assert_eq!(summary.vm.extrema.min_cost(), 3.02);
    assert_eq!(summary.vm.extrema.max_cost(), 3.02);
    assert_eq!(summary.vm.extrema.cheapest.average_job_duration_ms, 1);
    assert_eq!(summary.vm.tied_minimum_count, 900_000);

    // Function is never cheaper than the VM here
    assert_eq!(summary.cheaper_service, Service::Vm);
    assert!(summary.crossovers.is_empty());
    assert!((summary.cost_delta - 33.51).abs() < 0.015, "delta {}", summary.cost_delta);
    // Below ~5,184 ms the request fee keeps costs above the floor; the
    // first duration to reach $36.53 wins the tie
    assert_eq!(summary.function.extrema.min_cost(), 36.53);
    assert_eq!(summary.function.extrema.cheapest.average_job_duration_ms, 5_144);
    assert_eq!(summary.function.tied_minimum_count, 799_695);
    assert_eq!(summary.function.extrema.most_expensive.average_job_duration_ms, 1);

    let pct = summary.percentage_savings.unwrap();
    assert!((pct - 91.7).abs() < 0.1, "savings {}", pct);
}

#[test]
fn test_canonical_jobs_monotonic_and_costs_non_negative() {
    let sweep = CostSweep::new(PricingConstants::default());
    let (report, _) = sweep.run(DurationRange::CANONICAL).unwrap();
    let function = report.scenarios(Service::Function);

    assert!(function.windows(2).all(|w| w[0].jobs_per_month >= w[1].jobs_per_month));
    assert!(function.iter().all(|s| s.cost.unwrap() >= 0.0));
}

#[test]
fn test_savings_of_reported_extremes() {
    let pct = percentage_savings(36.53, 3.02).unwrap();
    assert!((pct - 91.7).abs() < 0.05);
}
