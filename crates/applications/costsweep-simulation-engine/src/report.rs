//! Comparison of priced VM and function scenarios
//!
//! Extrema use first-encountered tie-breaking, so with a flat VM cost the
//! cheapest and most expensive VM scenarios are both the shortest duration.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CostError, Result};
use crate::types::{Scenario, Service};

/// Tolerance for comparing rounded cent values
const CENT_EPSILON: f64 = 1e-9;

/// Cheapest and most expensive scenario for one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostExtrema {
    pub cheapest: Scenario,
    pub most_expensive: Scenario,
}

impl CostExtrema {
    pub fn min_cost(&self) -> f64 {
        self.cheapest.cost.unwrap_or_default()
    }

    pub fn max_cost(&self) -> f64 {
        self.most_expensive.cost.unwrap_or_default()
    }
}

/// Per-service part of the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub service: Service,
    pub extrema: CostExtrema,
    pub tied_minimum_count: usize,
}

/// Duration at which the cheaper service changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossover {
    pub average_job_duration_ms: u64,
    pub cheaper_before: Option<Service>, // None when both cost the same
    pub cheaper_after: Option<Service>,
}

/// Summary of a full comparison, suitable for console or JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub vm: ServiceSummary,
    pub function: ServiceSummary,
    /// Cheapest function cost minus cheapest VM cost
    pub cost_delta: f64,
    /// Service with the lower best-case monthly cost
    pub cheaper_service: Service,
    /// Saving of the cheaper service's best case over the other's, in percent
    pub percentage_savings: Option<f64>,
    pub crossovers: Vec<Crossover>,
}

/// VM and function scenarios priced over the same sweep
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    vm: Vec<Scenario>,
    function: Vec<Scenario>,
}

impl ComparisonReport {
    /// Build a report from both priced sequences
    ///
    /// Every scenario must be priced, and the two sequences must cover the
    /// same durations in the same order.
    pub fn new(vm: Vec<Scenario>, function: Vec<Scenario>) -> Result<Self> {
        check_priced(&vm, Service::Vm)?;
        check_priced(&function, Service::Function)?;

        if vm.len() != function.len() {
            return Err(CostError::invalid_input(format!(
                "sweeps differ in length: {} VM vs {} function scenarios",
                vm.len(),
                function.len()
            )));
        }
        if let Some((a, b)) = vm
            .iter()
            .zip(&function)
            .find(|(a, b)| a.average_job_duration_ms != b.average_job_duration_ms)
        {
            return Err(CostError::invalid_input(format!(
                "sweeps are misaligned: {} ms (VM) vs {} ms (function)",
                a.average_job_duration_ms, b.average_job_duration_ms
            )));
        }

        Ok(ComparisonReport { vm, function })
    }

    pub fn scenarios(&self, service: Service) -> &[Scenario] {
        match service {
            Service::Vm => &self.vm,
            Service::Function => &self.function,
        }
    }

    /// Cheapest and most expensive scenario; ties go to the earliest
    pub fn extrema_for(&self, service: Service) -> Result<CostExtrema> {
        let scenarios = self.scenarios(service);
        let first = scenarios.first().ok_or_else(|| {
            CostError::invalid_input(format!("no {} scenarios to compare", service))
        })?;

        let mut cheapest = first;
        let mut most_expensive = first;
        for scenario in &scenarios[1..] {
            let cost = cost_of(scenario);
            if cost < cost_of(cheapest) {
                cheapest = scenario;
            }
            if cost > cost_of(most_expensive) {
                most_expensive = scenario;
            }
        }

        Ok(CostExtrema {
            cheapest: cheapest.clone(),
            most_expensive: most_expensive.clone(),
        })
    }

    /// Number of scenarios sharing the minimum cost
    pub fn count_tied_minimum(&self, service: Service) -> Result<usize> {
        let min = self.extrema_for(service)?.min_cost();
        Ok(self
            .scenarios(service)
            .iter()
            .filter(|s| cost_of(s) == min)
            .count())
    }

    /// Minimum cost of `a` minus minimum cost of `b`
    pub fn cost_delta(&self, a: Service, b: Service) -> Result<f64> {
        Ok(self.extrema_for(a)?.min_cost() - self.extrema_for(b)?.min_cost())
    }

    /// Durations at which the cheaper service changes, in sweep order
    pub fn crossovers(&self) -> Vec<Crossover> {
        let cheaper: Vec<Option<Service>> = self
            .vm
            .iter()
            .zip(&self.function)
            .map(|(vm, function)| cheaper_of(cost_of(vm), cost_of(function)))
            .collect();

        cheaper
            .windows(2)
            .zip(&self.vm[1..])
            .filter(|(pair, _)| pair[0] != pair[1])
            .map(|(pair, scenario)| Crossover {
                average_job_duration_ms: scenario.average_job_duration_ms,
                cheaper_before: pair[0],
                cheaper_after: pair[1],
            })
            .collect()
    }

    /// First crossover, if the cheaper service ever changes
    pub fn crossover(&self) -> Option<Crossover> {
        self.crossovers().into_iter().next()
    }

    /// Isolated one-cent blips whose neighbours agree with each other
    ///
    /// These come from rounding the derived job volume and are expected noise.
    pub fn rounding_spikes(&self, service: Service) -> Vec<Scenario> {
        self.scenarios(service)
            .windows(3)
            .filter(|w| {
                let (prev, cur, next) = (cost_of(&w[0]), cost_of(&w[1]), cost_of(&w[2]));
                (prev - next).abs() < CENT_EPSILON
                    && (cur - prev).abs() > CENT_EPSILON
                    && (cur - prev).abs() <= 0.01 + CENT_EPSILON
            })
            .map(|w| w[1].clone())
            .collect()
    }

    /// Assemble the full summary
    pub fn summary(&self) -> Result<ComparisonSummary> {
        let vm = self.service_summary(Service::Vm)?;
        let function = self.service_summary(Service::Function)?;

        let cost_delta = self.cost_delta(Service::Function, Service::Vm)?;
        let (cheaper_service, cheap, expensive) = if function.extrema.min_cost() < vm.extrema.min_cost() {
            (Service::Function, function.extrema.min_cost(), vm.extrema.min_cost())
        } else {
            (Service::Vm, vm.extrema.min_cost(), function.extrema.min_cost())
        };
        let percentage_savings = match percentage_savings(expensive, cheap) {
            Ok(pct) => Some(pct),
            Err(e) => {
                warn!("savings not reported: {}", e);
                None
            }
        };

        Ok(ComparisonSummary {
            vm,
            function,
            cost_delta,
            cheaper_service,
            percentage_savings,
            crossovers: self.crossovers(),
        })
    }

    fn service_summary(&self, service: Service) -> Result<ServiceSummary> {
        Ok(ServiceSummary {
            service,
            extrema: self.extrema_for(service)?,
            tied_minimum_count: self.count_tied_minimum(service)?,
        })
    }
}

/// Saving of `cheap` relative to `expensive`, in percent
pub fn percentage_savings(expensive: f64, cheap: f64) -> Result<f64> {
    if expensive == 0.0 {
        return Err(CostError::undefined(
            "percentage savings relative to a zero cost",
        ));
    }
    Ok((expensive - cheap) / expensive * 100.0)
}

fn check_priced(scenarios: &[Scenario], service: Service) -> Result<()> {
    if scenarios.is_empty() {
        return Err(CostError::invalid_input(format!(
            "no {} scenarios to compare",
            service
        )));
    }
    match scenarios
        .iter()
        .find(|s| s.cost.is_none() || s.service != Some(service))
    {
        Some(s) => Err(CostError::invalid_input(format!(
            "{} ms scenario is not priced for {}",
            s.average_job_duration_ms, service
        ))),
        None => Ok(()),
    }
}

// Checked by `check_priced` on construction
fn cost_of(scenario: &Scenario) -> f64 {
    scenario.cost.unwrap_or_default()
}

fn cheaper_of(vm: f64, function: f64) -> Option<Service> {
    if function < vm {
        Some(Service::Function)
    } else if vm < function {
        Some(Service::Vm)
    } else {
        None
    }
}
