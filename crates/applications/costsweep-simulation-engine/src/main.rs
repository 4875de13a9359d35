//! Costsweep Simulation Engine CLI
//!
//! Command-line interface for comparing VM and function-service monthly cost
//! across a sweep of average job durations.
//!
//! ```bash
//! # Canonical sweep: 1 ms to 15 min, two-vCPU nano VM vs. 512 MB function
//! costsweep-sim
//!
//! # Override prices from a file, then bump the VM price on top
//! costsweep-sim --pricing pricing.json --vm-hourly-price 0.0084 --output summary.json
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use costsweep_simulation_engine::{
    report::{ComparisonSummary, ServiceSummary},
    CostSweep, DurationRange, PricingConstants,
};

#[derive(Parser, Debug)]
#[command(name = "costsweep-sim")]
#[command(about = "Compare VM and function-service monthly cost over a job duration sweep", long_about = None)]
struct Args {
    /// Shortest average job duration (ms)
    #[arg(long, default_value_t = 1)]
    min_duration_ms: u64,

    /// Longest average job duration (ms)
    #[arg(long, default_value_t = 900_000)]
    max_duration_ms: u64,

    /// JSON file with pricing overrides (missing fields keep defaults)
    #[arg(long)]
    pricing: Option<PathBuf>,

    /// VM on-demand price ($/hr)
    #[arg(long)]
    vm_hourly_price: Option<f64>,

    /// VM vCPU count
    #[arg(long)]
    vcpus: Option<u32>,

    /// Function memory allocation (MB)
    #[arg(long)]
    memory_mb: Option<f64>,

    /// Function ephemeral storage allocation (MB)
    #[arg(long)]
    ephemeral_storage_mb: Option<f64>,

    /// Output JSON file path (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include every priced scenario in the JSON output
    #[arg(long, requires = "output")]
    scenarios: bool,
}

impl Args {
    /// Defaults, then the pricing file, then individual flags
    fn pricing(&self) -> anyhow::Result<PricingConstants> {
        let mut pricing = match &self.pricing {
            Some(path) => PricingConstants::from_json_file(path)
                .with_context(|| format!("failed to load pricing from {}", path.display()))?,
            None => PricingConstants::default(),
        };

        if let Some(price) = self.vm_hourly_price {
            pricing.vm.hourly_price = price;
        }
        if let Some(vcpus) = self.vcpus {
            pricing.vm.vcpu_count = vcpus;
        }
        if let Some(mb) = self.memory_mb {
            pricing.function.memory_mb = mb;
        }
        if let Some(mb) = self.ephemeral_storage_mb {
            pricing.function.ephemeral_storage_mb = mb;
        }
        Ok(pricing)
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "costsweep_simulation_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let pricing = args.pricing()?;
    let range = DurationRange::new(args.min_duration_ms, args.max_duration_ms)?;

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  Costsweep: VM vs. Function Service                      ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    println!("Configuration:");
    println!("  Durations: {} - {} ms ({} scenarios)", range.start_ms, range.end_ms, range.len());
    println!("  VM: ${}/hr, {} vCPU", pricing.vm.hourly_price, pricing.vm.vcpu_count);
    println!(
        "  Function: {} MB memory, {} MB ephemeral storage\n",
        pricing.function.memory_mb, pricing.function.ephemeral_storage_mb
    );

    let sweep = CostSweep::new(pricing);
    info!(scenarios = range.len(), "running sweep");
    let result = sweep.run_detailed(range)?;

    print_summary(&result.summary);

    if let Some(output_path) = &args.output {
        println!("\nWriting results to {}...", output_path.display());
        let json = if args.scenarios {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string_pretty(&result.summary)?
        };
        fs::write(output_path, json)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!("  Results saved");
    }

    println!("\n✅ Sweep complete!\n");
    Ok(())
}

fn print_summary(summary: &ComparisonSummary) {
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  Comparison Results                                      ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    println!(
        "{:<10} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Service", "Min ($)", "At (ms)", "Max ($)", "At (ms)", "Tied min"
    );
    println!("{}", "-".repeat(75));
    print_service_row(&summary.vm);
    print_service_row(&summary.function);
    println!("{}", "-".repeat(75));

    println!(
        "\nCost delta (function min - VM min): ${:.2}",
        summary.cost_delta
    );
    match summary.percentage_savings {
        Some(pct) => println!(
            "{} is cheaper at its best: {:.1}% less than {}",
            summary.cheaper_service,
            pct,
            summary.cheaper_service.other()
        ),
        None => println!("Both services are free at their best; savings undefined"),
    }

    match summary.crossovers.first() {
        Some(c) => println!(
            "First crossover at {} ms ({} crossovers total)",
            c.average_job_duration_ms,
            summary.crossovers.len()
        ),
        None => println!(
            "No crossover: {} is never more expensive",
            summary.cheaper_service
        ),
    }
}

fn print_service_row(row: &ServiceSummary) {
    println!(
        "{:<10} {:>12.2} {:>12} {:>12.2} {:>12} {:>12}",
        row.service.to_string(),
        row.extrema.min_cost(),
        row.extrema.cheapest.average_job_duration_ms,
        row.extrema.max_cost(),
        row.extrema.most_expensive.average_job_duration_ms,
        row.tied_minimum_count,
    );
}
