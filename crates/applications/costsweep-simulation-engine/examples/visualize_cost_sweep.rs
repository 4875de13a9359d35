//! Visualize VM vs. function monthly cost across the duration sweep
//!
//! Generates interactive HTML chart showing:
//! - Function cost falling as jobs get longer (fewer billable requests)
//! - The flat VM cost line
//! - Implied monthly job volume on a secondary axis
//!
//! Usage:
//!   cargo run --example visualize_cost_sweep
//!   Open visualizations/cost_sweep.html in browser

use plotly::{
    color::NamedColor,
    common::{AxisSide, DashType, Line, Mode},
    layout::{Axis, AxisType, HoverMode, Layout},
    Plot, Scatter,
};
use costsweep_simulation_engine::{CostSweep, DurationRange, PricingConstants, Scenario, Service};

// Every Nth scenario keeps the HTML small without losing the curve shape
const SAMPLE_EVERY: usize = 250;

fn main() -> anyhow::Result<()> {
    println!("🎨 Generating cost sweep visualization...");

    let sweep = CostSweep::new(PricingConstants::default());
    let (report, summary) = sweep.run(DurationRange::CANONICAL)?;

    let vm = report.scenarios(Service::Vm);
    let function = report.scenarios(Service::Function);
    println!("   Priced {} scenarios per service", function.len());

    let sampled = |scenarios: &[Scenario]| -> (Vec<u64>, Vec<f64>) {
        scenarios
            .iter()
            .step_by(SAMPLE_EVERY)
            .map(|s| (s.average_job_duration_ms, s.cost.unwrap_or_default()))
            .unzip()
    };
    let (durations, function_costs) = sampled(function);
    let (_, vm_costs) = sampled(vm);
    let jobs: Vec<u64> = function
        .iter()
        .step_by(SAMPLE_EVERY)
        .map(|s| s.jobs_per_month)
        .collect();

    let function_trace = Scatter::new(durations.clone(), function_costs)
        .name("Function ($/month)")
        .mode(Mode::Lines)
        .line(Line::new().color(NamedColor::OrangeRed).width(2.0));

    let vm_trace = Scatter::new(durations.clone(), vm_costs)
        .name("VM ($/month)")
        .mode(Mode::Lines)
        .line(
            Line::new()
                .color(NamedColor::Blue)
                .width(1.5)
                .dash(DashType::Dash),
        );

    let jobs_trace = Scatter::new(durations, jobs)
        .name("Jobs per month")
        .mode(Mode::Lines)
        .y_axis("y2")
        .line(Line::new().color(NamedColor::Gray).width(1.0));

    let mut plot = Plot::new();
    plot.add_trace(function_trace);
    plot.add_trace(vm_trace);
    plot.add_trace(jobs_trace);

    let layout = Layout::new()
        .title("Monthly cost: VM vs. function service")
        .x_axis(
            Axis::new()
                .title("Average job duration (ms)")
                .type_(AxisType::Log)
                .grid_color(NamedColor::LightGray),
        )
        .y_axis(
            Axis::new()
                .title("Monthly cost ($)")
                .type_(AxisType::Log)
                .grid_color(NamedColor::LightGray),
        )
        .y_axis2(
            Axis::new()
                .title("Jobs per month")
                .overlaying("y")
                .side(AxisSide::Right)
                .type_(AxisType::Log),
        )
        .hover_mode(HoverMode::X);

    plot.set_layout(layout);

    std::fs::create_dir_all("visualizations")?;
    let output_path = "visualizations/cost_sweep.html";
    plot.write_html(output_path);

    println!("✅ Visualization saved to {}", output_path);
    println!("\n📊 Key Observations:");
    println!(
        "   - Function: ${:.2} - ${:.2}/month",
        summary.function.extrema.min_cost(),
        summary.function.extrema.max_cost()
    );
    println!("   - VM: ${:.2}/month at every duration", summary.vm.extrema.min_cost());
    println!("   - Best-case gap: ${:.2}", summary.cost_delta);
    println!(
        "   - One-cent rounding spikes in function cost: {}",
        report.rounding_spikes(Service::Function).len()
    );
    println!("\n🌐 Open in browser:");
    println!("   firefox {} &", output_path);

    Ok(())
}
