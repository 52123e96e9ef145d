use clap::{Parser, Subcommand};
use pn_app::{
    AppError, AppResult, NetworkReport, SweepRange, SweepReport, case_service, compile_case,
    run_sweep,
};
use pn_components::Fitting;
use pn_core::units::to_m3ph;
use pn_fluids::FluidTable;
use pn_project::schema::CaseFile;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pn-cli")]
#[command(about = "PumpNet CLI - pumped pipe network head loss and energy cost", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fluid table and the fittings catalog
    Fluids {
        /// Only show fluids whose id, name or alias contains this text
        query: Option<String>,
    },
    /// Validate case file syntax and structure
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Evaluate head loss, flow split and energy cost
    Evaluate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sweep a diameter scale range and report annual cost per point
    Sweep {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Lowest scale in percent (overrides the case file)
        #[arg(long)]
        low: Option<f64>,
        /// Highest scale in percent (overrides the case file)
        #[arg(long)]
        high: Option<f64>,
        /// Step in percentage points (overrides the case file)
        #[arg(long)]
        step: Option<f64>,
        /// Print the sweep as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the starting example case
    Example {
        /// Output path; `.json` selects JSON, anything else YAML
        out: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fluids { query } => cmd_fluids(query.as_deref()),
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Evaluate { case_path, json } => cmd_evaluate(&case_path, json),
        Commands::Sweep {
            case_path,
            low,
            high,
            step,
            json,
        } => cmd_sweep(&case_path, low, high, step, json),
        Commands::Example { out } => cmd_example(&out),
    }
}

fn cmd_fluids(query: Option<&str>) -> AppResult<()> {
    let entries = match query {
        Some(q) => FluidTable::search(q),
        None => FluidTable::entries().to_vec(),
    };

    println!("Fluids:");
    if entries.is_empty() {
        println!("  (no match)");
    }
    for entry in &entries {
        println!(
            "  {:<12} {:<20} rho = {:>7.1} kg/m³  nu = {:.3e} m²/s  aliases: {}",
            entry.canonical_id,
            entry.display_name,
            entry.density_kg_m3,
            entry.kinematic_viscosity_m2_s,
            entry.aliases.join(", ")
        );
    }
    println!("Fittings:");
    for fitting in Fitting::ALL {
        println!("  {:<26} K = {:.2}", fitting.id(), fitting.k());
    }
    Ok(())
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    // Compiling also resolves the fluid and fitting ids
    compile_case(&case)?;

    let summary = case_service::summarize_case(&case);
    println!("✓ Case is valid: {}", summary.name);
    println!("  Fluid: {}", summary.fluid);
    println!("  Flow: {:.2} m³/h", summary.flow_m3h);
    println!(
        "  Segments: {} pre, {} in {} branches, {} post",
        summary.pre_segments, summary.branch_segments, summary.branch_count, summary.post_segments
    );
    Ok(())
}

fn cmd_evaluate(case_path: &Path, json: bool) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let runtime = compile_case(&case)?;
    let report = runtime.evaluator.evaluate(&runtime.network)?;

    if json {
        return print_json(&report.summary());
    }

    println!("Case: {} ({})", runtime.name, runtime.fluid_id);
    print_report(&report);
    Ok(())
}

fn cmd_sweep(
    case_path: &Path,
    low: Option<f64>,
    high: Option<f64>,
    step: Option<f64>,
    json: bool,
) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let runtime = compile_case(&case)?;

    let range = SweepRange {
        low_percent: low.unwrap_or(runtime.sweep.low_percent),
        high_percent: high.unwrap_or(runtime.sweep.high_percent),
        step_percent: step.unwrap_or(runtime.sweep.step_percent),
    };
    tracing::debug!(?range, "sweep range resolved");
    let sweep = run_sweep(&runtime.network, &runtime.evaluator, &range)?;

    if json {
        return print_json(&sweep);
    }

    println!("Case: {} ({})", runtime.name, runtime.fluid_id);
    print_sweep(&sweep);
    Ok(())
}

fn cmd_example(out: &Path) -> AppResult<()> {
    case_service::save_case(out, &CaseFile::example())?;
    println!("✓ Example case written to {}", out.display());
    Ok(())
}

fn print_report(report: &NetworkReport) {
    println!("  Manometric head:  {:>10.2} m", report.manometric_head_m());
    println!("  Total head loss:  {:>10.2} m", report.total_loss_m());
    println!("    pre-split:      {:>10.2} m", report.pre_loss_m());
    println!("    parallel:       {:>10.2} m", report.parallel_loss_m());
    println!("    post-join:      {:>10.2} m", report.post_loss_m());
    println!("  Fitting heads:    {:>10.2} m (not included)", report.minor_head_m());
    println!("  Electrical power: {:>10.2} kW", report.energy.power_kw());
    println!("  Annual cost:      {:>10.2}", report.energy.annual_cost);

    if !report.branches.is_empty() {
        println!("Branch flows ({} iterations):", report.parallel.iterations);
        for branch in &report.branches {
            println!(
                "  {:<16} {:>9.2} m³/h  {:>8.3} m",
                branch.name,
                to_m3ph(branch.flow),
                branch.head_loss
            );
        }
    }

    println!("Segments:");
    for seg in &report.segments {
        println!(
            "  {:<22} {:>9.2} m³/h  v = {:>6.2} m/s  hf = {:>8.3} m  hm = {:>6.3} m",
            seg.location.to_string(),
            to_m3ph(seg.flow),
            seg.loss.velocity.value,
            seg.loss.friction_head,
            seg.loss.minor_head
        );
    }

    if !report.degenerate.is_empty() {
        println!("⚠ Non-positive diameter (penalty head applied):");
        for location in &report.degenerate {
            println!("  {}", location);
        }
    }
}

fn print_sweep(sweep: &SweepReport) {
    println!("  {:>8}  {:>12}  {:>14}", "scale %", "head (m)", "annual cost");
    for point in &sweep.points {
        match (point.manometric_head_m, point.annual_cost) {
            (Some(head), Some(cost)) => {
                println!("  {:>8.1}  {:>12.2}  {:>14.2}", point.scale_percent, head, cost)
            }
            _ => println!(
                "  {:>8.1}  {:>12}  {:>14}  {}",
                point.scale_percent,
                "-",
                "failed",
                point.failure.as_deref().unwrap_or("")
            ),
        }
    }
    println!(
        "✓ {} points evaluated, {} failed",
        sweep.num_successful, sweep.num_failed
    );
    if let Some(best) = sweep.cheapest() {
        println!("  Cheapest scale: {:.1} %", best.scale_percent);
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Case(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
