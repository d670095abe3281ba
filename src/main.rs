//! Job Search CLI
//!
//! Solves every worker type under both UI policies and writes the time
//! paths, per-policy aggregates and a duration summary.

use anyhow::{Context, Result};
use clap::Parser;
use job_search::{
    outcomes::PolicyComparison,
    scenario::{PairResult, PolicyAggregate},
    search::EffortCorner,
    PolicyId, ScenarioRunner, ZeroExitPolicy, ZeroMassPolicy,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "job_search", version, about = "Finite-horizon job search under time-varying UI benefits")]
struct Cli {
    /// JSON scenario config (parameters, worker types, solver settings)
    #[arg(long, conflicts_with = "workers")]
    config: Option<PathBuf>,

    /// CSV of worker types, combined with the default parameters
    #[arg(long)]
    workers: Option<PathBuf>,

    /// Override the number of weeks solved
    #[arg(long)]
    horizon: Option<usize>,

    /// Directory for the CSV and JSON outputs
    #[arg(long, default_value = "output")]
    out_dir: PathBuf,

    /// Fall back to equal population shares once nobody is left unemployed
    #[arg(long, default_value_t = false)]
    even_split: bool,

    /// Repeat the previous aggregate wage in weeks without exits
    #[arg(long, default_value_t = false)]
    carry_forward: bool,

    /// Print the summary as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct PathRow {
    week: usize,
    benefit: f64,
    reservation_wage: f64,
    effort: f64,
    value: f64,
    reemployment_wage: f64,
    hazard: f64,
    survival: f64,
    corner: Option<EffortCorner>,
}

#[derive(Serialize)]
struct SteadyStateSummary {
    worker: String,
    reservation_wage: f64,
    effort: f64,
    benefit: f64,
    residual: f64,
    iterations: usize,
}

#[derive(Serialize)]
struct RunSummary {
    horizon: usize,
    steady_states: Vec<SteadyStateSummary>,
    durations: Vec<PolicyComparison>,
    corner_weeks: usize,
    execution_time_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let mut runner = match (&cli.config, &cli.workers) {
        (Some(path), _) => ScenarioRunner::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        (None, Some(path)) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("loading worker types {}", path.display()))?,
        (None, None) => ScenarioRunner::new(),
    };
    if let Some(horizon) = cli.horizon {
        runner.assumptions_mut().solver.horizon = horizon;
    }
    if cli.even_split {
        runner = runner.with_zero_mass_policy(ZeroMassPolicy::EvenSplit);
    }
    if cli.carry_forward {
        runner = runner.with_zero_exit_policy(ZeroExitPolicy::CarryForward);
    }

    let result = runner.run().context("solving scenario")?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    for pair in &result.pairs {
        write_path_csv(&cli.out_dir, pair)?;
    }
    for aggregate in &result.policies {
        write_aggregate_csv(&cli.out_dir, aggregate)?;
    }

    let summary = RunSummary {
        horizon: result.horizon,
        steady_states: result
            .pairs
            .iter()
            .filter(|p| p.policy == PolicyId::ALL[0])
            .map(|p| SteadyStateSummary {
                worker: p.worker.clone(),
                reservation_wage: p.steady_state.reservation_wage,
                effort: p.steady_state.effort,
                benefit: p.steady_state.benefit,
                residual: p.steady_state.residual,
                iterations: p.steady_state.iterations,
            })
            .collect(),
        durations: result.comparisons.clone(),
        corner_weeks: result.pairs.iter().map(|p| p.path.corner_weeks().len()).sum(),
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    let summary_path = cli.out_dir.join("summary.json");
    let file = fs::File::create(&summary_path)
        .with_context(|| format!("creating {}", summary_path.display()))?;
    serde_json::to_writer_pretty(file, &summary)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Job Search v0.1.0");
    println!("=================\n");
    println!("Expected unemployment duration (weeks, horizon {}):", result.horizon);
    println!("{:<12} {:>16} {:>16} {:>10}", "Worker", "UI - 104 weeks", "UI - 52 weeks", "Change");
    println!("{}", "-".repeat(57));
    for cmp in &result.comparisons {
        println!(
            "{:<12} {:>16.2} {:>16.2} {:>9.1}%",
            cmp.worker,
            cmp.baseline_duration,
            cmp.reform_duration,
            100.0 * cmp.relative_change
        );
    }
    if summary.corner_weeks > 0 {
        println!("\n{} week(s) with effort at a corner", summary.corner_weeks);
    }
    println!("\nResults written to: {} ({:?})", cli.out_dir.display(), start.elapsed());

    Ok(())
}

fn write_path_csv(dir: &Path, pair: &PairResult) -> Result<()> {
    let path = dir.join(format!("path_{}_{}.csv", pair.worker, pair.policy.slug()));
    let mut writer = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;

    let p = &pair.path;
    for week in 0..p.weeks() {
        writer.serialize(PathRow {
            week,
            benefit: pair.benefit_policy.benefit(week),
            reservation_wage: p.reservation_wage()[week],
            effort: p.effort()[week],
            value: p.value()[week],
            reemployment_wage: p.reemployment_wage()[week],
            hazard: pair.outcomes.hazard[week],
            survival: pair.outcomes.survival[week],
            corner: p.corners()[week],
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_aggregate_csv(dir: &Path, aggregate: &PolicyAggregate) -> Result<()> {
    let path = dir.join(format!("aggregate_{}.csv", aggregate.policy.slug()));
    let mut writer = csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Week".to_string()];
    header.extend(aggregate.workers.iter().map(|w| format!("Share_{w}")));
    header.push("AggregateReemploymentWage".to_string());
    writer.write_record(&header)?;

    // Shares run one week past the wage series; the last row leaves it blank
    let weeks = aggregate.shares.first().map_or(0, Vec::len);
    for week in 0..weeks {
        let mut record = vec![week.to_string()];
        record.extend(aggregate.shares.iter().map(|s| format!("{:.10}", s[week])));
        record.push(
            aggregate
                .aggregate_wage
                .get(week)
                .map(|w| format!("{w:.8}"))
                .unwrap_or_default(),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
