//! Paperbot CLI — simulation, trend analysis, and fixture commands.
//!
//! Commands:
//! - `run` — execute a paper-trading simulation from a TOML config file
//! - `trend` — detect regimes and turning points in a price CSV
//! - `synth` — write a synthetic price CSV fixture

mod config;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use paperbot_core::data::{load_bars, synthetic, write_curve, AlignedSeries};
use paperbot_core::engine::{run, RunResult, SimConfig};
use paperbot_core::trend::{ExtremumKind, Trend, TrendDetector, TrendSignal};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::RunConfig;

#[derive(Parser)]
#[command(
    name = "paperbot",
    about = "Paperbot CLI — paper-trading simulation engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a simulation from a TOML config file.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Output directory for equity.csv and baseline.csv.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Detect regimes and turning points in a price CSV.
    Trend {
        /// Price CSV (date,open,high,low,close,adj_close,volume).
        csv: PathBuf,

        /// Smoothing window = series length / this divisor.
        #[arg(long, default_value_t = 5)]
        window_divisor: usize,

        /// Reversal debounce distance = series length / this divisor.
        #[arg(long, default_value_t = 15)]
        distance_divisor: usize,
    },
    /// Write a synthetic price CSV fixture.
    Synth {
        /// Shape: sine, linear, or walk.
        #[arg(long, default_value = "sine")]
        shape: String,

        /// Number of bars.
        #[arg(long, default_value_t = 300)]
        len: usize,

        /// First bar date (YYYY-MM-DD).
        #[arg(long, default_value = "2020-01-02")]
        start: String,

        /// Random seed (walk only).
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output CSV path.
        #[arg(long, default_value = "synthetic.csv")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output_dir } => run_sim_cmd(&config, &output_dir),
        Commands::Trend {
            csv,
            window_divisor,
            distance_divisor,
        } => run_trend_cmd(&csv, window_divisor, distance_divisor),
        Commands::Synth {
            shape,
            len,
            start,
            seed,
            out,
        } => run_synth_cmd(&shape, len, &start, seed, &out),
    }
}

fn run_sim_cmd(config_path: &Path, output_dir: &Path) -> Result<()> {
    let run_config = RunConfig::from_file(config_path)?;

    let mut universe = std::collections::HashMap::new();
    for (symbol, csv_path) in &run_config.instruments {
        let bars = load_bars(csv_path)
            .with_context(|| format!("loading bars for {symbol}"))?;
        universe.insert(symbol.clone(), bars);
    }
    let series = AlignedSeries::align(universe)?;

    let mut strategy = run_config.build_strategy()?;
    let sim_config = SimConfig {
        initial_capital: run_config.backtest.initial_capital,
        commission_rate: run_config.backtest.commission_rate,
        sample_policy: run_config.backtest.sample_policy,
    };

    let result = run(&series, strategy.as_mut(), &sim_config)?;

    print_summary(&series, &sim_config, &result);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory '{}'", output_dir.display()))?;
    write_curve(output_dir.join("equity.csv"), "worth", &result.equity_curve)?;
    write_curve(
        output_dir.join("baseline.csv"),
        "worth",
        &result.baseline_curve,
    )?;
    save_manifest(&series, &sim_config, &result, output_dir)?;
    println!("Artifacts saved to: {}", output_dir.display());

    Ok(())
}

/// Run metadata written next to the curves.
#[derive(Serialize)]
struct Manifest {
    symbols: Vec<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    bar_count: usize,
    orders_applied: usize,
    initial_capital: f64,
    commission_rate: f64,
    final_worth: f64,
    fees_paid: f64,
}

fn save_manifest(
    series: &AlignedSeries,
    config: &SimConfig,
    result: &RunResult,
    output_dir: &Path,
) -> Result<()> {
    let manifest = Manifest {
        symbols: series.symbols.clone(),
        start_date: series.dates.first().copied(),
        end_date: series.dates.last().copied(),
        bar_count: result.bar_count,
        orders_applied: result.orders_applied,
        initial_capital: config.initial_capital,
        commission_rate: config.commission_rate,
        final_worth: result.final_worth,
        fees_paid: result.fees_paid,
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(output_dir.join("manifest.json"), json)
        .context("writing manifest.json")?;
    Ok(())
}

fn run_trend_cmd(csv_path: &Path, window_divisor: usize, distance_divisor: usize) -> Result<()> {
    if window_divisor == 0 || distance_divisor == 0 {
        bail!("divisors must be >= 1");
    }

    let bars = load_bars(csv_path)?;
    let detector = TrendDetector::new(window_divisor, distance_divisor);
    let signal = detector.detect_bars(&bars)?;

    print_trend(&bars, &signal);
    Ok(())
}

fn run_synth_cmd(shape: &str, len: usize, start: &str, seed: u64, out: &Path) -> Result<()> {
    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("invalid start date '{start}'"))?;

    let bars = match shape {
        "sine" => synthetic::sine_series(start_date, len, 100.0, 20.0, 4.0),
        "linear" => synthetic::linear_series(start_date, len, 50.0, 150.0),
        "walk" => synthetic::random_walk(start_date, len, 100.0, 0.0005, 0.02, seed),
        other => bail!("unknown shape '{other}'. Valid: sine, linear, walk"),
    };

    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("opening '{}'", out.display()))?;
    for bar in &bars {
        writer.serialize(bar)?;
    }
    writer.flush()?;

    println!("Wrote {len} bars ({shape}) to: {}", out.display());
    Ok(())
}

fn print_summary(series: &AlignedSeries, config: &SimConfig, result: &RunResult) {
    println!();
    println!("=== Simulation Result ===");
    println!("Symbols:        {}", series.symbols.join(" "));
    if let (Some(first), Some(last)) = (series.dates.first(), series.dates.last()) {
        println!("Period:         {first} to {last}");
    }
    println!("Bars:           {}", result.bar_count);
    println!("Orders:         {}", result.orders_applied);
    println!();
    println!("--- Performance ---");
    println!("Initial:        {:.2}", config.initial_capital);
    println!("Final Worth:    {:.2}", result.final_worth);
    println!(
        "Return:         {:.2}%",
        (result.final_worth / config.initial_capital - 1.0) * 100.0
    );
    println!("Fees Paid:      {:.2}", result.fees_paid);
    println!("Cash:           {:.2}", result.portfolio.cash);
    if let Some(baseline_final) = result.baseline_curve.last() {
        println!("Baseline Worth: {baseline_final:.2}");
    }
    println!();
}

fn print_trend(bars: &[paperbot_core::domain::Bar], signal: &TrendSignal) {
    println!();
    println!("=== Trend Analysis ===");
    println!("Samples:        {}", signal.regimes.len());
    println!("Turning points: {}", signal.turning_points.len());
    println!();

    for point in &signal.turning_points {
        let kind = match point.kind {
            ExtremumKind::Maximum => "max",
            ExtremumKind::Minimum => "min",
        };
        println!(
            "  {}  {}  (index {})",
            bars[point.index].date, kind, point.index
        );
    }

    println!();
    println!("--- Regimes ---");
    let mut start = 0;
    for i in 1..=signal.regimes.len() {
        if i == signal.regimes.len() || signal.regimes[i] != signal.regimes[i - 1] {
            let label = match signal.regimes[start] {
                Trend::Up => "Up",
                Trend::Down => "Down",
            };
            println!(
                "  {} to {}  {label}",
                bars[start].date,
                bars[i - 1].date
            );
            start = i;
        }
    }
    println!();
}
