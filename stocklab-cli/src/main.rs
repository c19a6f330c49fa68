//! StockLab CLI — analysis, backtesting, and data utility commands.
//!
//! Commands:
//! - `analyze` — generate signals, pair trades, and score strategy suitability
//! - `backtest` — run a backtest from a TOML config and write artifacts
//! - `sweep` — run a parameter grid in parallel and rank the results
//! - `resonance` — compare the latest signal across timeframes
//! - `synth` — generate a synthetic random-walk bar file
//!
//! Bars are read from CSV with columns `date,time,open,high,low,close,volume`
//! (empty `time` for daily series). All analysis output is JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stocklab_core::backtest::{run_backtest, BacktestConfig, BacktestResult};
use stocklab_core::data::random_walk;
use stocklab_core::domain::PriceBar;
use stocklab_core::indicators::{compute_frames, FrameParams};
use stocklab_core::signal::{analyze_resonance, generate_signals, pair_trades, TimeframeSignal};
use stocklab_core::suitability::{score_scalping, score_swing};

#[derive(Parser)]
#[command(name = "stocklab", about = "StockLab CLI — signal and backtest engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate signals, pair trades, and score suitability for one series.
    Analyze {
        /// Bar CSV file.
        #[arg(long)]
        input: PathBuf,

        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run a backtest and write result artifacts.
    Backtest {
        /// Bar CSV file.
        #[arg(long)]
        input: PathBuf,

        /// TOML config file. Defaults apply for missing keys; omit the flag
        /// entirely to run with the default config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for result.json, equity.csv, trades.csv.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Run a position-size × take-profit grid in parallel, ranked by return.
    Sweep {
        /// Bar CSV file.
        #[arg(long)]
        input: PathBuf,

        /// Base TOML config the grid is layered over.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compare the latest signal across timeframes of one instrument.
    Resonance {
        /// Timeframe inputs as `name=path.csv` (repeat up to four times).
        #[arg(long = "input", required = true)]
        inputs: Vec<String>,
    },
    /// Generate a synthetic random-walk bar CSV.
    Synth {
        /// Number of bars.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// RNG seed (same seed, same series).
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Starting price.
        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        /// Output CSV file.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, output } => run_analyze(&input, output.as_deref()),
        Commands::Backtest {
            input,
            config,
            output_dir,
        } => run_backtest_cmd(&input, config.as_deref(), &output_dir),
        Commands::Sweep { input, config } => run_sweep(&input, config.as_deref()),
        Commands::Resonance { inputs } => run_resonance(&inputs),
        Commands::Synth {
            bars,
            seed,
            start_price,
            output,
        } => run_synth(bars, seed, start_price, &output),
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Serialize)]
struct AnalyzeReport {
    bars: usize,
    signals: Vec<stocklab_core::domain::PairedSignal>,
    scalping: stocklab_core::suitability::StyleAssessment,
    swing: stocklab_core::suitability::StyleAssessment,
}

fn run_analyze(input: &Path, output: Option<&Path>) -> Result<()> {
    let bars = load_bars(input)?;
    let frames = compute_frames(&bars, &FrameParams::default());
    let signals = generate_signals(&frames);
    let paired = pair_trades(&signals);

    let last_frame = frames
        .last()
        .with_context(|| format!("{} contains no bars", input.display()))?;

    let report = AnalyzeReport {
        bars: bars.len(),
        signals: paired,
        scalping: score_scalping(&bars, last_frame),
        swing: score_swing(&bars, last_frame),
    };

    emit_json(&report, output)
}

fn run_backtest_cmd(input: &Path, config_path: Option<&Path>, output_dir: &Path) -> Result<()> {
    let bars = load_bars(input)?;
    let config = load_config(config_path)?;

    let result = run_backtest(&bars, &config);
    info!(
        trades = result.total_trades,
        total_return = result.total_return,
        "backtest finished"
    );

    write_artifacts(&result, output_dir)?;
    println!(
        "final capital {:.2} ({:+.2}% total, {} trades, win rate {:.0}%) → {}",
        result.final_capital,
        result.total_return * 100.0,
        result.total_trades,
        result.win_rate * 100.0,
        output_dir.display()
    );
    Ok(())
}

#[derive(Serialize)]
struct SweepRow {
    position_size: f64,
    take_profit: f64,
    total_return: f64,
    max_drawdown: f64,
    sharpe_ratio: f64,
    total_trades: usize,
}

fn run_sweep(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let bars = load_bars(input)?;
    let base = load_config(config_path)?;

    let position_sizes = [0.2, 0.4, 0.6, 0.8, 1.0];
    let take_profits = [0.03, 0.05, 0.08, 0.10, 0.15];

    let grid: Vec<BacktestConfig> = position_sizes
        .iter()
        .flat_map(|&position_size| {
            let base = base.clone();
            take_profits.iter().map(move |&take_profit| BacktestConfig {
                position_size,
                take_profit,
                ..base.clone()
            })
        })
        .collect();

    // Each run owns its state; the grid parallelizes cleanly.
    let mut rows: Vec<SweepRow> = grid
        .par_iter()
        .map(|config| {
            let result = run_backtest(&bars, config);
            SweepRow {
                position_size: config.position_size,
                take_profit: config.take_profit,
                total_return: result.total_return,
                max_drawdown: result.max_drawdown,
                sharpe_ratio: result.sharpe_ratio,
                total_trades: result.total_trades,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total_return.total_cmp(&a.total_return));

    println!("pos_size  take_profit  return%   max_dd%   sharpe  trades");
    for row in &rows {
        println!(
            "{:>8.2}  {:>11.2}  {:>7.2}  {:>8.2}  {:>6.2}  {:>6}",
            row.position_size,
            row.take_profit,
            row.total_return * 100.0,
            row.max_drawdown * 100.0,
            row.sharpe_ratio,
            row.total_trades
        );
    }
    Ok(())
}

fn run_resonance(inputs: &[String]) -> Result<()> {
    let mut latest = Vec::new();
    for spec in inputs {
        let (timeframe, path) = parse_tagged(spec)?;
        let bars = load_bars(&path)?;
        let frames = compute_frames(&bars, &FrameParams::default());
        let signal = generate_signals(&frames).into_iter().last();
        latest.push(TimeframeSignal { timeframe, signal });
    }

    let analysis = analyze_resonance(&latest);
    emit_json(&analysis, None)
}

fn run_synth(bars: usize, seed: u64, start_price: f64, output: &Path) -> Result<()> {
    let series = random_walk(seed, bars, start_price);
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("cannot create {}", output.display()))?;
    for bar in &series {
        writer.serialize(bar)?;
    }
    writer.flush()?;
    println!("wrote {} bars to {}", series.len(), output.display());
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────────────

fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let mut bars = Vec::new();
    for record in reader.deserialize() {
        let bar: PriceBar = record.with_context(|| format!("bad bar in {}", path.display()))?;
        bars.push(bar);
    }
    if bars.is_empty() {
        bail!("{} contains no bars", path.display());
    }
    Ok(bars)
}

fn load_config(path: Option<&Path>) -> Result<BacktestConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("bad config {}", path.display()))?
        }
        None => BacktestConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn write_artifacts(result: &BacktestResult, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    let json = serde_json::to_string_pretty(result)?;
    fs::write(output_dir.join("result.json"), json)?;

    let mut equity = csv::Writer::from_path(output_dir.join("equity.csv"))?;
    for point in &result.equity_curve {
        equity.serialize(point)?;
    }
    equity.flush()?;

    let mut trades = csv::Writer::from_path(output_dir.join("trades.csv"))?;
    for trade in &result.trades {
        trades.serialize(trade)?;
    }
    trades.flush()?;

    Ok(())
}

fn emit_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Parse a `name=path` argument.
fn parse_tagged(spec: &str) -> Result<(String, PathBuf)> {
    match spec.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => bail!("expected name=path, got {spec:?}"),
    }
}
