//! Headless driver for the Living Ocean simulation.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use ocean_core::SimulationConfig;
use ocean_world::Simulation;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Run the ocean ecosystem for a number of ticks
#[derive(Debug, Parser)]
#[command(name = "living-ocean", version, about)]
struct Args {
    /// JSON run configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<i32>,

    #[arg(long)]
    cols: Option<i32>,

    /// Number of ticks to run
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Random seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pause between ticks in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Print the board at every snapshot
    #[arg(long)]
    render: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn into_config(self) -> Result<(SimulationConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(ticks) = self.ticks {
            config.num_ticks = ticks;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(interval) = self.interval_ms {
            config.tick_interval_ms = interval;
        }
        config.validate()?;
        Ok((config, self.render))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_telemetry("info,ocean_world=info", args.json_logs)?;

    let (config, render) = args.into_config()?;
    info!(
        rows = config.rows,
        cols = config.cols,
        num_ticks = config.num_ticks,
        seed = ?config.seed,
        "Starting Living Ocean"
    );

    let mut simulation = Simulation::from_config(&config)?;
    let pause = Duration::from_millis(config.tick_interval_ms);

    if render {
        draw(&simulation)?;
    }

    for _ in 0..config.num_ticks {
        simulation.tick();

        let tick = simulation.tick_count();
        if config.snapshot_interval > 0 && tick % config.snapshot_interval == 0 {
            simulation.emit_population_metrics();
            if render {
                draw(&simulation)?;
            }
        }

        if simulation.board().is_empty() {
            info!(tick, "Ocean is empty, stopping early");
            break;
        }

        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }

    let census = simulation.census();
    let totals = simulation.total_stats();
    info!(
        event = "run_summary",
        ticks = simulation.tick_count(),
        algae = census.producers,
        herbivores = census.herbivores,
        predators = census.predators,
        total_births = totals.births,
        total_meals = totals.meals,
        total_deaths = totals.deaths,
        "Simulation finished"
    );

    Ok(())
}

fn draw(simulation: &Simulation) -> Result<()> {
    let census = simulation.census();
    let mut out = std::io::stdout().lock();
    writeln!(
        out,
        "tick {}  algae {}  herbivores {}  predators {}",
        simulation.tick_count(),
        census.producers,
        census.herbivores,
        census.predators
    )?;
    write!(out, "{}", simulation.board())?;
    writeln!(out)?;
    Ok(())
}
