use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use steer_core::Vector2;
use steer_shared::SteerSettings;
use steer_sim::{load_settings, run, RunOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless steering swarm driver", long_about = None)]
struct Args {
    /// Number of agents in the swarm
    #[arg(short, long, default_value_t = 25)]
    agents: usize,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// RNG seed for placement and wander
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Settings JSON file (defaults apply when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Attraction point as "x,y"
    #[arg(long, value_parser = parse_point)]
    target: Option<Vector2>,

    /// Threat point as "x,y" that agents flee from
    #[arg(long, value_parser = parse_point)]
    threat: Option<Vector2>,

    /// Log progress every N ticks (0 disables)
    #[arg(long, default_value_t = 100)]
    log_every: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_point(s: &str) -> Result<Vector2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Vector2::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Steering driver starting...");

    let settings = match &args.settings {
        Some(path) => load_settings(path).context("Failed to load settings")?,
        None => SteerSettings::default(),
    };

    let options = RunOptions {
        agents: args.agents,
        ticks: args.ticks,
        seed: args.seed,
        settings,
        target: args.target,
        threat: args.threat,
        log_every: args.log_every,
    };

    log::info!(
        "Running {} agents for {} ticks (seed {})",
        options.agents,
        options.ticks,
        options.seed
    );

    let report = run(&options);

    log::info!(
        "Run complete: {} agents, {} ticks",
        report.agent_count,
        report.ticks_run
    );
    log::info!(
        "Peak speed {:.2} (limit {:.2}), peak centre distance {:.2}",
        report.max_speed_seen,
        settings.max_speed,
        report.max_centre_distance
    );
    if let Some(mean) = report.final_mean_target_distance {
        log::info!("Mean distance to target after run: {:.2}", mean);
    }

    Ok(())
}
