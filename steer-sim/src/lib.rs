use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use steer_core::{SwarmStd, Vector2};
use steer_shared::SteerSettings;

/// Options for one headless run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub agents: usize,
    pub ticks: u64,
    pub seed: u64,
    pub settings: SteerSettings,
    pub target: Option<Vector2>,
    pub threat: Option<Vector2>,
    /// Log progress every N ticks; 0 disables progress logging
    pub log_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            agents: 25,
            ticks: 600,
            seed: 42,
            settings: SteerSettings::default(),
            target: None,
            threat: None,
            log_every: 100,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub ticks_run: u64,
    pub agent_count: usize,
    pub max_speed_seen: f64,
    pub max_centre_distance: f64,
    pub final_mean_target_distance: Option<f64>,
    pub final_positions: Vec<Vector2>,
}

/// Reads a `SteerSettings` JSON file.
pub fn load_settings(path: &Path) -> Result<SteerSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid settings JSON in {}", path.display()))
}

/// Runs a swarm for the requested number of ticks and reports what it saw.
/// The containment circle is centred on the origin.
pub fn run(options: &RunOptions) -> RunReport {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let config = options.settings.to_config(Vector2::zero());
    let mut swarm = SwarmStd::random(options.agents, config, options.settings.to_mix(), &mut rng);

    let mut max_speed_seen: f64 = 0.0;
    let mut max_centre_distance: f64 = 0.0;

    for tick in 0..options.ticks {
        swarm.update(&mut rng, options.target, options.threat);

        for agent in &swarm.agents {
            max_speed_seen = max_speed_seen.max(agent.velocity.magnitude());
            max_centre_distance =
                max_centre_distance.max(agent.position.distance(&config.bounds_centre));
        }

        if options.log_every > 0 && (tick + 1) % options.log_every == 0 {
            log::info!(
                "tick {}/{}: peak speed {:.2}, peak centre distance {:.2}",
                tick + 1,
                options.ticks,
                max_speed_seen,
                max_centre_distance
            );
        }
    }

    let final_mean_target_distance = options.target.map(|target| {
        if swarm.agents.is_empty() {
            0.0
        } else {
            swarm
                .agents
                .iter()
                .map(|agent| agent.position.distance(&target))
                .sum::<f64>()
                / swarm.agents.len() as f64
        }
    });

    RunReport {
        ticks_run: options.ticks,
        agent_count: swarm.agents.len(),
        max_speed_seen,
        max_centre_distance,
        final_mean_target_distance,
        final_positions: swarm.agents.iter().map(|agent| agent.position).collect(),
    }
}
