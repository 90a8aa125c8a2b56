#![cfg_attr(not(feature = "std"), no_std)]

use serde::{Deserialize, Serialize};
use steer_core::{BehaviorMix, SteerConfig, Vector2};

/// A screen-space point exchanged between a driving UI and a simulation host
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetPoint {
    pub x: f64,
    pub y: f64,
}

impl TargetPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point
    pub fn distance_to(&self, other: &TargetPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrt(dx * dx + dy * dy)
    }
}

/// Update message directing the swarm's attraction point.
/// `None` means no target, the swarm drifts freely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetUpdate {
    pub position: Option<TargetPoint>,
}

/// Tunables for the steering agents and the per-tick behavior mix
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SteerSettings {
    pub scale: f64,
    pub max_speed: f64,
    pub max_force: f64,
    pub wander_step: f64,
    pub wander_distance: f64,
    pub wander_radius: f64,
    pub bounds_radius: f64,
    pub agent_radius: f64,
    pub wander_weight: f64,
    pub arrive_weight: f64,
    pub flee_weight: f64,
    pub arrive_ease_distance: f64,
    pub flee_panic_distance: f64,
}

impl Default for SteerSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            max_speed: 6.0,
            max_force: 6.0,
            wander_step: 0.25,
            wander_distance: 100.0,
            wander_radius: 16.0,
            bounds_radius: 100.0,
            agent_radius: 0.0,
            wander_weight: 1.0,
            arrive_weight: 1.0,
            flee_weight: 1.0,
            arrive_ease_distance: 100.0,
            flee_panic_distance: 100.0,
        }
    }
}

impl SteerSettings {
    /// Per-agent config for a containment circle centred at `bounds_centre`
    pub fn to_config(&self, bounds_centre: Vector2) -> SteerConfig {
        SteerConfig {
            scale: self.scale,
            max_speed: self.max_speed,
            max_force: self.max_force,
            wander_step: self.wander_step,
            wander_distance: self.wander_distance,
            wander_radius: self.wander_radius,
            bounds_centre,
            bounds_radius: self.bounds_radius,
            radius: self.agent_radius,
        }
    }

    /// The per-tick behavior mix a swarm host runs with
    pub fn to_mix(&self) -> BehaviorMix {
        BehaviorMix {
            wander_weight: self.wander_weight,
            arrive_weight: self.arrive_weight,
            flee_weight: self.flee_weight,
            arrive_ease_distance: self.arrive_ease_distance,
            flee_panic_distance: self.flee_panic_distance,
        }
    }
}

/// Settings update message sent from a UI to the simulation host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub settings: SteerSettings,
}

/// Status snapshot reported by the simulation host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub agent_count: usize,
    pub tick: u64,
    pub target_active: bool,
}
