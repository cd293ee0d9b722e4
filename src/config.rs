use crate::animation::BASE_DELAY;
use crate::pathing_grid::DEFAULT_SIZE;
use std::time::Duration;

/// Fraction of cells blocked by [Visualizer::randomize_obstacles](crate::Visualizer::randomize_obstacles).
pub const OBSTACLE_DENSITY: f64 = 0.25;

/// Grid size tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn size(self) -> usize {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }
}

/// Initial settings of a [Visualizer](crate::Visualizer).
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    pub size: usize,
    pub terrain_enabled: bool,
    pub base_delay: Duration,
    pub speed: f64,
    pub obstacle_density: f64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        VisualizerConfig {
            size: DEFAULT_SIZE,
            terrain_enabled: false,
            base_delay: BASE_DELAY,
            speed: 1.0,
            obstacle_density: OBSTACLE_DENSITY,
        }
    }
}

impl VisualizerConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        VisualizerConfig {
            size: difficulty.size(),
            ..VisualizerConfig::default()
        }
    }
}
