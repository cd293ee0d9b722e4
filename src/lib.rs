//! # grid_search_visualizer
//!
//! The search engine behind an interactive grid pathfinding visualizer. A square
//! [PathingGrid] holds obstacles, terrain and a start and goal; breadth-first search,
//! depth-first search, [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! and [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) explore it on a 4-connected
//! neighbourhood one expansion at a time, leaving explored and path markers on the grid for a
//! front end to draw.
//!
//! Searches can be run to completion with [solver::search], or stepped through a [Visualizer]
//! which paces each expansion, accepts edit commands and can cancel a run between steps.
//! Connected components are tracked with a
//! [union-find](https://en.wikipedia.org/wiki/Disjoint-set_data_structure) structure so
//! reachability is known before searching.
pub mod animation;
pub mod cell;
pub mod config;
pub mod error;
pub mod frontier;
pub mod path;
pub mod pathing_grid;
pub mod solver;
pub mod visualizer;

pub use animation::{Animator, CancelToken, NoDelay, NoOpObserver, Pacer, SearchObserver, ThreadPacer};
pub use cell::{Cell, Occupancy, Terrain};
pub use config::{Difficulty, VisualizerConfig};
pub use error::VisualizerError;
pub use path::SearchResult;
pub use pathing_grid::PathingGrid;
pub use solver::{search, search_with, Algorithm, SearchStep, StepEvent};
pub use visualizer::{EditMode, Visualizer};

/// Cost of entering a plain cell. Terrain costs are integer multiples of a tenth of this, which
/// keeps all accumulated costs exact.
pub const UNIT_COST: u32 = 10;

/// Converts the integer cost to an approximate floating point equivalent where a plain step has
/// cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: u32) -> f64 {
    (cost as f64) / (UNIT_COST as f64)
}
