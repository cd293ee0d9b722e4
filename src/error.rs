use thiserror::Error;

use crate::pathing_grid::MIN_SIZE;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VisualizerError {
    #[error("grid size {0} is below the minimum of {MIN_SIZE}")]
    InvalidSize(usize),
    #[error("both a start and a goal must be set before searching")]
    NoStartOrGoal,
    #[error("animation speed must be a positive finite factor, got {0}")]
    InvalidSpeed(f64),
    #[error("unknown algorithm `{0}`, expected one of bfs, dfs, dijkstra, astar")]
    UnknownAlgorithm(String),
    #[error("search was cancelled")]
    Cancelled,
}
