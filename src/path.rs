use crate::cell::Occupancy;
use crate::convert_cost_to_unit_cost_float;
use crate::frontier::{SearchState, NO_PARENT};
use crate::pathing_grid::PathingGrid;
use grid_util::point::Point;

/// Outcome of one search. An empty path means the goal could not be reached, which is a
/// normal result and not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Coordinates from start to goal inclusive.
    pub path: Vec<Point>,
    /// Number of cells expanded before the search ended.
    pub explored: usize,
    /// Accumulated cost of the path in plain steps; equal to [steps](Self::steps) when terrain
    /// costs are off.
    pub cost: f64,
}

impl SearchResult {
    pub fn found(path: Vec<Point>, explored: usize, cost_units: u32) -> SearchResult {
        SearchResult {
            path,
            explored,
            cost: convert_cost_to_unit_cost_float(cost_units),
        }
    }
    pub fn unreachable(explored: usize) -> SearchResult {
        SearchResult {
            path: Vec::new(),
            explored,
            cost: 0.0,
        }
    }
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Walks the predecessor chain from `goal_index` back to the start and returns it in
/// start-to-goal order. Every cell strictly between the endpoints is marked as path.
pub fn reconstruct_path(state: &SearchState, goal_index: usize, grid: &mut PathingGrid) -> Vec<Point> {
    let mut path = std::iter::successors(Some(goal_index), |&index| {
        state
            .node(index)
            .map(|(_, node)| node.parent)
            .filter(|&parent| parent != NO_PARENT)
    })
    .filter_map(|index| state.node(index).map(|(point, _)| point))
    .collect::<Vec<Point>>();
    path.reverse();
    if let [_, inner @ .., _] = path.as_slice() {
        for &point in inner {
            grid.set_occupancy(point, Occupancy::Path);
        }
    }
    path
}
