use crate::animation::{NoOpObserver, SearchObserver};
use crate::cell::Occupancy;
use crate::error::VisualizerError;
use crate::frontier::{Frontier, Relaxed, SearchState};
use crate::path::{reconstruct_path, SearchResult};
use crate::pathing_grid::PathingGrid;
use core::fmt;
use grid_util::point::Point;
use log::{trace, warn};
use std::str::FromStr;

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;

/// A traversal policy: which frontier it expands from, whether open nodes can be re-parented
/// through a cheaper route and how the remaining distance is estimated.
pub trait GridSolver {
    type Frontier: Frontier + Default;

    fn algorithm(&self) -> Algorithm;

    /// When false, the first route to reach a node is final (visited on push).
    fn improves(&self) -> bool;

    /// Lower bound on the remaining cost from `p1` to `p2`, in cost units.
    fn heuristic(&self, _p1: &Point, _p2: &Point) -> u32 {
        0
    }

    /// A frontier holding only the start node, which always has discovery index 0.
    fn seed(&self) -> Self::Frontier {
        let mut frontier = Self::Frontier::default();
        frontier.push(0, 0, 0);
        frontier
    }

    /// Prepares a stepwise search from `start` to `goal`.
    fn run(self, start: Point, goal: Point) -> SearchRun<Self>
    where
        Self: Sized,
    {
        SearchRun::new(self, start, goal)
    }
}

/// Emitted after every expansion. Step `k` describes the grid right after the `k`-th pop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepEvent {
    pub step: usize,
    pub point: Point,
    /// Discovered nodes still waiting to be expanded.
    pub frontier: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    Expanded(StepEvent),
    Finished(SearchResult),
}

/// Object-safe handle over a [SearchRun] of any solver.
pub trait Stepper {
    fn algorithm(&self) -> Algorithm;
    /// Pops and expands one node. Returns [None] once the search has finished.
    fn step(&mut self, grid: &mut PathingGrid) -> Option<SearchStep>;
}

/// One search invocation. Owns its [SearchState] and frontier; borrows the grid only for the
/// duration of a single [step](Self::step), which is the only point where it can be suspended.
pub struct SearchRun<S: GridSolver> {
    solver: S,
    start: Point,
    goal: Point,
    state: SearchState,
    frontier: S::Frontier,
    explored: usize,
    finished: bool,
}

impl<S: GridSolver> SearchRun<S> {
    pub fn new(solver: S, start: Point, goal: Point) -> SearchRun<S> {
        let frontier = solver.seed();
        SearchRun {
            solver,
            start,
            goal,
            state: SearchState::with_start(start),
            frontier,
            explored: 0,
            finished: false,
        }
    }

    pub fn explored(&self) -> usize {
        self.explored
    }

    fn finish(&mut self, result: SearchResult) -> Option<SearchStep> {
        self.finished = true;
        Some(SearchStep::Finished(result))
    }

    pub fn step(&mut self, grid: &mut PathingGrid) -> Option<SearchStep> {
        if self.finished {
            return None;
        }
        loop {
            let Some((index, cost)) = self.frontier.pop() else {
                return self.finish(SearchResult::unreachable(self.explored));
            };
            let Some((current, node)) = self.state.node(index) else {
                continue;
            };
            // A node may sit in the heap several times if a cheaper route was found later;
            // only the entry matching the best known cost counts.
            if node.closed || cost > node.cost {
                continue;
            }
            if current == self.goal {
                let path = reconstruct_path(&self.state, index, grid);
                return self.finish(SearchResult::found(path, self.explored, node.cost));
            }
            self.state.close(index);
            if current != self.start {
                grid.set_occupancy(current, Occupancy::Explored);
            }
            self.explored += 1;

            let improves = self.solver.improves();
            for successor in grid.neighbours(current) {
                if self.state.is_closed(&successor) {
                    continue;
                }
                let new_cost = node.cost + grid.cell_cost_units(successor);
                match self.state.relax(successor, index, new_cost, improves) {
                    Relaxed::Discovered(n) | Relaxed::Improved(n) => {
                        let h = self.solver.heuristic(&successor, &self.goal);
                        self.frontier.push(n, new_cost, new_cost + h);
                    }
                    Relaxed::Unchanged => {}
                }
            }
            trace!(
                "{}: expanded {} at cost {}, frontier {}",
                self.solver.algorithm(),
                current,
                node.cost,
                self.state.open_len()
            );
            return Some(SearchStep::Expanded(StepEvent {
                step: self.explored,
                point: current,
                frontier: self.state.open_len(),
            }));
        }
    }
}

impl<S: GridSolver> Stepper for SearchRun<S> {
    fn algorithm(&self) -> Algorithm {
        self.solver.algorithm()
    }
    fn step(&mut self, grid: &mut PathingGrid) -> Option<SearchStep> {
        SearchRun::step(self, grid)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    #[default]
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Astar,
    ];

    /// Prepares a stepwise search using this algorithm.
    pub fn start(self, start: Point, goal: Point) -> Box<dyn Stepper> {
        match self {
            Algorithm::Bfs => Box::new(BfsSolver.run(start, goal)),
            Algorithm::Dfs => Box::new(DfsSolver.run(start, goal)),
            Algorithm::Dijkstra => Box::new(DijkstraSolver.run(start, goal)),
            Algorithm::Astar => Box::new(AstarSolver.run(start, goal)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Astar => "astar",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VisualizerError::UnknownAlgorithm(s.to_owned()))
    }
}

/// Runs `algorithm` from `start` to `goal` to completion, marking explored and path cells on
/// the grid.
pub fn search(
    algorithm: Algorithm,
    grid: &mut PathingGrid,
    start: Point,
    goal: Point,
) -> SearchResult {
    search_with(algorithm, grid, start, goal, &mut NoOpObserver)
}

/// Like [search], reporting every expansion and the final result to `observer`.
pub fn search_with<O: SearchObserver + ?Sized>(
    algorithm: Algorithm,
    grid: &mut PathingGrid,
    start: Point,
    goal: Point,
    observer: &mut O,
) -> SearchResult {
    if !grid.in_bounds(start) || !grid.in_bounds(goal) {
        warn!("Search endpoints {start} and {goal} must lie inside the grid");
        return SearchResult::unreachable(0);
    }
    let mut run = algorithm.start(start, goal);
    while let Some(step) = run.step(grid) {
        match step {
            SearchStep::Expanded(event) => observer.on_step(&event, grid),
            SearchStep::Finished(result) => {
                observer.on_finished(&result, grid);
                return result;
            }
        }
    }
    SearchResult::unreachable(0)
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;

    /// An open `size`x`size` grid with the endpoints moved and the given cells blocked.
    pub fn grid_with(size: usize, start: Point, goal: Point, walls: &[(i32, i32)]) -> PathingGrid {
        let mut grid = PathingGrid::new(size).unwrap();
        grid.set_occupancy(grid.start().unwrap(), Occupancy::Empty);
        grid.set_occupancy(grid.goal().unwrap(), Occupancy::Empty);
        assert!(grid.set_occupancy(start, Occupancy::Start));
        assert!(grid.set_occupancy(goal, Occupancy::Goal));
        for &(x, y) in walls {
            grid.set_occupancy(Point::new(x, y), Occupancy::Obstacle);
        }
        grid.update();
        grid
    }

    /// Asserts that consecutive path points are 4-neighbours and that no point repeats.
    pub fn assert_valid_path(path: &[Point]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
        }
        let unique = path.iter().collect::<std::collections::HashSet<_>>();
        assert_eq!(unique.len(), path.len());
    }
}
