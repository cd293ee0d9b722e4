use crate::frontier::BestFirst;
use crate::solver::{Algorithm, GridSolver};
use crate::UNIT_COST;
use grid_util::point::Point;

/// Dijkstra ordered by distance plus the Manhattan distance to the goal. Every step costs at
/// least [UNIT_COST], so the estimate never overshoots and paths stay optimal with terrain on.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSolver;

impl GridSolver for AstarSolver {
    type Frontier = BestFirst<u32>;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Astar
    }
    fn improves(&self) -> bool {
        true
    }
    fn seed(&self) -> BestFirst<u32> {
        BestFirst::seeded(0)
    }
    fn heuristic(&self, p1: &Point, p2: &Point) -> u32 {
        p1.manhattan_distance(p2) as u32 * UNIT_COST
    }
}
