use crate::frontier::BestFirst;
use crate::solver::{Algorithm, GridSolver};

/// Uniform-cost search: always expands the open node with the smallest known distance.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    type Frontier = BestFirst<u32>;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }
    fn improves(&self) -> bool {
        true
    }
    fn seed(&self) -> BestFirst<u32> {
        BestFirst::seeded(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Terrain;
    use crate::solver::search;
    use crate::solver::test_util::*;
    use grid_util::point::Point;

    /// With terrain costs on, a detour over plain ground beats a short route through water.
    #[test]
    fn prefers_cheap_detour() {
        // |S w G|
        // |. . .|
        let start = Point::new(0, 0);
        let goal = Point::new(2, 0);
        let mut grid = grid_with(3, start, goal, &[]);
        grid.set_terrain(Point::new(1, 0), Terrain::Water);
        grid.terrain_enabled = true;
        let result = search(Algorithm::Dijkstra, &mut grid, start, goal);
        assert_eq!(
            result.path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 0),
            ]
        );
        assert_eq!(result.cost, 4.0);

        grid.clear_markers();
        grid.terrain_enabled = false;
        let result = search(Algorithm::Dijkstra, &mut grid, start, goal);
        assert_eq!(result.steps(), 2);
        assert_eq!(result.cost, 2.0);
    }

    /// Plain cells next to mud and water carry the path.
    #[test]
    fn skips_expensive_terrain() {
        // |S m .|
        // |. . G|
        let start = Point::new(0, 0);
        let goal = Point::new(2, 1);
        let mut grid = grid_with(3, start, goal, &[]);
        grid.set_terrain(Point::new(1, 0), Terrain::Mud);
        grid.set_terrain(Point::new(2, 0), Terrain::Water);
        grid.terrain_enabled = true;
        let result = search(Algorithm::Dijkstra, &mut grid, start, goal);
        assert_eq!(result.cost, 3.0);
        assert_eq!(result.path[1], Point::new(0, 1));
    }
}
