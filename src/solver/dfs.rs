use crate::frontier::Lifo;
use crate::solver::{Algorithm, GridSolver};

/// Depth-first search over a stack. Neighbours are pushed north, east, south, west, so the
/// west branch is followed first. Paths are valid but not necessarily short.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    type Frontier = Lifo;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dfs
    }
    fn improves(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_util::*;
    use crate::solver::{search, SearchStep};
    use grid_util::point::Point;

    #[test]
    fn follows_last_pushed_branch() {
        let start = Point::new(2, 2);
        let goal = Point::new(4, 4);
        let mut grid = grid_with(5, start, goal, &[]);
        let mut run = DfsSolver.run(start, goal);
        let order = std::iter::from_fn(|| match run.step(&mut grid) {
            Some(SearchStep::Expanded(event)) => Some(event.point),
            _ => None,
        })
        .take(3)
        .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![Point::new(2, 2), Point::new(1, 2), Point::new(0, 2)]
        );
    }

    #[test]
    fn finds_valid_path_through_maze() {
        // |S # . . .|
        // |. # . # .|
        // |. . . # G|
        let start = Point::new(0, 0);
        let goal = Point::new(4, 2);
        let walls = [(1, 0), (1, 1), (3, 1), (3, 2)];
        let mut grid = grid_with(5, start, goal, &walls);
        let result = search(Algorithm::Dfs, &mut grid, start, goal);
        assert!(result.is_found());
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&goal));
        assert_valid_path(&result.path);
        assert_eq!(result.cost, result.steps() as f64);
    }
}
