use crate::frontier::Fifo;
use crate::solver::{Algorithm, GridSolver};

/// Breadth-first search. Nodes are marked visited when pushed, so the first route found to a
/// node is kept and the path has the fewest steps. Ties follow neighbour order, then FIFO order.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    type Frontier = Fifo;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Bfs
    }
    fn improves(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::test_util::*;
    use crate::solver::SearchStep;
    use grid_util::point::Point;

    /// Asserts that the optimal 4 step solution is found around a single obstacle.
    #[test]
    fn solve_simple_problem() {
        // |S  |
        // | # |
        // |  G|
        let start = Point::new(0, 0);
        let goal = Point::new(2, 2);
        let mut grid = grid_with(3, start, goal, &[(1, 1)]);
        let mut run = BfsSolver.run(start, goal);
        let result = loop {
            if let Some(SearchStep::Finished(result)) = run.step(&mut grid) {
                break result;
            }
        };
        assert_eq!(result.steps(), 4);
        assert_valid_path(&result.path);
    }

    /// The first expansions follow north, east, south, west discovery in FIFO order.
    #[test]
    fn expansion_order_is_fifo() {
        let start = Point::new(1, 1);
        let goal = Point::new(4, 4);
        let mut grid = grid_with(5, start, goal, &[]);
        let mut run = BfsSolver.run(start, goal);
        let order = std::iter::from_fn(|| match run.step(&mut grid) {
            Some(SearchStep::Expanded(event)) => Some(event.point),
            _ => None,
        })
        .take(5)
        .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                Point::new(1, 1),
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1),
            ]
        );
    }
}
