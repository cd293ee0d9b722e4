/// Fuzzes the search engine by checking on many random grids that every algorithm finds a path
/// exactly when the goal is on the start's connected component, that paths are well formed and
/// that the cost-aware searches agree on the optimal cost.
use grid_search_visualizer::{search, Algorithm, Occupancy, PathingGrid, Terrain};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;

const TERRAINS: [Terrain; 4] = [Terrain::None, Terrain::Grass, Terrain::Mud, Terrain::Water];

fn random_grid(n: usize, rng: &mut StdRng, terrain: bool) -> PathingGrid {
    let mut grid = PathingGrid::new(n).unwrap();
    grid.set_occupancy(grid.start().unwrap(), Occupancy::Empty);
    grid.set_occupancy(grid.goal().unwrap(), Occupancy::Empty);
    grid.set_occupancy(Point::new(0, 0), Occupancy::Start);
    grid.set_occupancy(Point::new(n as i32 - 1, n as i32 - 1), Occupancy::Goal);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            let p = Point::new(x, y);
            if rng.gen_bool(0.3) {
                grid.set_occupancy(p, Occupancy::Obstacle);
            } else if terrain {
                grid.set_terrain(p, *TERRAINS.choose(rng).unwrap());
            }
        }
    }
    grid.terrain_enabled = terrain;
    grid.update();
    grid
}

fn visualize_grid(grid: &PathingGrid) {
    print!("{grid}");
}

/// Step distance from `start` to `goal` by plain flood fill.
fn flood_distance(grid: &PathingGrid, start: Point, goal: Point) -> Option<usize> {
    let n = grid.size();
    let mut dist = vec![usize::MAX; n * n];
    let ix = |p: Point| p.y as usize * n + p.x as usize;
    dist[ix(start)] = 0;
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        if p == goal {
            return Some(dist[ix(p)]);
        }
        for q in [(0, 1), (1, 0), (0, -1), (-1, 0)].map(|(dx, dy)| Point::new(p.x + dx, p.y + dy)) {
            if !grid.is_blocked(q) && dist[ix(q)] == usize::MAX {
                dist[ix(q)] = dist[ix(p)] + 1;
                queue.push_back(q);
            }
        }
    }
    None
}

fn assert_valid_path(path: &[Point], grid: &PathingGrid) {
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
    }
    for (i, p) in path.iter().enumerate() {
        assert!(!grid.is_blocked(*p));
        assert!(!path[i + 1..].contains(p));
    }
}

#[test]
fn neighbours_are_open_and_in_bounds() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..200 {
        let grid = random_grid(8, &mut rng, false);
        for x in -1..=8 {
            for y in -1..=8 {
                let neighbours = grid.neighbours(Point::new(x, y));
                assert!(neighbours.len() <= 4);
                for p in neighbours {
                    assert!(grid.in_bounds(p));
                    assert_ne!(grid.occupancy(p), Some(Occupancy::Obstacle));
                }
            }
        }
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng, false);
        let reachable = grid.reachable(&start, &end);
        let shortest = flood_distance(&grid, start, end);
        assert_eq!(shortest.is_some(), reachable);
        for algorithm in Algorithm::ALL {
            grid.clear_markers();
            let result = search(algorithm, &mut grid, start, end);
            // Show the grid if a path is not found
            if result.is_found() != reachable {
                visualize_grid(&grid);
            }
            assert_eq!(result.is_found(), reachable, "{algorithm}");
            assert_valid_path(&result.path, &grid);
            if algorithm != Algorithm::Dfs {
                assert_eq!(result.path.len().checked_sub(1), shortest, "{algorithm}");
            }
            if reachable {
                assert_eq!(result.cost, result.steps() as f64);
            }
        }
    }
}

#[test]
fn fuzz_terrain_cost() {
    const N: usize = 8;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng, true);
        let dijkstra = search(Algorithm::Dijkstra, &mut grid, start, end);
        grid.clear_markers();
        let astar = search(Algorithm::Astar, &mut grid, start, end);
        if astar.cost != dijkstra.cost {
            println!("Astar cost: {}; Dijkstra cost: {}", astar.cost, dijkstra.cost);
            visualize_grid(&grid);
        }
        assert_eq!(astar.cost, dijkstra.cost);
        assert_eq!(astar.is_found(), dijkstra.is_found());
        // The reported cost is the cost of entering every cell after the start.
        let path_cost: f64 = astar.path.iter().skip(1).map(|p| grid.cell_cost(*p)).sum();
        assert!((path_cost - astar.cost).abs() < 1e-9);
        assert!(astar.explored <= dijkstra.explored);
    }
}
