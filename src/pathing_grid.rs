use crate::cell::{Cell, Occupancy, Terrain};
use crate::error::VisualizerError;
use crate::{convert_cost_to_unit_cost_float, UNIT_COST};
use core::fmt;
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

/// Smallest side length a grid may have.
pub const MIN_SIZE: usize = 2;
/// Side length used by [PathingGrid::default].
pub const DEFAULT_SIZE: usize = 20;

/// Neighbour offsets in north, east, south, west order. BFS and DFS tie-breaking
/// depends on this order.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// [PathingGrid] is a square grid of [Cell]s with at most one start and one goal. It keeps
/// connected components of the open cells in a [UnionFind] structure so that reachability can
/// be queried without searching. Components are flagged dirty when a cell becomes blocked and
/// regenerated by [update](Self::update).
#[derive(Clone, Debug)]
pub struct PathingGrid {
    size: usize,
    cells: Vec<Cell>,
    start: Option<Point>,
    goal: Option<Point>,
    /// When false every cell costs a single plain step regardless of its terrain.
    pub terrain_enabled: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        let mut grid = PathingGrid::blank(DEFAULT_SIZE);
        grid.place_endpoints();
        grid
    }
}

impl PathingGrid {
    /// Creates an empty `size`x`size` grid with start and goal placed 15% in from the top-left
    /// and bottom-right corners.
    pub fn new(size: usize) -> Result<PathingGrid, VisualizerError> {
        let mut grid = PathingGrid::blank(MIN_SIZE);
        grid.resize(size)?;
        Ok(grid)
    }

    fn blank(size: usize) -> PathingGrid {
        PathingGrid {
            size,
            cells: vec![Cell::default(); size * size],
            start: None,
            goal: None,
            terrain_enabled: false,
            components: UnionFind::new(size * size),
            components_dirty: false,
        }
    }

    fn place_endpoints(&mut self) {
        let near = (self.size * 15 / 100) as i32;
        let far = (self.size * 85 / 100) as i32;
        self.start = None;
        self.goal = None;
        self.set_occupancy(Point::new(near, near), Occupancy::Start);
        self.set_occupancy(Point::new(far, far), Occupancy::Goal);
        self.generate_components();
    }

    /// Reallocates the grid as `size`x`size` empty cells and re-places start and goal. The grid
    /// is left untouched if `size` is below [MIN_SIZE].
    pub fn resize(&mut self, size: usize) -> Result<(), VisualizerError> {
        if size < MIN_SIZE {
            return Err(VisualizerError::InvalidSize(size));
        }
        info!("Resizing grid to {size}x{size}");
        self.size = size;
        self.cells = vec![Cell::default(); size * size];
        self.place_endpoints();
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.size
    }
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }
    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.y >= 0 && (point.x as usize) < self.size && (point.y as usize) < self.size
    }
    fn index(&self, point: Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| point.y as usize * self.size + point.x as usize)
    }
    fn point(&self, ix: usize) -> Point {
        Point::new((ix % self.size) as i32, (ix / self.size) as i32)
    }

    pub fn get(&self, point: Point) -> Option<Cell> {
        self.index(point).map(|ix| self.cells[ix])
    }
    pub fn occupancy(&self, point: Point) -> Option<Occupancy> {
        self.get(point).map(|c| c.occupancy)
    }
    pub fn terrain(&self, point: Point) -> Option<Terrain> {
        self.get(point).map(|c| c.terrain)
    }
    /// Out-of-bounds points count as blocked.
    pub fn is_blocked(&self, point: Point) -> bool {
        self.occupancy(point)
            .map_or(true, |o| o == Occupancy::Obstacle)
    }

    /// Sets the occupancy of a cell, returning whether anything changed. Placing the start on the
    /// goal (or the reverse) is ignored, as is blocking or marking an endpoint. A new start or
    /// goal clears the previous one and any terrain underneath it. Setting an endpoint to
    /// [Occupancy::Empty] unsets it.
    pub fn set_occupancy(&mut self, point: Point, kind: Occupancy) -> bool {
        let Some(ix) = self.index(point) else {
            return false;
        };
        let current = self.cells[ix].occupancy;
        match kind {
            Occupancy::Start | Occupancy::Goal => {
                let (own, other) = if kind == Occupancy::Start {
                    (self.start, self.goal)
                } else {
                    (self.goal, self.start)
                };
                if other == Some(point) {
                    debug!("Ignoring {kind:?} on top of the other endpoint at {point}");
                    return false;
                }
                if let Some(previous) = own.and_then(|p| self.index(p)) {
                    self.cells[previous] = Cell::default();
                }
                self.cells[ix] = Cell {
                    occupancy: kind,
                    terrain: Terrain::None,
                };
                if kind == Occupancy::Start {
                    self.start = Some(point);
                } else {
                    self.goal = Some(point);
                }
            }
            Occupancy::Empty => {
                if self.start == Some(point) {
                    self.start = None;
                }
                if self.goal == Some(point) {
                    self.goal = None;
                }
                self.cells[ix].occupancy = Occupancy::Empty;
            }
            Occupancy::Obstacle => {
                if current.is_endpoint() {
                    return false;
                }
                self.cells[ix] = Cell {
                    occupancy: Occupancy::Obstacle,
                    terrain: Terrain::None,
                };
                if current != Occupancy::Obstacle {
                    self.components_dirty = true;
                }
                return true;
            }
            Occupancy::Path | Occupancy::Explored => {
                if current.is_endpoint() || current == Occupancy::Obstacle {
                    return false;
                }
                self.cells[ix].occupancy = kind;
                return true;
            }
        }
        if current == Occupancy::Obstacle {
            self.join_components(point);
        }
        true
    }

    /// Flips a cell between empty and obstacle. Endpoints and cells carrying a path or explored
    /// marker are left alone.
    pub fn toggle_obstacle(&mut self, point: Point) -> bool {
        match self.occupancy(point) {
            Some(Occupancy::Empty) => self.set_occupancy(point, Occupancy::Obstacle),
            Some(Occupancy::Obstacle) => self.set_occupancy(point, Occupancy::Empty),
            _ => false,
        }
    }

    /// Records terrain on an open cell. Obstacles and endpoints never carry terrain.
    pub fn set_terrain(&mut self, point: Point, terrain: Terrain) -> bool {
        let Some(ix) = self.index(point) else {
            return false;
        };
        let cell = &mut self.cells[ix];
        if cell.occupancy.is_endpoint() || cell.occupancy == Occupancy::Obstacle {
            return false;
        }
        cell.terrain = terrain;
        true
    }

    /// Cost of entering `point` in units of [UNIT_COST]. This is the only place movement cost
    /// is decided.
    pub fn cell_cost_units(&self, point: Point) -> u32 {
        match self.terrain(point) {
            Some(terrain) if self.terrain_enabled => terrain.cost_units(),
            _ => UNIT_COST,
        }
    }
    /// Cost of entering `point` as a multiple of a plain step.
    pub fn cell_cost(&self, point: Point) -> f64 {
        convert_cost_to_unit_cost_float(self.cell_cost_units(point))
    }

    /// The in-bounds, non-obstacle 4-neighbourhood of `point` in north, east, south, west order.
    pub fn neighbours(&self, point: Point) -> SmallVec<[Point; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|&p| !self.is_blocked(p))
            .collect()
    }

    /// Resets path and explored markers, keeping terrain, endpoints and obstacles.
    pub fn clear_markers(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.occupancy.is_marker()) {
            cell.occupancy = Occupancy::Empty;
        }
    }

    /// Empties every cell, terrain included, then stamps start and goal back in place.
    pub fn clear_all(&mut self) {
        self.cells.fill(Cell::default());
        for (point, kind) in [(self.start, Occupancy::Start), (self.goal, Occupancy::Goal)] {
            if let Some(ix) = point.and_then(|p| self.index(p)) {
                self.cells[ix].occupancy = kind;
            }
        }
        self.generate_components();
    }

    /// Blocks `floor(size² · density)` distinct empty cells chosen uniformly without replacement,
    /// or every empty cell if there are fewer. Returns how many were placed.
    pub fn random_obstacles<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) -> usize {
        let target = ((self.cells.len() as f64) * density.clamp(0.0, 1.0)).floor() as usize;
        let empty = self
            .cells
            .iter()
            .positions(|c| c.occupancy == Occupancy::Empty)
            .collect::<Vec<usize>>();
        let chosen = empty
            .choose_multiple(rng, target)
            .copied()
            .collect::<Vec<usize>>();
        for &ix in &chosen {
            self.cells[ix] = Cell {
                occupancy: Occupancy::Obstacle,
                terrain: Terrain::None,
            };
        }
        if !chosen.is_empty() {
            self.components_dirty = true;
        }
        debug!("Placed {} random obstacles", chosen.len());
        chosen.len()
    }

    /// Every obstacle coordinate in row-major order.
    pub fn obstacles(&self) -> Vec<Point> {
        self.cells
            .iter()
            .positions(|c| c.occupancy == Occupancy::Obstacle)
            .map(|ix| self.point(ix))
            .collect()
    }

    fn join_components(&mut self, point: Point) {
        if let Some(ix) = self.index(point) {
            for n in self.neighbours(point) {
                if let Some(n_ix) = self.index(n) {
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.index(*point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are open cells on the same connected component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.index(*start), self.index(*goal)) {
            (Some(s), Some(g)) => {
                self.cells[s].occupancy != Occupancy::Obstacle
                    && self.cells[g].occupancy != Occupancy::Obstacle
                    && self.components.equiv(s, g)
            }
            _ => false,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open 4-neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        let n = self.size as i32;
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for (x, y) in iproduct!(0..n, 0..n) {
            let point = Point::new(x, y);
            if self.occupancy(point) == Some(Occupancy::Obstacle) {
                continue;
            }
            for other in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                if let (Some(a), Some(b)) = (self.index(point), self.index(other)) {
                    if self.cells[b].occupancy != Occupancy::Obstacle {
                        self.components.union(a, b);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            writeln!(f, "{}", row.iter().map(Cell::symbol).join(" "))?;
        }
        Ok(())
    }
}
