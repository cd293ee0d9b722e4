use crate::animation::{Animator, CancelToken, Pacer, SearchObserver};
use crate::cell::{Occupancy, Terrain};
use crate::config::VisualizerConfig;
use crate::error::VisualizerError;
use crate::path::SearchResult;
use crate::pathing_grid::{PathingGrid, MIN_SIZE};
use crate::solver::{Algorithm, SearchStep, Stepper};
use grid_util::point::Point;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// What a click on a cell does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    #[default]
    None,
    SetStart,
    SetGoal,
    ToggleObstacle,
    SetGrass,
    SetMud,
    SetWater,
}

impl EditMode {
    /// Modes that keep applying while the pointer is dragged across cells.
    pub fn paints(self) -> bool {
        matches!(
            self,
            EditMode::ToggleObstacle | EditMode::SetGrass | EditMode::SetMud | EditMode::SetWater
        )
    }
}

/// A grid write, applied at once or held back until the running search ends.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Edit {
    Cell(EditMode, Point),
    ClearPath,
    ClearGrid,
    RandomObstacles,
    Resize(usize),
    TerrainEnabled(bool),
}

enum Submitted {
    Applied(bool),
    Queued,
}

struct ActiveSearch {
    run: Box<dyn Stepper>,
    cancel: CancelToken,
    start: Point,
    goal: Point,
}

/// Command surface for an interactive front end. Owns the grid and allows a single writer at a
/// time: while a search is running, edits are queued and applied once it finishes or is
/// cancelled.
pub struct Visualizer {
    grid: PathingGrid,
    mode: EditMode,
    pointer_held: bool,
    last_painted: Option<Point>,
    animator: Animator,
    obstacle_density: f64,
    active: Option<ActiveSearch>,
    pending: VecDeque<Edit>,
    rng: StdRng,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Result<Visualizer, VisualizerError> {
        Visualizer::with_rng(config, StdRng::from_entropy())
    }

    /// Like [new](Self::new) with a fixed seed for obstacle placement.
    pub fn with_seed(config: VisualizerConfig, seed: u64) -> Result<Visualizer, VisualizerError> {
        Visualizer::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: VisualizerConfig, rng: StdRng) -> Result<Visualizer, VisualizerError> {
        let mut grid = PathingGrid::new(config.size)?;
        grid.terrain_enabled = config.terrain_enabled;
        Ok(Visualizer {
            grid,
            mode: EditMode::None,
            pointer_held: false,
            last_painted: None,
            animator: Animator::new(config.base_delay, config.speed)?,
            obstacle_density: config.obstacle_density,
            active: None,
            pending: VecDeque::new(),
            rng,
        })
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }
    pub fn mode(&self) -> EditMode {
        self.mode
    }
    pub fn animator(&self) -> &Animator {
        &self.animator
    }
    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }
    /// Number of edits waiting for the running search to end.
    pub fn pending_edits(&self) -> usize {
        self.pending.len()
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        debug!("Edit mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    /// Applies the current mode at `point`. Returns whether the grid changed right away.
    /// Placing a start or goal switches the mode back to [EditMode::None] once the placement
    /// has actually been applied.
    pub fn click_cell(&mut self, point: Point) -> bool {
        if !self.grid.in_bounds(point) || self.mode == EditMode::None {
            return false;
        }
        let mode = self.mode;
        if mode.paints() {
            self.last_painted = Some(point);
        }
        matches!(self.submit(Edit::Cell(mode, point)), Submitted::Applied(true))
    }

    /// Starts a pointer gesture and clicks the cell under it.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        self.pointer_held = true;
        self.last_painted = None;
        self.click_cell(point)
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
        self.last_painted = None;
    }

    /// Continues a held gesture onto `point`. Only painting modes react, and only once per cell
    /// entered.
    pub fn drag_over_cell(&mut self, point: Point) -> bool {
        if !self.pointer_held || !self.mode.paints() || self.last_painted == Some(point) {
            return false;
        }
        self.click_cell(point)
    }

    pub fn clear_path(&mut self) {
        self.submit(Edit::ClearPath);
    }
    pub fn clear_grid(&mut self) {
        self.submit(Edit::ClearGrid);
    }
    /// Clears the grid, then blocks a random quarter (by default) of its cells.
    pub fn randomize_obstacles(&mut self) {
        self.submit(Edit::RandomObstacles);
    }
    pub fn resize(&mut self, size: usize) -> Result<(), VisualizerError> {
        if size < MIN_SIZE {
            return Err(VisualizerError::InvalidSize(size));
        }
        self.submit(Edit::Resize(size));
        Ok(())
    }
    pub fn set_terrain_enabled(&mut self, enabled: bool) {
        self.submit(Edit::TerrainEnabled(enabled));
    }
    /// Takes effect from the next step of a running search.
    pub fn set_animation_speed(&mut self, speed: f64) -> Result<(), VisualizerError> {
        self.animator.set_speed(speed)
    }

    fn submit(&mut self, edit: Edit) -> Submitted {
        if self.active.is_some() {
            debug!("Search in progress, queueing {edit:?}");
            self.pending.push_back(edit);
            Submitted::Queued
        } else {
            Submitted::Applied(self.apply(edit))
        }
    }

    fn apply(&mut self, edit: Edit) -> bool {
        debug!("Applying {edit:?}");
        match edit {
            Edit::Cell(mode, point) => match mode {
                EditMode::None => false,
                EditMode::SetStart | EditMode::SetGoal => {
                    let kind = if mode == EditMode::SetStart {
                        Occupancy::Start
                    } else {
                        Occupancy::Goal
                    };
                    let placed = self.grid.set_occupancy(point, kind);
                    // A queued placement only resets the mode if it is still the active one.
                    if placed && self.mode == mode {
                        self.mode = EditMode::None;
                    }
                    placed
                }
                EditMode::ToggleObstacle => self.grid.toggle_obstacle(point),
                EditMode::SetGrass => self.grid.set_terrain(point, Terrain::Grass),
                EditMode::SetMud => self.grid.set_terrain(point, Terrain::Mud),
                EditMode::SetWater => self.grid.set_terrain(point, Terrain::Water),
            },
            Edit::ClearPath => {
                self.grid.clear_markers();
                true
            }
            Edit::ClearGrid => {
                self.grid.clear_all();
                true
            }
            Edit::RandomObstacles => {
                self.grid.clear_all();
                self.grid
                    .random_obstacles(self.obstacle_density, &mut self.rng);
                self.grid.update();
                true
            }
            Edit::Resize(size) => self.grid.resize(size).is_ok(),
            Edit::TerrainEnabled(enabled) => {
                self.grid.terrain_enabled = enabled;
                true
            }
        }
    }

    fn flush_pending(&mut self) {
        while let Some(edit) = self.pending.pop_front() {
            self.apply(edit);
        }
    }

    /// Prepares a step-by-step search with a fresh [CancelToken].
    pub fn begin_search(&mut self, algorithm: Algorithm) -> Result<CancelToken, VisualizerError> {
        let cancel = CancelToken::new();
        self.begin_search_with(algorithm, cancel.clone())?;
        Ok(cancel)
    }

    /// Prepares a step-by-step search that stops once `cancel` is triggered. A search already in
    /// flight is cancelled first and queued edits are applied before the grid is cleared of old
    /// markers.
    pub fn begin_search_with(
        &mut self,
        algorithm: Algorithm,
        cancel: CancelToken,
    ) -> Result<(), VisualizerError> {
        self.cancel_search();
        let (Some(start), Some(goal)) = (self.grid.start(), self.grid.goal()) else {
            return Err(VisualizerError::NoStartOrGoal);
        };
        self.grid.clear_markers();
        self.grid.update();
        if self.grid.reachable(&start, &goal) {
            info!("{goal} is reachable from {start}, running {algorithm}");
        } else {
            info!("{goal} is not reachable from {start}, {algorithm} will exhaust its region");
        }
        self.active = Some(ActiveSearch {
            run: algorithm.start(start, goal),
            cancel,
            start,
            goal,
        });
        Ok(())
    }

    /// Stops the running search, if any, and applies the edits queued behind it.
    pub fn cancel_search(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.cancel.cancel();
                info!("Cancelled {} search", active.run.algorithm());
                self.flush_pending();
                true
            }
            None => false,
        }
    }

    /// Advances the running search by one expansion. Returns [None] when no search is running
    /// or it was cancelled.
    pub fn step(&mut self) -> Option<SearchStep> {
        if self.active.as_ref()?.cancel.is_cancelled() {
            self.cancel_search();
            return None;
        }
        let active = self.active.as_mut()?;
        match active.run.step(&mut self.grid) {
            Some(SearchStep::Finished(result)) => {
                self.finish(&result);
                Some(SearchStep::Finished(result))
            }
            Some(step) => Some(step),
            None => {
                self.active = None;
                self.flush_pending();
                None
            }
        }
    }

    fn finish(&mut self, result: &SearchResult) {
        if let Some(active) = self.active.take() {
            let algorithm = active.run.algorithm();
            if result.is_found() {
                info!(
                    "{algorithm}: path of {} steps, cost {}, {} cells explored",
                    result.steps(),
                    result.cost,
                    result.explored
                );
            } else if self.grid.reachable(&active.start, &active.goal) {
                warn!("{algorithm}: reachable goal could not be pathed to, is the component map correct?");
            } else {
                info!("{algorithm}: no path, {} cells explored", result.explored);
            }
        }
        self.flush_pending();
    }

    /// Runs `algorithm` to completion, handing the grid to `observer` after every expansion and
    /// pausing `pacer` for the animation delay in between.
    pub fn find_path<P, O>(
        &mut self,
        algorithm: Algorithm,
        pacer: &mut P,
        observer: &mut O,
    ) -> Result<SearchResult, VisualizerError>
    where
        P: Pacer + ?Sized,
        O: SearchObserver + ?Sized,
    {
        self.find_path_with(algorithm, CancelToken::new(), pacer, observer)
    }

    /// Like [find_path](Self::find_path), stopping with [VisualizerError::Cancelled] at the next
    /// step boundary once `cancel` is triggered.
    pub fn find_path_with<P, O>(
        &mut self,
        algorithm: Algorithm,
        cancel: CancelToken,
        pacer: &mut P,
        observer: &mut O,
    ) -> Result<SearchResult, VisualizerError>
    where
        P: Pacer + ?Sized,
        O: SearchObserver + ?Sized,
    {
        self.begin_search_with(algorithm, cancel)?;
        loop {
            match self.step() {
                Some(SearchStep::Expanded(event)) => {
                    observer.on_step(&event, &self.grid);
                    pacer.pause(self.animator.delay());
                }
                Some(SearchStep::Finished(result)) => {
                    observer.on_finished(&result, &self.grid);
                    return Ok(result);
                }
                None => return Err(VisualizerError::Cancelled),
            }
        }
    }
}
