use grid_search_visualizer::{
    Algorithm, EditMode, PathingGrid, SearchObserver, StepEvent, ThreadPacer, Visualizer,
    VisualizerConfig,
};
use grid_util::point::Point;
use std::time::Duration;

// A wall with a single gap at the bottom splits a 15x15 grid, and water lies along the bottom
// rows past the gap. With terrain costs on, Dijkstra and A* climb out of the gap before
// heading for the goal; BFS only counts steps and may wade through.
//
// Every 25th expansion is printed; the final grid marks
// - S, G the start and goal
// - # obstacles
// - o explored cells
// - * the path

struct PrintEvery(usize);

impl SearchObserver for PrintEvery {
    fn on_step(&mut self, event: &StepEvent, grid: &PathingGrid) {
        if event.step % self.0 == 0 {
            println!("step {} at {}:\n{}", event.step, event.point, grid);
        }
    }
}

fn main() {
    let config = VisualizerConfig {
        size: 15,
        terrain_enabled: true,
        base_delay: Duration::from_millis(5),
        ..VisualizerConfig::default()
    };
    let mut vis = Visualizer::new(config).unwrap();

    vis.set_mode(EditMode::ToggleObstacle);
    vis.pointer_down(Point::new(7, 0));
    for y in 1..14 {
        vis.drag_over_cell(Point::new(7, y));
    }
    vis.pointer_up();

    vis.set_mode(EditMode::SetWater);
    for y in [13, 14] {
        vis.pointer_down(Point::new(9, y));
        for x in 10..15 {
            vis.drag_over_cell(Point::new(x, y));
        }
        vis.pointer_up();
    }
    vis.set_animation_speed(4.0).unwrap();

    for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::Astar] {
        let result = vis
            .find_path(algorithm, &mut ThreadPacer, &mut PrintEvery(25))
            .unwrap();
        println!(
            "{algorithm}: {} steps, cost {}, {} explored\n{}",
            result.steps(),
            result.cost,
            result.explored,
            vis.grid()
        );
    }
}
