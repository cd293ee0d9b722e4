//! Pacing of a running search. A search is suspended only between two expansions: the grid is
//! handed to a [SearchObserver] for rendering, then a [Pacer] waits out the animation delay.
use crate::error::VisualizerError;
use crate::path::SearchResult;
use crate::pathing_grid::PathingGrid;
use crate::solver::StepEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay between two steps at speed factor 1.
pub const BASE_DELAY: Duration = Duration::from_millis(50);

/// Receives the grid after every expansion and once when the search ends.
pub trait SearchObserver {
    fn on_step(&mut self, _event: &StepEvent, _grid: &PathingGrid) {}
    fn on_finished(&mut self, _result: &SearchResult, _grid: &PathingGrid) {}
}

pub struct NoOpObserver;
impl SearchObserver for NoOpObserver {}

/// Waits between two steps.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Puts the calling thread to sleep, leaving the CPU to other work.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Never waits. For headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self, _: Duration) {}
}

/// Shared flag used to stop a search at its next suspension point. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Holds the animation rate: each step waits `base_delay / speed`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animator {
    pub base_delay: Duration,
    speed: f64,
}

impl Default for Animator {
    fn default() -> Self {
        Animator {
            base_delay: BASE_DELAY,
            speed: 1.0,
        }
    }
}

impl Animator {
    pub fn new(base_delay: Duration, speed: f64) -> Result<Animator, VisualizerError> {
        let mut animator = Animator {
            base_delay,
            ..Animator::default()
        };
        animator.set_speed(speed)?;
        Ok(animator)
    }
    pub fn speed(&self) -> f64 {
        self.speed
    }
    pub fn set_speed(&mut self, speed: f64) -> Result<(), VisualizerError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(VisualizerError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }
    pub fn delay(&self) -> Duration {
        let nanos = self.base_delay.as_nanos() as f64 / self.speed;
        Duration::from_nanos(nanos.round().min(u64::MAX as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_scales_inversely_with_speed() {
        let mut animator = Animator::new(Duration::from_millis(100), 1.0).unwrap();
        assert_eq!(animator.delay(), Duration::from_millis(100));
        animator.set_speed(4.0).unwrap();
        assert_eq!(animator.delay(), Duration::from_millis(25));
        animator.set_speed(0.5).unwrap();
        assert_eq!(animator.delay(), Duration::from_millis(200));
    }

    #[test]
    fn rejects_bad_speeds() {
        let mut animator = Animator::default();
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(animator.set_speed(speed).is_err());
        }
        assert_eq!(animator.speed(), 1.0);
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
