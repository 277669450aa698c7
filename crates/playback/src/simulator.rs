//! Headless driver for running animations without a display.
//!
//! Hosts with a real refresh loop call [`Visualizer::tick`] themselves. The
//! simulator stands in for that loop in tests, benchmarks and the CLI, and
//! records every event the visualizer emits.

use std::cell::RefCell;
use std::rc::Rc;

use raster::Surface;

use crate::animation::TickOutcome;
use crate::event::{EndReason, Event};
use crate::visualizer::Visualizer;

/// Statistics tracked during a simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    /// Ticks delivered, accepted or not.
    pub ticks: usize,
    /// Ticks that advanced the animation.
    pub accepted_ticks: usize,
    pub segments_completed: usize,
    /// Set once the run ended.
    pub end_reason: Option<EndReason>,
    /// Set when a run stopped at the tick limit while still playing.
    pub hit_tick_limit: bool,
}

/// Drives a [`Visualizer`] frame by frame.
///
/// # Example
///
/// ```rust
/// use kinematics::MotionKind;
/// use playback::{AnimationConfig, AnimationDescription, Simulator, Visualizer};
/// use raster::RecordingSurface;
///
/// let mut vis = Visualizer::new(RecordingSurface::new(800, 600), AnimationConfig::default()).unwrap();
/// vis.load(AnimationDescription::new(MotionKind::FreeFall)).unwrap();
///
/// let mut sim = Simulator::new(vis);
/// sim.visualizer_mut().play();
/// let ticks = sim.run_until_idle(10_000);
///
/// assert!(ticks > 0);
/// assert!(sim.stats().end_reason.is_some());
/// ```
pub struct Simulator<S: Surface> {
    visualizer: Visualizer<S>,
    events: Rc<RefCell<Vec<Event>>>,
    stats: SimulationStats,
}

impl<S: Surface> Simulator<S> {
    /// Wraps a visualizer and starts recording its events.
    pub fn new(mut visualizer: Visualizer<S>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        visualizer.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        Self {
            visualizer,
            events,
            stats: SimulationStats::default(),
        }
    }

    /// Delivers one tick.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.visualizer.tick();
        self.stats.ticks += 1;
        match outcome {
            TickOutcome::Rejected => {}
            TickOutcome::Advanced => self.stats.accepted_ticks += 1,
            TickOutcome::SegmentCompleted => {
                self.stats.accepted_ticks += 1;
                self.stats.segments_completed += 1;
            }
            TickOutcome::Ended(reason) => {
                self.stats.accepted_ticks += 1;
                self.stats.end_reason = Some(reason);
            }
        }
        outcome
    }

    /// Ticks while the visualizer wants frames, up to `max_ticks`.
    /// Returns the number of ticks delivered.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> usize {
        self.run_with(max_ticks, |_, _| {})
    }

    /// Like [`Simulator::run_until_idle`], calling `after_tick` with the
    /// visualizer and the 1-based tick number after every tick.
    pub fn run_with<F>(&mut self, max_ticks: usize, mut after_tick: F) -> usize
    where
        F: FnMut(&Visualizer<S>, usize),
    {
        let mut delivered = 0;
        while self.visualizer.wants_frame() {
            if delivered == max_ticks {
                self.stats.hit_tick_limit = true;
                break;
            }
            self.tick();
            delivered += 1;
            after_tick(&self.visualizer, delivered);
        }
        delivered
    }

    pub const fn visualizer(&self) -> &Visualizer<S> {
        &self.visualizer
    }

    pub fn visualizer_mut(&mut self) -> &mut Visualizer<S> {
        &mut self.visualizer
    }

    pub fn into_visualizer(self) -> Visualizer<S> {
        self.visualizer
    }

    pub const fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Events recorded since the simulator was created.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}
