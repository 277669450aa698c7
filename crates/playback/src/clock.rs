//! Playback state machine, fixed-step clock, and trail sampling.

use std::collections::VecDeque;
use std::fmt;

use kinematics::Point;
use serde::{Deserialize, Serialize};

/// Transport state of an animation.
///
/// ```text
/// Stopped --play--> Playing --pause--> Paused --play--> Playing
/// Playing --terminal or boundary--> Ended
/// any --reset--> Stopped
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Ended,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Ended => "ended",
        })
    }
}

/// Elapsed animation time, advanced in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
    fixed_step: f64,
}

impl AnimationClock {
    pub fn new(fixed_step: f64) -> Self {
        Self {
            elapsed: 0.0,
            fixed_step,
        }
    }

    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub const fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    /// Advances one step, never past `limit`. Returns the new elapsed time.
    pub fn advance(&mut self, limit: Option<f64>) -> f64 {
        let next = self.elapsed + self.fixed_step;
        self.elapsed = limit.map_or(next, |limit| next.min(limit.max(self.elapsed)));
        self.elapsed
    }

    /// Moves the clock to an absolute time.
    pub fn set(&mut self, elapsed: f64) {
        self.elapsed = elapsed.max(0.0);
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Positions sampled at a fixed cadence of elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    samples: VecDeque<Point>,
    cadence: f64,
    max_samples: usize,
    next_sample_at: f64,
}

impl Trail {
    pub fn new(cadence: f64, max_samples: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            cadence: if cadence.is_finite() && cadence > 0.0 { cadence } else { 0.1 },
            max_samples: max_samples.max(1),
            next_sample_at: 0.0,
        }
    }

    pub const fn cadence(&self) -> f64 {
        self.cadence
    }

    /// Records `position` if the cadence boundary at or before `t` has not
    /// been sampled yet. Returns true when a sample was appended.
    pub fn record(&mut self, t: f64, position: Point) -> bool {
        // Tolerate float drift from summing fixed steps.
        if t + 1e-9 < self.next_sample_at {
            return false;
        }
        self.push(position);
        let slots = ((t + 1e-9) / self.cadence).floor() + 1.0;
        self.next_sample_at = slots * self.cadence;
        true
    }

    /// Appends the final position of a run regardless of cadence, unless it
    /// is already the newest sample. Returns true when a sample was appended.
    pub fn record_final(&mut self, position: Point) -> bool {
        if self.samples.back() == Some(&position) {
            return false;
        }
        self.push(position);
        true
    }

    fn push(&mut self, position: Point) {
        if self.samples.len() == self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(position);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.next_sample_at = 0.0;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&Point> {
        self.samples.back()
    }
}
