//! The animation lifecycle: transport controls, fixed-step ticking,
//! termination, and rendering.
//!
//! The host owns the schedule. It calls [`Animation::tick`] once per
//! display refresh for as long as [`Animation::wants_frame`] is true; the
//! animation never schedules itself.

use std::mem;

use kinematics::Model;
use raster::{CoordinateTransform, Surface};
use tracing::{debug, trace, warn};

use crate::clock::{AnimationClock, PlaybackState, Trail};
use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::event::{EndReason, Event};
use crate::readout::Readout;
use crate::render::{Frame, draw_frame};

/// Float slack when comparing the clock against a segment end.
const SEGMENT_EPSILON: f64 = 1e-9;

/// What a call to [`Animation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing advanced or rendered.
    Rejected,
    /// Advanced one step and rendered.
    Advanced,
    /// Reached the end of the active segment, paused, and rendered.
    SegmentCompleted,
    /// The run ended on this tick; the final frame was rendered.
    Ended(EndReason),
}

/// One loaded animation: a model plus its playback state.
///
/// # Example
///
/// ```rust
/// use kinematics::{Model, MotionKind, MotionParams};
/// use playback::{Animation, AnimationConfig, PlaybackState, TickOutcome};
/// use raster::{CoordinateTransform, RecordingSurface};
///
/// let model = Model::from_params(MotionParams::defaults(MotionKind::FreeFall)).unwrap();
/// let mut surface = RecordingSurface::new(800, 600);
/// let mut anim = Animation::new(model, CoordinateTransform::new(800.0, 600.0), AnimationConfig::default());
///
/// assert!(anim.play());
/// while anim.wants_frame() {
///     anim.tick(&mut surface);
/// }
/// assert_eq!(anim.state(), PlaybackState::Ended);
/// ```
#[derive(Debug, Clone)]
pub struct Animation {
    model: Model,
    transform: CoordinateTransform,
    config: AnimationConfig,
    state: PlaybackState,
    clock: AnimationClock,
    trail: Trail,
    segment_end: Option<f64>,
    end_reason: Option<EndReason>,
    frames_rendered: u64,
    pending: Vec<Event>,
}

impl Animation {
    /// Wraps an initialized model. Nothing is rendered until the first
    /// transport call or [`Animation::render`].
    pub fn new(model: Model, transform: CoordinateTransform, config: AnimationConfig) -> Self {
        let cadence = model
            .motion()
            .trail_cadence()
            .unwrap_or(config.trail_cadence);
        let mut anim = Self {
            trail: Trail::new(cadence, config.max_trail_samples),
            clock: AnimationClock::new(config.fixed_step()),
            model,
            transform,
            config,
            state: PlaybackState::Stopped,
            segment_end: None,
            end_reason: None,
            frames_rendered: 0,
            pending: Vec::new(),
        };
        anim.trail.record(0.0, anim.model.object().position);
        anim
    }

    /// Starts or resumes playback. Returns false when already playing or
    /// ended, so a host never schedules a second loop.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::Stopped | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                self.pending.push(Event::Played);
                debug!(anim.time = self.clock.elapsed(), "Playback started");
                true
            }
            PlaybackState::Playing | PlaybackState::Ended => false,
        }
    }

    /// Pauses playback. The next tick is rejected.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.pending.push(Event::Paused);
        debug!(anim.time = self.clock.elapsed(), "Playback paused");
        true
    }

    /// Returns to `t = 0` and the Stopped state from any state, then
    /// renders the initial frame.
    pub fn reset<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.model.initialize();
        self.clock.reset();
        self.trail.clear();
        self.trail.record(0.0, self.model.object().position);
        self.state = PlaybackState::Stopped;
        self.segment_end = None;
        self.end_reason = None;
        self.pending.push(Event::Reset);
        debug!("Animation reset");
        self.render(surface);
    }

    /// Advances one fixed step if playing, then renders exactly once.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickOutcome {
        if self.state != PlaybackState::Playing {
            trace!(anim.state = %self.state, "Tick rejected");
            return TickOutcome::Rejected;
        }

        let outcome = match self.advance_frame(surface.width(), surface.height()) {
            Some(reason) => {
                self.finish(reason);
                TickOutcome::Ended(reason)
            }
            None if self.segment_reached() => {
                self.state = PlaybackState::Paused;
                self.segment_end = None;
                self.pending.push(Event::SegmentCompleted {
                    time: self.clock.elapsed(),
                });
                debug!(anim.time = self.clock.elapsed(), "Segment completed");
                TickOutcome::SegmentCompleted
            }
            None => TickOutcome::Advanced,
        };
        self.render(surface);
        outcome
    }

    /// Advances exactly one fixed step from a paused or stopped state and
    /// renders. Leaves the animation paused; abandons any active segment.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.state == PlaybackState::Ended {
            return false;
        }
        self.state = PlaybackState::Paused;
        self.segment_end = None;
        let end = self.advance_frame(surface.width(), surface.height());
        self.pending.push(Event::Stepped {
            time: self.clock.elapsed(),
        });
        if let Some(reason) = end {
            self.finish(reason);
        }
        self.render(surface);
        true
    }

    /// Jumps to absolute time `t`, rebuilding the trail as if the run had
    /// played up to it, and renders.
    pub fn seek<S: Surface + ?Sized>(&mut self, t: f64, surface: &mut S) -> Result<()> {
        if !t.is_finite() || t < 0.0 {
            return Err(Error::InvalidSegment { start: t, end: t });
        }
        self.model.advance_to(t);
        self.clock.set(self.model.elapsed());
        self.rebuild_trail();
        self.end_reason = None;
        if self.model.is_terminal() {
            self.finish(EndReason::Analytic);
        } else if self.state == PlaybackState::Ended
            || (self.state == PlaybackState::Stopped && self.clock.elapsed() > 0.0)
        {
            self.state = PlaybackState::Paused;
        }
        debug!(anim.time = self.clock.elapsed(), "Seeked");
        self.render(surface);
        Ok(())
    }

    /// Seeks to `start` and plays until `end`, where playback pauses.
    pub fn play_segment<S: Surface + ?Sized>(
        &mut self,
        start: f64,
        end: f64,
        surface: &mut S,
    ) -> Result<()> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
            return Err(Error::InvalidSegment { start, end });
        }
        self.seek(start, surface)?;
        if self.state == PlaybackState::Ended {
            return Ok(());
        }
        self.segment_end = Some(end);
        if self.state != PlaybackState::Playing {
            self.state = PlaybackState::Playing;
            self.pending.push(Event::Played);
        }
        debug!(segment.start = start, segment.end = end, "Segment playback started");
        Ok(())
    }

    /// Draws the current state.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        draw_frame(
            surface,
            &Frame {
                model: &self.model,
                transform: &self.transform,
                trail: &self.trail,
                config: &self.config,
                ended: self.state == PlaybackState::Ended,
            },
        );
        self.frames_rendered += 1;
    }

    /// Whether the host should keep scheduling ticks.
    pub fn wants_frame(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Takes the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.pending)
    }

    pub fn readout(&self) -> Readout {
        Readout::capture(self)
    }

    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    pub const fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub const fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    pub const fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub const fn segment_end(&self) -> Option<f64> {
        self.segment_end
    }

    /// Number of frames drawn so far.
    pub const fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Advances the clock one step (bounded by the segment end), evaluates
    /// the model, samples the trail, and checks both termination sources.
    fn advance_frame(&mut self, width: u32, height: u32) -> Option<EndReason> {
        let target = self.clock.advance(self.segment_end);
        self.model.advance_to(target);
        self.clock.set(self.model.elapsed());
        self.trail
            .record(self.model.elapsed(), self.model.object().position);
        trace!(
            anim.time = self.clock.elapsed(),
            object.x = self.model.object().position.x,
            object.y = self.model.object().position.y,
            "Frame advanced"
        );

        if self.model.is_terminal() {
            Some(EndReason::Analytic)
        } else if self.hits_boundary(width, height) {
            Some(EndReason::Boundary)
        } else {
            None
        }
    }

    /// True when the object's raster footprint touches or crosses an edge.
    pub fn hits_boundary(&self, width: u32, height: u32) -> bool {
        let object = self.model.object();
        let center = self
            .transform
            .to_raster(object.position.x, object.position.y);
        let (hx, hy) = object.shape.half_extent();
        let (w, h) = (f64::from(width), f64::from(height));
        center.x - hx <= 0.0 || center.x + hx >= w || center.y - hy <= 0.0 || center.y + hy >= h
    }

    fn segment_reached(&self) -> bool {
        self.segment_end
            .is_some_and(|end| self.clock.elapsed() + SEGMENT_EPSILON >= end)
    }

    fn finish(&mut self, reason: EndReason) {
        self.trail.record_final(self.model.object().position);
        self.state = PlaybackState::Ended;
        self.segment_end = None;
        self.end_reason = Some(reason);
        let time = self.clock.elapsed();
        self.pending.push(Event::Ended { time, reason });
        match reason {
            EndReason::Analytic => debug!(anim.time = time, "Animation ended"),
            EndReason::Boundary => warn!(
                anim.time = time,
                transform.scale = self.transform.scale,
                "Object left the drawing surface; consider a smaller scale or larger padding"
            ),
        }
    }

    /// Resamples the trail from `t = 0` to the current time.
    fn rebuild_trail(&mut self) {
        self.trail.clear();
        let mut probe = self.model.clone();
        probe.initialize();
        let cadence = self.trail.cadence();
        let end = self.model.elapsed();
        let last_slot = (end / cadence + SEGMENT_EPSILON).floor();
        let capacity = self.config.max_trail_samples.max(1) as f64;
        let mut slot = (last_slot - capacity).max(0.0);
        while slot <= last_slot {
            probe.advance_to(slot * cadence);
            self.trail.record(probe.elapsed(), probe.object().position);
            slot += 1.0;
        }
    }
}
