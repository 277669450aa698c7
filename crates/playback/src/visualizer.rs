//! The dispatcher: turns descriptions into animations on one surface and
//! forwards lifecycle events to listeners.

use kinematics::{Model, MotionKind};
use raster::{CoordinateTransform, EncodedFrame, Surface};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::adapter::normalize;
use crate::animation::{Animation, TickOutcome};
use crate::config::AnimationConfig;
use crate::description::AnimationDescription;
use crate::error::{Error, Result};
use crate::event::{Event, ListenerId, Listeners};
use crate::readout::Readout;

/// Result of a successful [`Visualizer::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    /// The family actually loaded.
    pub kind: MotionKind,
    /// Set when the requested subtype was unknown.
    pub warning: Option<String>,
    /// Pixels per meter after dynamic scaling.
    pub scale: f64,
}

/// Owns a surface and at most one active animation.
///
/// # Example
///
/// ```rust
/// use playback::{AnimationConfig, AnimationDescription, Visualizer};
/// use kinematics::MotionKind;
/// use raster::RecordingSurface;
///
/// let mut vis = Visualizer::new(RecordingSurface::new(800, 600), AnimationConfig::default()).unwrap();
/// vis.load(AnimationDescription::new(MotionKind::Projectile)).unwrap();
///
/// vis.play();
/// while vis.wants_frame() {
///     vis.tick();
/// }
/// assert!(vis.readout().unwrap().end_reason.is_some());
/// ```
pub struct Visualizer<S: Surface> {
    surface: S,
    config: AnimationConfig,
    animation: Option<Animation>,
    description: Option<AnimationDescription>,
    listeners: Listeners,
}

impl<S: Surface> Visualizer<S> {
    /// Creates a visualizer drawing onto `surface`.
    pub fn new(surface: S, config: AnimationConfig) -> Result<Self> {
        let (width, height) = (surface.width(), surface.height());
        if width == 0 || height == 0 {
            return Err(Error::InvalidSurface { width, height });
        }
        Ok(Self {
            surface,
            config,
            animation: None,
            description: None,
            listeners: Listeners::new(),
        })
    }

    /// Loads a description, replacing the current animation and rendering
    /// its first frame. On error the current animation is kept.
    pub fn load(&mut self, description: AnimationDescription) -> Result<LoadOutcome> {
        let resolved = description.resolve()?;
        if let Some(warning) = &resolved.warning {
            warn!(subtype = %description.subtype, "{warning}");
        }
        let mut params = resolved.params;

        let scale = description.scale.unwrap_or(self.config.scale);
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale { scale });
        }
        let mut transform = CoordinateTransform::new(
            f64::from(self.surface.width()),
            f64::from(self.surface.height()),
        )
        .with_padding(self.config.padding_x, self.config.padding_y)
        .with_scale(scale);

        if self.config.dynamic_scale {
            if let Some((x, y)) = params.predicted_extent()? {
                transform.apply_dynamic_scale(x, y);
            }
        }
        let (cx, cy) = transform.drawable_center();
        params.resolve_center(cx, cy);

        let motion = params
            .build()?
            .with_landing_epsilon(self.config.landing_epsilon);
        let kind = motion.kind();
        let mut animation = Animation::new(Model::new(motion), transform, self.config.clone());
        animation.render(&mut self.surface);

        self.animation = Some(animation);
        self.description = Some(description);
        info!(subtype = %kind, transform.scale = transform.scale, "Animation loaded");
        self.emit(&Event::Loaded {
            subtype: kind,
            warning: resolved.warning.clone(),
        });

        Ok(LoadOutcome {
            kind,
            warning: resolved.warning,
            scale: transform.scale,
        })
    }

    /// Normalizes a raw (possibly legacy) payload, then loads it.
    pub fn load_value(&mut self, raw: &Value) -> Result<LoadOutcome> {
        let description = normalize(raw).ok_or(Error::NoAnimation)?;
        self.load(description)
    }

    pub fn play(&mut self) -> bool {
        let started = self.animation.as_mut().is_some_and(Animation::play);
        self.flush_events();
        started
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.animation.as_mut().is_some_and(Animation::pause);
        self.flush_events();
        paused
    }

    pub fn reset(&mut self) -> Result<()> {
        let animation = self.animation.as_mut().ok_or(Error::NoAnimation)?;
        animation.reset(&mut self.surface);
        self.flush_events();
        Ok(())
    }

    pub fn step(&mut self) -> Result<bool> {
        let animation = self.animation.as_mut().ok_or(Error::NoAnimation)?;
        let stepped = animation.step(&mut self.surface);
        self.flush_events();
        Ok(stepped)
    }

    pub fn seek(&mut self, t: f64) -> Result<()> {
        let animation = self.animation.as_mut().ok_or(Error::NoAnimation)?;
        let result = animation.seek(t, &mut self.surface);
        self.flush_events();
        result
    }

    /// Drives one frame. Without an animation the tick is rejected.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(animation) = self.animation.as_mut() else {
            return TickOutcome::Rejected;
        };
        let outcome = animation.tick(&mut self.surface);
        self.flush_events();
        outcome
    }

    /// Whether the host should keep scheduling [`Visualizer::tick`].
    pub fn wants_frame(&self) -> bool {
        self.animation.as_ref().is_some_and(Animation::wants_frame)
    }

    /// Plays `[start, end]` and pauses at `end`.
    pub fn play_segment(&mut self, start: f64, end: f64) -> Result<()> {
        let animation = self.animation.as_mut().ok_or(Error::NoAnimation)?;
        let result = animation.play_segment(start, end, &mut self.surface);
        self.flush_events();
        result
    }

    /// Plays the window of solution step `index`.
    pub fn play_step(&mut self, index: usize) -> Result<()> {
        if self.animation.is_none() {
            return Err(Error::NoAnimation);
        }
        let steps = self
            .description
            .as_ref()
            .map(|d| d.solution_steps.as_slice())
            .unwrap_or_default();
        if steps.is_empty() {
            return Err(Error::NoSolutionSteps);
        }
        let step = steps.get(index).ok_or(Error::StepOutOfRange {
            index,
            len: steps.len(),
        })?;
        let (start, end) = step.animation_time.ok_or(Error::StepHasNoWindow { index })?;
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
            return Err(Error::InvalidSegment { start, end });
        }

        debug!(step.index = index, step.title = %step.title, "Solution step activated");
        let event = Event::StepActivated {
            index,
            title: step.title.clone(),
            window: (start, end),
        };
        self.emit(&event);
        self.play_segment(start, end)
    }

    /// Encodes the surface's current content.
    pub fn export_frame(&self) -> Result<EncodedFrame> {
        Ok(self.surface.encode()?)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: Fn(&Event) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Snapshot of the displayed values, if an animation is loaded.
    pub fn readout(&self) -> Option<Readout> {
        self.animation.as_ref().map(Animation::readout)
    }

    pub const fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub const fn description(&self) -> Option<&AnimationDescription> {
        self.description.as_ref()
    }

    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn flush_events(&mut self) {
        let events = self
            .animation
            .as_mut()
            .map(Animation::drain_events)
            .unwrap_or_default();
        for event in &events {
            self.emit(event);
        }
    }

    fn emit(&self, event: &Event) {
        self.listeners.emit(event);
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for Visualizer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualizer")
            .field("surface", &self.surface)
            .field("animation", &self.animation)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::PlaybackState;
    use crate::description::SolutionStep;
    use raster::RecordingSurface;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn visualizer() -> Visualizer<RecordingSurface> {
        Visualizer::new(RecordingSurface::new(800, 600), AnimationConfig::default()).unwrap()
    }

    #[test]
    fn test_zero_sized_surface_rejected() {
        let result = Visualizer::new(RecordingSurface::new(0, 600), AnimationConfig::default());
        assert!(matches!(
            result,
            Err(Error::InvalidSurface { width: 0, height: 600 })
        ));
    }

    #[test]
    fn test_load_renders_first_frame() {
        let mut vis = visualizer();
        let outcome = vis
            .load(AnimationDescription::new(MotionKind::FreeFall))
            .unwrap();
        assert_eq!(outcome.kind, MotionKind::FreeFall);
        assert!(outcome.warning.is_none());
        assert_eq!(vis.surface().frames(), 1);
        assert!(vis.surface().has_text("t=0.00s"));
    }

    #[test]
    fn test_projectile_is_scaled_to_fit() {
        let mut vis = visualizer();
        let outcome = vis
            .load(AnimationDescription::new(MotionKind::Projectile))
            .unwrap();
        // 700 px of drawable width over a 40.8 m range.
        assert!((outcome.scale - 700.0 / (400.0 / 9.8)).abs() < 1e-9);
        vis.play();
        while vis.wants_frame() {
            vis.tick();
        }
        let readout = vis.readout().unwrap();
        assert_eq!(readout.end_reason, Some(crate::event::EndReason::Analytic));
        assert_eq!(readout.position.y, 0.0);
    }

    #[test]
    fn test_circular_center_defaults_to_drawable_middle() {
        let mut vis = visualizer();
        vis.load(AnimationDescription::new(MotionKind::UniformCircular))
            .unwrap();
        let anim = vis.animation().unwrap();
        let (cx, cy) = anim.transform().drawable_center();
        let position = anim.model().object().position;
        // initial_angle 0 places the object at the rightmost point.
        assert!((position.x - (cx + 5.0)).abs() < 1e-9);
        assert!((position.y - cy).abs() < 1e-9);
    }

    #[test]
    fn test_failed_load_keeps_previous_animation() {
        let mut vis = visualizer();
        vis.load(AnimationDescription::new(MotionKind::FreeFall))
            .unwrap();
        let bad = AnimationDescription::new(MotionKind::UniformCircular)
            .with_parameters(json!({ "radius": 0 }));
        assert!(matches!(vis.load(bad), Err(Error::InvalidParameters(_))));
        assert_eq!(vis.animation().unwrap().model().kind(), MotionKind::FreeFall);
        assert_eq!(vis.surface().frames(), 1);
    }

    #[test]
    fn test_degenerate_scale_is_rejected() {
        for scale in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let mut vis = Visualizer::new(
                RecordingSurface::new(800, 600),
                AnimationConfig::default().with_scale(scale),
            )
            .unwrap();
            let result = vis.load(AnimationDescription::new(MotionKind::Projectile));
            assert!(matches!(result, Err(Error::InvalidScale { .. })), "scale {scale}");
            assert!(vis.animation().is_none());
            assert_eq!(vis.surface().frames(), 0);
        }

        let mut vis = visualizer();
        vis.load(AnimationDescription::new(MotionKind::FreeFall))
            .unwrap();
        let mut hinted = AnimationDescription::new(MotionKind::Uniform);
        hinted.scale = Some(0.0);
        assert!(matches!(
            vis.load(hinted),
            Err(Error::InvalidScale { scale }) if scale == 0.0
        ));
        assert_eq!(vis.animation().unwrap().model().kind(), MotionKind::FreeFall);
    }

    #[test]
    fn test_tiny_scale_hint_loads_and_plays() {
        let mut vis = visualizer();
        let mut hinted = AnimationDescription::new(MotionKind::Uniform);
        hinted.scale = Some(1e-300);
        let outcome = vis.load(hinted).unwrap();
        assert_eq!(outcome.scale, 1e-300);
        assert_eq!(vis.surface().frames(), 1);
        assert!(vis.surface().commands().len() < 300);

        vis.play();
        for _ in 0..10 {
            assert_eq!(vis.tick(), TickOutcome::Advanced);
        }
        assert_eq!(vis.surface().frames(), 11);
    }

    #[test]
    fn test_load_value_without_animation() {
        let mut vis = visualizer();
        assert!(matches!(
            vis.load_value(&Value::Null),
            Err(Error::NoAnimation)
        ));
        let outcome = vis.load_value(&json!({ "type": "free_fall" })).unwrap();
        assert_eq!(outcome.kind, MotionKind::FreeFall);
    }

    #[test]
    fn test_events_reach_listeners_in_order() {
        let mut vis = visualizer();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        vis.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        vis.load(AnimationDescription::new(MotionKind::FreeFall))
            .unwrap();
        vis.play();
        vis.pause();
        vis.reset().unwrap();

        let seen = seen.borrow();
        assert!(matches!(seen[0], Event::Loaded { subtype: MotionKind::FreeFall, .. }));
        assert_eq!(&seen[1..], &[Event::Played, Event::Paused, Event::Reset]);
    }

    #[test]
    fn test_play_step_errors() {
        let mut vis = visualizer();
        assert!(matches!(vis.play_step(0), Err(Error::NoAnimation)));

        vis.load(AnimationDescription::new(MotionKind::Projectile))
            .unwrap();
        assert!(matches!(vis.play_step(0), Err(Error::NoSolutionSteps)));

        let desc = AnimationDescription::new(MotionKind::Projectile).with_steps(vec![
            SolutionStep::new("Rise", 0.0, 1.0),
            SolutionStep {
                title: "Discuss".into(),
                animation_time: None,
            },
            SolutionStep::new("Backwards", 2.0, 1.0),
        ]);
        vis.load(desc).unwrap();
        assert!(matches!(
            vis.play_step(5),
            Err(Error::StepOutOfRange { index: 5, len: 3 })
        ));
        assert!(matches!(
            vis.play_step(1),
            Err(Error::StepHasNoWindow { index: 1 })
        ));
        assert!(matches!(vis.play_step(2), Err(Error::InvalidSegment { .. })));
        assert_eq!(vis.animation().unwrap().state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_play_step_runs_window() {
        let mut vis = visualizer();
        let desc = AnimationDescription::new(MotionKind::Projectile)
            .with_steps(vec![SolutionStep::new("Rise", 0.5, 1.0)]);
        vis.load(desc).unwrap();
        vis.play_step(0).unwrap();
        while vis.wants_frame() {
            vis.tick();
        }
        let anim = vis.animation().unwrap();
        assert_eq!(anim.state(), PlaybackState::Paused);
        assert!((anim.elapsed() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_export_frame_from_recording_surface() {
        let mut vis = visualizer();
        vis.load(AnimationDescription::new(MotionKind::Uniform))
            .unwrap();
        let frame = vis.export_frame().unwrap();
        assert!(!frame.mime.is_empty());
    }
}
