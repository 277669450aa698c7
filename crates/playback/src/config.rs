//! Rendering and playback options.

use serde::{Deserialize, Serialize};

/// Options shared by every animation a visualizer loads.
///
/// Every field has a default, so partial TOML or JSON documents
/// deserialize cleanly:
///
/// ```rust
/// use playback::AnimationConfig;
///
/// let config: AnimationConfig = serde_json::from_str(r#"{"fps": 30, "show_forces": true}"#).unwrap();
/// assert_eq!(config.fps, 30);
/// assert!(config.show_forces);
/// assert_eq!(config.scale, 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames per second; the fixed time step is `1 / fps`.
    pub fps: u32,
    /// Static scale in pixels per meter.
    pub scale: f64,
    /// Left offset of the physical origin, in pixels.
    pub padding_x: f64,
    /// Bottom offset of the physical origin, in pixels.
    pub padding_y: f64,
    /// Fit the predicted extent into the drawable area on load.
    pub dynamic_scale: bool,
    pub show_grid: bool,
    pub show_axes: bool,
    /// Resultant velocity arrow.
    pub show_velocity: bool,
    /// Horizontal and vertical velocity arrows.
    pub show_components: bool,
    /// Force diagram.
    pub show_forces: bool,
    pub show_trail: bool,
    pub show_key_points: bool,
    /// Seconds of elapsed time between trail samples.
    pub trail_cadence: f64,
    /// Oldest trail samples are dropped past this count.
    pub max_trail_samples: usize,
    /// Arrow length per unit of velocity or force, as a fraction of `scale`.
    pub vector_scale: f64,
    /// Seconds past a projectile's landing time before the run is forced to end.
    pub landing_epsilon: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            scale: raster::DEFAULT_SCALE,
            padding_x: raster::DEFAULT_PADDING,
            padding_y: raster::DEFAULT_PADDING,
            dynamic_scale: true,
            show_grid: true,
            show_axes: true,
            show_velocity: true,
            show_components: false,
            show_forces: false,
            show_trail: true,
            show_key_points: true,
            trail_cadence: 0.1,
            max_trail_samples: 2000,
            vector_scale: 0.1,
            landing_epsilon: 0.1,
        }
    }
}

impl AnimationConfig {
    /// Set the frame rate, clamped to `1..=240`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.clamp(1, 240);
        self
    }

    /// Set the static scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable the force diagram.
    pub fn with_forces(mut self, show: bool) -> Self {
        self.show_forces = show;
        self
    }

    /// Enable or disable the velocity component arrows.
    pub fn with_components(mut self, show: bool) -> Self {
        self.show_components = show;
        self
    }

    /// Fixed time step in seconds.
    pub fn fixed_step(&self) -> f64 {
        kinematics::fps(self.fps)
    }
}
