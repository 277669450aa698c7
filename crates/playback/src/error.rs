//! Errors raised by the visualizer and the animation lifecycle.

use kinematics::ParameterError;
use raster::SurfaceError;

/// Errors that can occur while loading or driving an animation.
///
/// A failed load never disturbs the animation that was already loaded, so
/// every variant is recoverable by fixing the input and retrying.
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`InvalidSurface`](Error::InvalidSurface) | Size the surface before creating the visualizer |
/// | [`InvalidScale`](Error::InvalidScale) | Use a finite scale above zero |
/// | [`InvalidParameters`](Error::InvalidParameters) | Fix the named field |
/// | [`MalformedParameters`](Error::MalformedParameters) | Fix the parameter JSON shape |
/// | [`NoAnimation`](Error::NoAnimation) | Load a description first |
/// | [`NoSolutionSteps`](Error::NoSolutionSteps) / [`StepOutOfRange`](Error::StepOutOfRange) | Check the description's steps |
/// | [`StepHasNoWindow`](Error::StepHasNoWindow) | Show the step's text without playing |
/// | [`InvalidSegment`](Error::InvalidSegment) | Use a finite window with `0 <= start < end` |
/// | [`Surface`](Error::Surface) | Frame export failed; retry or use another surface |
///
/// # Example
///
/// ```rust
/// use playback::{AnimationConfig, Error, Visualizer};
/// use raster::RecordingSurface;
///
/// let mut vis = Visualizer::new(RecordingSurface::new(800, 600), AnimationConfig::default()).unwrap();
/// assert!(matches!(vis.play_step(0), Err(Error::NoAnimation)));
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The drawing surface has a zero dimension.
    #[error("drawing surface is {width}x{height}; both dimensions must be non-zero")]
    InvalidSurface { width: u32, height: u32 },

    /// The configured scale or the description's scale hint is not a
    /// positive, finite number of pixels per meter.
    #[error("scale must be a positive finite number of pixels per meter, got {scale}")]
    InvalidScale { scale: f64 },

    /// A model parameter failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// The parameter object could not be deserialized for the subtype.
    #[error("malformed parameters for {subtype}: {source}")]
    MalformedParameters {
        subtype: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// No animation is loaded, or the legacy payload carried none.
    #[error("no animation available")]
    NoAnimation,

    /// The description has no solution steps to play.
    #[error("description has no solution steps")]
    NoSolutionSteps,

    /// A solution step index past the end of the list.
    #[error("solution step {index} out of range ({len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    /// The step has a title but no animation window.
    #[error("solution step {index} has no animation window")]
    StepHasNoWindow { index: usize },

    /// A segment window that is non-finite, negative, or empty.
    #[error("invalid segment window [{start}, {end}]")]
    InvalidSegment { start: f64, end: f64 },

    /// The surface failed to encode a frame.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// A specialized [`Result`] type for playback operations.
pub type Result<T> = std::result::Result<T, Error>;
