//! Run settings, layered: defaults, then the TOML file, then flags.
//!
//! ```toml
//! [animation]
//! fps = 30
//! show_forces = true
//!
//! [surface]
//! width = 1024
//! height = 768
//!
//! [run]
//! max_seconds = 30.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use playback::AnimationConfig;
use serde::{Deserialize, Serialize};

use crate::cli::RunArgs;

/// Pixel size of the headless surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Limits for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Animation time after which a still-playing run is cut off.
    pub max_seconds: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self { max_seconds: 120.0 }
    }
}

/// Everything `kinesim run` needs besides the description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub animation: AnimationConfig,
    pub surface: SurfaceSettings,
    pub run: RunSettings,
}

impl Settings {
    /// Parses a TOML settings document. Missing tables and fields keep
    /// their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    /// Resolves settings for a run: defaults, then `--config`, then flags.
    pub fn resolve(args: &RunArgs) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_flags(args);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_flags(&mut self, args: &RunArgs) {
        if let Some(fps) = args.fps {
            self.animation.fps = fps;
        }
        if let Some(max_seconds) = args.max_seconds {
            self.run.max_seconds = max_seconds;
        }
        if let Some(width) = args.width {
            self.surface.width = width;
        }
        if let Some(height) = args.height {
            self.surface.height = height;
        }
        self.animation = self.animation.clone().with_fps(self.animation.fps);
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.run.max_seconds.is_finite() && self.run.max_seconds > 0.0,
            "max_seconds must be a positive number, got {}",
            self.run.max_seconds
        );
        ensure!(
            self.animation.scale.is_finite() && self.animation.scale > 0.0,
            "animation scale must be a positive number, got {}",
            self.animation.scale
        );
        Ok(())
    }

    /// Tick budget implied by `max_seconds` at the configured frame rate.
    pub fn max_ticks(&self) -> usize {
        // Float-to-int casts saturate; validate() keeps this positive.
        (self.run.max_seconds * f64::from(self.animation.fps)).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["kinesim", "run", "p.json"];
        argv.extend_from_slice(extra);
        match crate::cli::Cli::try_parse_from(argv).unwrap().command {
            crate::cli::Command::Run(args) => args,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&args(&[])).unwrap();
        assert_eq!(settings.animation, AnimationConfig::default());
        assert_eq!(settings.surface, SurfaceSettings::default());
        assert_eq!(settings.max_ticks(), 7200);
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml(
            r#"
            [animation]
            fps = 30
            show_forces = true

            [surface]
            width = 400
            "#,
        )
        .unwrap();
        assert_eq!(settings.animation.fps, 30);
        assert!(settings.animation.show_forces);
        assert_eq!(settings.animation.scale, 50.0);
        assert_eq!(settings.surface.width, 400);
        assert_eq!(settings.surface.height, 600);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[animation]\nfps = 30\n[run]\nmax_seconds = 2.0\n").unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let settings = Settings::resolve(&args(&["--config", &path_arg, "--fps", "500"])).unwrap();
        // Flag wins, then the frame-rate clamp applies.
        assert_eq!(settings.animation.fps, 240);
        assert_eq!(settings.run.max_seconds, 2.0);
        assert_eq!(settings.max_ticks(), 480);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Settings::resolve(&args(&["--max-seconds=-1"])).is_err());
        assert!(Settings::from_toml("[animation]\nfps = \"fast\"\n").is_err());
    }
}
