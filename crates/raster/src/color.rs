//! RGBA colors used by drawing surfaces.
//!
//! Colors can be written as hex strings (`"#f00"`, `"#ff0000"`,
//! `"#ff000080"`), as one of a small set of CSS-style names (`"red"`,
//! `"purple"`, ...), or as a map with `r`, `g`, `b` and optional `a` keys.
//!
//! # Example
//!
//! ```rust
//! use raster::Color;
//!
//! let red: Color = "#ff0000".parse().unwrap();
//! assert_eq!(red, Color::RED);
//!
//! let faded = Color::RED.with_alpha(77);
//! assert_eq!(faded.a, 77);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An 8-bit-per-channel color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const PURPLE: Self = Self::rgb(128, 0, 128);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Light gray used for background grids.
    pub const GRID: Self = Self::rgb(0xe0, 0xe0, 0xe0);

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with a different alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns true if the color has no transparency.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Composites `self` over an opaque `dst` color.
    pub fn over(self, dst: Self) -> Self {
        if self.a == 255 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        let alpha = f64::from(self.a) / 255.0;
        let mix = |src: u8, dst: u8| -> u8 {
            let value = f64::from(src).mul_add(alpha, f64::from(dst) * (1.0 - alpha));
            value.round().clamp(0.0, 255.0) as u8
        };
        Self::rgb(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }

    /// Looks up one of the supported color names.
    pub fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "purple" => Self::PURPLE,
            "cyan" => Self::CYAN,
            "orange" => Self::ORANGE,
            "gray" | "grey" => Self::GRAY,
            "transparent" => Self::rgba(0, 0, 0, 0),
            _ => return None,
        };
        Some(color)
    }

    /// Formats the color as a `#rrggbb` or `#rrggbbaa` hex string.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("color string is empty")]
    Empty,
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseColorError::Empty);
        }

        let Some(hex) = raw.strip_prefix('#') else {
            return Self::named(raw).ok_or_else(|| ParseColorError::UnknownName(raw.to_string()));
        };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(raw.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        let short = |i: usize| channel(i..i + 1).map(|v| v * 17);

        let parsed = match hex.len() {
            3 => short(0)
                .zip(short(1))
                .zip(short(2))
                .map(|((r, g), b)| Self::rgb(r, g, b)),
            6 => channel(0..2)
                .zip(channel(2..4))
                .zip(channel(4..6))
                .map(|((r, g), b)| Self::rgb(r, g, b)),
            8 => channel(0..2)
                .zip(channel(2..4))
                .zip(channel(4..6))
                .zip(channel(6..8))
                .map(|(((r, g), b), a)| Self::rgba(r, g, b, a)),
            _ => None,
        };
        parsed.ok_or_else(|| ParseColorError::InvalidHex(raw.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a hex string, a color name, or an RGB map")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let mut r: Option<u8> = None;
        let mut g: Option<u8> = None;
        let mut b: Option<u8> = None;
        let mut a: Option<u8> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "r" | "red" => r = Some(map.next_value()?),
                "g" | "green" => g = Some(map.next_value()?),
                "b" | "blue" => b = Some(map.next_value()?),
                "a" | "alpha" => a = Some(map.next_value()?),
                _ => {
                    let _ = map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        match (r, g, b) {
            (Some(r), Some(g), Some(b)) => Ok(Color::rgba(r, g, b, a.unwrap_or(255))),
            _ => Err(de::Error::custom("RGB color requires r, g, b fields")),
        }
    }
}
