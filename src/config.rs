//! Beam and phosphor configuration for a vector display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Beam width is expressed in 1/512ths of the logical screen.
pub const BEAM_WIDTH_DENOM: f32 = 512.0;

/// Highest accepted flicker percentage.
pub const MAX_FLICKER: f32 = 100.0;

/// Display configuration.
///
/// Owned by each [`VectorDisplay`](crate::VectorDisplay) and only changed
/// between frames.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VectorConfig {
    /// Beam width. Lines are `beam_width / 512` of the screen thick and dots
    /// are twice that across.
    pub beam_width: f32,
    /// Flicker as a percentage, 0 to 100. Zero disables both the record-time
    /// jitter and the phosphor fade sweep.
    pub flicker: f32,
    /// Intensity lost between a line's bright starting point and its body.
    pub line_fade: u8,
    /// Intensity gained by a zero-length segment.
    pub dot_boost: u8,
    /// Request anti-aliased quads and lines from the renderer.
    pub antialias: bool,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            beam_width: 1.0,
            flicker: 0.0,
            line_fade: 16,
            dot_boost: 16,
            antialias: true,
        }
    }
}

impl VectorConfig {
    /// Creates a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the beam width (builder pattern).
    pub fn with_beam_width(mut self, beam_width: f32) -> Self {
        self.beam_width = beam_width;
        self
    }

    /// Set the flicker percentage (builder pattern). Values outside 0-100
    /// are rejected by [`validate`](Self::validate).
    pub fn with_flicker(mut self, flicker: f32) -> Self {
        self.flicker = flicker;
        self
    }

    /// Set the line fade amount (builder pattern).
    pub fn with_line_fade(mut self, line_fade: u8) -> Self {
        self.line_fade = line_fade;
        self
    }

    /// Set the dot boost amount (builder pattern).
    pub fn with_dot_boost(mut self, dot_boost: u8) -> Self {
        self.dot_boost = dot_boost;
        self
    }

    /// Enable or disable anti-aliasing (builder pattern).
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// Checks that the numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.beam_width.is_finite() || self.beam_width < 0.0 {
            return Err(Error::invalid_config(format!(
                "beam width must be a finite, non-negative number (got {})",
                self.beam_width
            )));
        }
        if !(0.0..=MAX_FLICKER).contains(&self.flicker) {
            return Err(Error::invalid_config(format!(
                "flicker must be between 0 and {} percent (got {})",
                MAX_FLICKER, self.flicker
            )));
        }
        Ok(())
    }

    /// The flicker percentage scaled to the 0-255 intensity range.
    ///
    /// This is the magnitude used both for the record-time jitter and as the
    /// wrap point of the fade sweep.
    pub fn flicker_level(&self) -> i32 {
        flicker_level(self.flicker)
    }

    /// Logical thickness of a line primitive.
    pub fn line_width(&self) -> f32 {
        self.beam_width / BEAM_WIDTH_DENOM
    }
}

/// Converts a flicker percentage to an intensity level.
pub fn flicker_level(flicker: f32) -> i32 {
    if !flicker.is_finite() {
        return 0;
    }
    ((flicker * 2.55) as i32).clamp(0, 255)
}
