//! Phosphor fade sweep.
//!
//! Over one replay the roller climbs from zero by a fixed step per segment
//! and is subtracted from each segment's intensity. When it passes the
//! flicker level it snaps back to zero, giving a dimming sweep across the
//! display list that reads as phosphor decay on a flat panel.

/// Number of frames a full fade sweep takes.
pub const FADE_TIME_CONSTANT: f32 = 1.0;

/// Running fade accumulator for one replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeState {
    roller: f32,
    step: f32,
    limit: f32,
}

impl FadeState {
    /// A fresh sweep for a frame with `segment_count` segments.
    ///
    /// The step is `flicker_level / (segment_count * FADE_TIME_CONSTANT)`;
    /// it is zero when there are no segments or flicker is off.
    pub fn new(flicker_level: i32, segment_count: usize) -> Self {
        let limit = flicker_level.max(0) as f32;
        let step = if segment_count == 0 {
            0.0
        } else {
            limit / (segment_count as f32 * FADE_TIME_CONSTANT)
        };
        Self {
            roller: 0.0,
            step,
            limit,
        }
    }

    /// Current amount subtracted from intensities.
    pub fn value(&self) -> f32 {
        self.roller
    }

    /// Per-segment increment.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// `intensity` minus the current roller, truncated and clamped at zero.
    pub fn apply(&self, intensity: u8) -> u8 {
        ((intensity as f32 - self.roller) as i32).clamp(0, 255) as u8
    }

    /// Moves the sweep on by one segment, wrapping past the flicker level.
    pub fn advance(&mut self) {
        self.roller += self.step;
        if self.roller > self.limit {
            self.roller = 0.0;
        }
    }
}
