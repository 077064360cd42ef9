//! Frame replay: turns a display list into beam primitives.
//!
//! One replay walks the list once, in order, threading a [`ReplayState`]
//! through every command:
//!
//! - **Clip commands** replace the active clip rectangle (never wider than
//!   the screen).
//! - **Segments** run from the previous endpoint to their own. Each one is
//!   dimmed by the fade sweep, clipped, then drawn either as a dot (zero
//!   length) or as a bright beam-start spot followed by a slightly dimmer
//!   line.
//!
//! The endpoint cursor advances on every segment, drawn or not.

pub mod clip;
pub mod fade;
pub mod sink;

pub use clip::clip_line;
pub use fade::{FadeState, FADE_TIME_CONSTANT};
pub use sink::{Primitive, PrimitiveFlags, PrimitiveList, PrimitiveSink, TextureHandle};

use crate::config::{VectorConfig, BEAM_WIDTH_DENOM};
use crate::display_list::{DisplayList, DrawCommand};
use crate::types::{Argb, Bounds, DevicePoint, Normalizer, Rgb, VisibleArea};

/// Background drawn under every frame. Opaque black, alpha blended into the
/// vector buffer so the rasterizer can keep its own phosphor trail.
pub const BACKGROUND: Argb = Argb::new(0xff, Rgb::BLACK);

/// What a replay did. Every replay handles the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    /// Segment commands walked.
    pub segments: usize,
    /// Clip commands walked.
    pub clips: usize,
    /// Zero-length segments drawn as dots.
    pub dots: usize,
    /// Segments drawn as lines.
    pub lines: usize,
    /// Segments skipped because their intensity reached zero.
    pub faded_out: usize,
    /// Segments skipped because they lay outside the clip rectangle.
    pub clipped: usize,
}

/// Accumulator threaded through one replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayState {
    /// Active clip rectangle, logical space.
    pub clip: Bounds,
    pub fade: FadeState,
    /// Endpoint of the previous segment, device space.
    pub last_point: DevicePoint,
}

impl ReplayState {
    fn new(fade: FadeState) -> Self {
        Self {
            clip: Bounds::FULL,
            fade,
            last_point: DevicePoint::default(),
        }
    }
}

/// Per-frame replay settings derived from the configuration and screen.
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    normalizer: Normalizer,
    texture: TextureHandle,
    half_beam: (f32, f32),
    line_width: f32,
    flicker_level: i32,
    line_fade: u8,
    dot_boost: u8,
    flags: PrimitiveFlags,
}

impl FrameRenderer {
    /// Prepares a replay onto `area` using the beam spot `texture`.
    ///
    /// `container_scale` stretches the dot and beam-start quads per axis.
    pub fn new(
        config: &VectorConfig,
        area: &VisibleArea,
        texture: TextureHandle,
        container_scale: (f32, f32),
    ) -> Self {
        let mut flags = PrimitiveFlags::BLEND_ADD | PrimitiveFlags::VECTOR;
        if config.antialias {
            flags |= PrimitiveFlags::ANTIALIAS;
        }

        Self {
            normalizer: Normalizer::new(area),
            texture,
            half_beam: (
                config.beam_width * container_scale.0 / BEAM_WIDTH_DENOM,
                config.beam_width * container_scale.1 / BEAM_WIDTH_DENOM,
            ),
            line_width: config.line_width(),
            flicker_level: config.flicker_level(),
            line_fade: config.line_fade,
            dot_boost: config.dot_boost,
            flags,
        }
    }

    /// Replays `list` into `sink`.
    pub fn render<S: PrimitiveSink + ?Sized>(&self, list: &DisplayList, sink: &mut S) -> RenderSummary {
        let fade = FadeState::new(self.flicker_level, list.segment_count());
        log::trace!(
            "Replaying {} commands ({} segments), fade step {:.4}",
            list.len(),
            list.segment_count(),
            fade.step()
        );

        sink.empty();
        sink.add_rect(
            Bounds::FULL,
            BACKGROUND,
            PrimitiveFlags::BLEND_ALPHA | PrimitiveFlags::VECTOR_BUFFER,
        );

        let mut summary = RenderSummary::default();
        list.iter().fold(ReplayState::new(fade), |state, command| {
            self.step(state, command, sink, &mut summary)
        });

        log::trace!("Frame done: {:?}", summary);
        summary
    }

    /// Applies one command and returns the updated state.
    pub fn step<S: PrimitiveSink + ?Sized>(
        &self,
        mut state: ReplayState,
        command: &DrawCommand,
        sink: &mut S,
        summary: &mut RenderSummary,
    ) -> ReplayState {
        match *command {
            DrawCommand::Clip { from, to } => {
                summary.clips += 1;
                state.clip = self.normalizer.span(from, to).clamp_to_screen();
            }
            DrawCommand::Segment {
                end,
                color,
                intensity,
                ..
            } => {
                summary.segments += 1;
                let line = self.normalizer.span(state.last_point, end);
                let intensity = state.fade.apply(intensity);
                state.fade.advance();
                state.last_point = end;

                if intensity == 0 {
                    summary.faded_out += 1;
                    return state;
                }
                let Some(line) = sink.clip_line(line, &state.clip) else {
                    summary.clipped += 1;
                    return state;
                };

                if line.is_point() {
                    summary.dots += 1;
                    self.draw_dot(line, color, intensity, sink);
                } else {
                    summary.lines += 1;
                    self.draw_line(line, color, intensity, sink);
                }
            }
        }
        state
    }

    fn draw_dot<S: PrimitiveSink + ?Sized>(&self, at: Bounds, color: Rgb, intensity: u8, sink: &mut S) {
        let boosted = intensity.saturating_add(self.dot_boost);
        sink.add_quad(
            self.spot(at.x0, at.y0),
            Argb::new(boosted, color),
            self.texture,
            self.flags,
        );
    }

    fn draw_line<S: PrimitiveSink + ?Sized>(&self, line: Bounds, color: Rgb, intensity: u8, sink: &mut S) {
        // The beam dwells at the start before it moves, so that end is brighter.
        sink.add_quad(
            self.spot(line.x0, line.y0),
            Argb::new(intensity, color),
            self.texture,
            self.flags,
        );
        let body = intensity.saturating_sub(self.line_fade);
        sink.add_line(line, self.line_width, Argb::new(body, color), self.flags);
    }

    fn spot(&self, x: f32, y: f32) -> Bounds {
        Bounds::around(x, y, self.half_beam.0, self.half_beam.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> VisibleArea {
        VisibleArea::with_size(256, 256).unwrap()
    }

    fn segment(x: i32, y: i32, intensity: u8) -> DrawCommand {
        DrawCommand::Segment {
            end: DevicePoint::from_pixel(x, y).unwrap(),
            color: Rgb::WHITE,
            intensity,
            dirty: true,
        }
    }

    fn renderer(config: &VectorConfig) -> FrameRenderer {
        FrameRenderer::new(config, &area(), TextureHandle(7), (1.0, 1.0))
    }

    #[test]
    fn test_flags_follow_antialias_setting() {
        let on = renderer(&VectorConfig::default());
        assert!(on.flags.contains(PrimitiveFlags::ANTIALIAS | PrimitiveFlags::BLEND_ADD));

        let off = renderer(&VectorConfig::default().with_antialias(false));
        assert!(!off.flags.contains(PrimitiveFlags::ANTIALIAS));
        assert!(off.flags.contains(PrimitiveFlags::VECTOR));
    }

    #[test]
    fn test_half_beam_scales_with_container() {
        let config = VectorConfig::default().with_beam_width(2.0);
        let r = FrameRenderer::new(&config, &area(), TextureHandle(0), (1.0, 0.5));
        assert_eq!(r.half_beam, (2.0 / 512.0, 1.0 / 512.0));
    }

    #[test]
    fn test_step_advances_cursor_even_when_faded_out() {
        let config = VectorConfig::default();
        let r = renderer(&config);
        let mut sink = PrimitiveList::new();
        let mut summary = RenderSummary::default();

        let state = ReplayState::new(FadeState::new(0, 1));
        let state = r.step(state, &segment(10, 20, 0), &mut sink, &mut summary);

        assert_eq!(state.last_point, DevicePoint::from_pixel(10, 20).unwrap());
        assert!(sink.is_empty());
        assert_eq!(summary.faded_out, 1);
    }

    #[test]
    fn test_step_clip_is_clamped_to_screen() {
        let r = renderer(&VectorConfig::default());
        let mut sink = PrimitiveList::new();
        let mut summary = RenderSummary::default();

        let clip = DrawCommand::Clip {
            from: DevicePoint::from_pixel(-64, 64).unwrap(),
            to: DevicePoint::from_pixel(128, 512).unwrap(),
        };
        let state = r.step(ReplayState::new(FadeState::new(0, 0)), &clip, &mut sink, &mut summary);

        assert_eq!(state.clip, Bounds::new(0.0, 0.25, 0.5, 1.0));
        assert_eq!(summary.clips, 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_dot_boost_saturates() {
        let config = VectorConfig::default().with_dot_boost(100);
        let r = renderer(&config);
        let mut sink = PrimitiveList::new();
        let mut summary = RenderSummary::default();

        let state = ReplayState::new(FadeState::new(0, 1));
        r.step(state, &segment(0, 0, 200), &mut sink, &mut summary);

        assert_eq!(summary.dots, 1);
        assert_eq!(sink.primitives()[0].color().alpha, 255);
    }
}
