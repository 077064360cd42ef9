//! A vector display: the recording API plus once-per-refresh replay.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{VectorConfig, MAX_FLICKER};
use crate::display_list::{DisplayList, DrawCommand};
use crate::dot_profile::DotProfile;
use crate::error::Result;
use crate::recorder::Jitter;
use crate::render::{FrameRenderer, PrimitiveSink, RenderSummary, TextureHandle};
use crate::types::{DevicePoint, Rgb, VisibleArea};

/// One emulated vector monitor.
///
/// Every instance owns its configuration, display list, jitter RNG and dot
/// texture handle, so several monitors in one machine never share state.
///
/// # Frame protocol
///
/// The emulated vector processor drives it in a fixed order, on one thread:
///
/// 1. [`clear`](Self::clear) when it starts a new display list,
/// 2. any number of [`append_segment`](Self::append_segment) and
///    [`append_clip`](Self::append_clip) calls while it runs,
/// 3. one [`render`](Self::render) at video refresh.
///
/// # Example
///
/// ```
/// use vector_crt::{DevicePoint, PrimitiveList, Rgb, VectorConfig, VectorDisplay, VisibleArea};
///
/// let mut display = VectorDisplay::seeded(VectorConfig::default(), 1).unwrap();
/// let area = VisibleArea::with_size(400, 300).unwrap();
///
/// display.clear();
/// let p = DevicePoint::from_pixel(100, 100).unwrap();
/// display.append_segment(p.x, p.y, Rgb::WHITE, 0);
/// let q = DevicePoint::from_pixel(300, 200).unwrap();
/// display.append_segment(q.x, q.y, Rgb::WHITE, 200);
///
/// let mut sink = PrimitiveList::new();
/// let summary = display.render(&area, &mut sink);
/// assert_eq!(summary.lines, 1);
/// ```
#[derive(Debug)]
pub struct VectorDisplay<R = StdRng> {
    config: VectorConfig,
    list: DisplayList,
    jitter: Jitter<R>,
    dot_profile: DotProfile,
    dot_texture: Option<TextureHandle>,
}

impl VectorDisplay<StdRng> {
    /// Creates a display whose jitter is seeded from OS entropy.
    pub fn new(config: VectorConfig) -> Result<Self> {
        Self::with_jitter(config, Jitter::from_entropy())
    }

    /// Creates a display with reproducible jitter.
    pub fn seeded(config: VectorConfig, seed: u64) -> Result<Self> {
        Self::with_jitter(config, Jitter::seeded(seed))
    }
}

impl<R: Rng> VectorDisplay<R> {
    /// Creates a display drawing its jitter from `rng`.
    pub fn with_rng(config: VectorConfig, rng: R) -> Result<Self> {
        Self::with_jitter(config, Jitter::with_rng(rng))
    }

    fn with_jitter(config: VectorConfig, jitter: Jitter<R>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            list: DisplayList::new(),
            jitter,
            dot_profile: DotProfile::default(),
            dot_texture: None,
        })
    }

    /// Replace the beam spot bitmap (builder pattern).
    pub fn with_dot_profile(mut self, profile: DotProfile) -> Self {
        self.dot_profile = profile;
        self.dot_texture = None;
        self
    }

    // -------------------------------------------------------------------------
    // Recording
    // -------------------------------------------------------------------------

    /// Records a beam move from the previous endpoint to `(x, y)`.
    ///
    /// `x` and `y` are 16.16 fixed-point device coordinates. `intensity` is
    /// clamped to 0-255, then jittered when flicker is enabled.
    pub fn append_segment(&mut self, x: i32, y: i32, color: Rgb, intensity: i32) {
        let intensity = self.jitter.apply(intensity, self.config.flicker_level());
        self.list.push(DrawCommand::Segment {
            end: DevicePoint::new(x, y),
            color,
            intensity,
            dirty: true,
        });
    }

    /// Records a new clip rectangle with corners `(x1, y1)` and `(x2, y2)`.
    pub fn append_clip(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.list.push(DrawCommand::Clip {
            from: DevicePoint::new(x1, y1),
            to: DevicePoint::new(x2, y2),
        });
    }

    /// Starts a new display list.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Sets flicker as a percentage, clamped to 0-100. NaN is ignored.
    pub fn set_flicker(&mut self, flicker: f32) {
        if flicker.is_nan() {
            log::warn!("Ignoring NaN flicker value");
            return;
        }
        self.config.flicker = flicker.clamp(0.0, MAX_FLICKER);
        log::debug!(
            "Flicker set to {:.1}% (level {})",
            self.config.flicker,
            self.config.flicker_level()
        );
    }

    pub fn flicker(&self) -> f32 {
        self.config.flicker
    }

    /// Sets the beam width. Negative values become zero; NaN and infinity
    /// are ignored.
    pub fn set_beam(&mut self, beam_width: f32) {
        if !beam_width.is_finite() {
            log::warn!("Ignoring non-finite beam width {}", beam_width);
            return;
        }
        self.config.beam_width = beam_width.max(0.0);
        log::debug!("Beam width set to {}", self.config.beam_width);
    }

    pub fn beam(&self) -> f32 {
        self.config.beam_width
    }

    pub fn set_line_fade(&mut self, line_fade: u8) {
        self.config.line_fade = line_fade;
    }

    pub fn set_dot_boost(&mut self, dot_boost: u8) {
        self.config.dot_boost = dot_boost;
    }

    pub fn set_antialias(&mut self, antialias: bool) {
        self.config.antialias = antialias;
    }

    pub fn config(&self) -> &VectorConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Replay
    // -------------------------------------------------------------------------

    /// Replays the current display list into `sink`.
    ///
    /// The beam spot texture is uploaded through `sink` on the first call and
    /// reused afterwards; call [`reset_texture`](Self::reset_texture) when
    /// switching to a sink that does not know the cached handle.
    ///
    /// The display list is left untouched, so rendering twice without new
    /// commands produces the same primitives.
    pub fn render<S: PrimitiveSink + ?Sized>(&mut self, area: &VisibleArea, sink: &mut S) -> RenderSummary {
        let texture = match self.dot_texture {
            Some(texture) => texture,
            None => {
                let texture = sink.create_texture(&self.dot_profile);
                log::debug!("Uploaded dot texture {:?}", texture);
                self.dot_texture = Some(texture);
                texture
            }
        };

        let renderer = FrameRenderer::new(&self.config, area, texture, sink.container_scale());
        renderer.render(&self.list, sink)
    }

    /// Forgets the uploaded dot texture so the next render uploads it again.
    pub fn reset_texture(&mut self) {
        self.dot_texture = None;
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn dot_profile(&self) -> &DotProfile {
        &self.dot_profile
    }

    pub fn dot_texture(&self) -> Option<TextureHandle> {
        self.dot_texture
    }
}
