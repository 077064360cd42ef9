//! The boundary between the frame renderer and whatever rasterizes its output.

use bitflags::bitflags;

use crate::dot_profile::DotProfile;
use crate::render::clip::clip_line;
use crate::types::{Argb, Bounds};

bitflags! {
    /// Hints attached to each primitive for the rasterizer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PrimitiveFlags: u32 {
        /// Draw with anti-aliased edges.
        const ANTIALIAS = 0b0000_0001;
        /// Blend by source alpha over the target.
        const BLEND_ALPHA = 0b0000_0010;
        /// Add the source (scaled by alpha) to the target.
        const BLEND_ADD = 0b0000_0100;
        /// Primitive belongs to a vector display.
        const VECTOR = 0b0000_1000;
        /// Primitive feeds the renderer's multi-frame vector buffer.
        const VECTOR_BUFFER = 0b0001_0000;
    }
}

/// Opaque handle to a texture created by a [`PrimitiveSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Receives the primitives of a replayed frame.
///
/// Implemented by the rasterizer backend. Coordinates are logical, `[0, 1]`
/// on both axes.
pub trait PrimitiveSink {
    /// Drop everything drawn so far.
    fn empty(&mut self);

    /// Filled rectangle.
    fn add_rect(&mut self, bounds: Bounds, color: Argb, flags: PrimitiveFlags);

    /// Rectangle textured with a previously created texture, tinted by `color`.
    fn add_quad(&mut self, bounds: Bounds, color: Argb, texture: TextureHandle, flags: PrimitiveFlags);

    /// Line from `(line.x0, line.y0)` to `(line.x1, line.y1)`.
    fn add_line(&mut self, line: Bounds, width: f32, color: Argb, flags: PrimitiveFlags);

    /// Upload the beam spot bitmap. Called once per display, before the first
    /// primitive that uses it.
    fn create_texture(&mut self, profile: &DotProfile) -> TextureHandle;

    /// Horizontal and vertical scale of the target container. Dot sizes are
    /// multiplied by it.
    fn container_scale(&self) -> (f32, f32) {
        (1.0, 1.0)
    }

    /// Clip a line to a rectangle; `None` when nothing remains visible.
    fn clip_line(&self, line: Bounds, clip: &Bounds) -> Option<Bounds> {
        clip_line(line, clip)
    }
}

/// A primitive captured by [`PrimitiveList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Rect {
        bounds: Bounds,
        color: Argb,
        flags: PrimitiveFlags,
    },
    Quad {
        bounds: Bounds,
        color: Argb,
        texture: TextureHandle,
        flags: PrimitiveFlags,
    },
    Line {
        line: Bounds,
        width: f32,
        color: Argb,
        flags: PrimitiveFlags,
    },
}

impl Primitive {
    /// The packed `0xIIRRGGBB` color of any primitive.
    pub fn color(&self) -> Argb {
        match *self {
            Primitive::Rect { color, .. }
            | Primitive::Quad { color, .. }
            | Primitive::Line { color, .. } => color,
        }
    }

    pub fn flags(&self) -> PrimitiveFlags {
        match *self {
            Primitive::Rect { flags, .. }
            | Primitive::Quad { flags, .. }
            | Primitive::Line { flags, .. } => flags,
        }
    }
}

/// A sink that simply records what it is given.
///
/// Useful for headless replay, debugging and tests.
#[derive(Debug, Clone)]
pub struct PrimitiveList {
    primitives: Vec<Primitive>,
    textures: Vec<DotProfile>,
    container_scale: (f32, f32),
}

impl PrimitiveList {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            textures: Vec::new(),
            container_scale: (1.0, 1.0),
        }
    }

    /// Report a different container scale (builder pattern).
    pub fn with_container_scale(mut self, x_scale: f32, y_scale: f32) -> Self {
        self.container_scale = (x_scale, y_scale);
        self
    }

    /// Everything recorded since the last [`PrimitiveSink::empty`].
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Only the textured quads.
    pub fn quads(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Quad { .. }))
    }

    /// Only the lines.
    pub fn lines(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
    }

    /// Textures uploaded so far, indexed by handle.
    pub fn textures(&self) -> &[DotProfile] {
        &self.textures
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Default for PrimitiveList {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimitiveSink for PrimitiveList {
    fn empty(&mut self) {
        self.primitives.clear();
    }

    fn add_rect(&mut self, bounds: Bounds, color: Argb, flags: PrimitiveFlags) {
        self.primitives.push(Primitive::Rect {
            bounds,
            color,
            flags,
        });
    }

    fn add_quad(&mut self, bounds: Bounds, color: Argb, texture: TextureHandle, flags: PrimitiveFlags) {
        self.primitives.push(Primitive::Quad {
            bounds,
            color,
            texture,
            flags,
        });
    }

    fn add_line(&mut self, line: Bounds, width: f32, color: Argb, flags: PrimitiveFlags) {
        self.primitives.push(Primitive::Line {
            line,
            width,
            color,
            flags,
        });
    }

    fn create_texture(&mut self, profile: &DotProfile) -> TextureHandle {
        self.textures.push(profile.clone());
        TextureHandle(self.textures.len() as u32 - 1)
    }

    fn container_scale(&self) -> (f32, f32) {
        self.container_scale
    }
}
