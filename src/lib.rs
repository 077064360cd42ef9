//! Vector-beam CRT display emulation.
//!
//! Arcade vector hardware steers an electron beam straight across the
//! phosphor instead of scanning a raster. This crate sits between an emulated
//! vector processor and a 2D renderer: it collects the segments and clip
//! rectangles the processor emits during a frame and, once per video
//! refresh, replays them as textured quads and additive lines that mimic how
//! the beam lights the tube.
//!
//! # Pipeline
//!
//! - [`VectorDisplay::clear`] starts a frame.
//! - [`VectorDisplay::append_segment`] / [`VectorDisplay::append_clip`]
//!   record commands into a bounded [`DisplayList`]. Flicker adds random
//!   beam-current noise to intensities as they are recorded.
//! - [`VectorDisplay::render`] walks the list once and feeds a
//!   [`PrimitiveSink`]: a phosphor fade sweep dims segments across the list,
//!   line starts get a bright beam spot, zero-length segments become boosted
//!   dots, and clip rectangles cull what falls outside them.
//!
//! # Coordinate System
//!
//! - Device coordinates are 16.16 fixed point; the integer part is a pixel
//!   of the [`VisibleArea`].
//! - Primitives use logical coordinates, 0.0 to 1.0 across the visible area
//!   on both axes.
//! - Intensities are 0-255 and travel in the alpha byte of packed colors.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`VectorConfig`] and the plain
//!   value types.

pub mod config;
pub mod display;
pub mod display_list;
pub mod dot_profile;
mod error;
pub mod recorder;
pub mod render;
pub mod types;

// Error types
pub use error::{Error, Result};

// Display and configuration
pub use config::VectorConfig;
pub use display::VectorDisplay;
pub use display_list::{DisplayList, DrawCommand, MAX_POINTS};
pub use dot_profile::{DotProfile, DOT_SIZE};
pub use recorder::Jitter;

// Rendering
pub use render::{
    FadeState, FrameRenderer, Primitive, PrimitiveFlags, PrimitiveList, PrimitiveSink,
    RenderSummary, TextureHandle,
};

// Types
pub use types::{Argb, Bounds, DevicePoint, Rgb, VisibleArea, MAX_PIXEL, MIN_PIXEL};
