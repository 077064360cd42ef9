//! Shared value types: device points, colors, screen areas and logical bounds.
//!
//! Two coordinate spaces are in play:
//! - **Device space**: 16.16 fixed-point integers as emitted by the vector
//!   processor. The integer part addresses a pixel of the visible area.
//! - **Logical space**: f32 in `[0.0, 1.0]` on both axes, the space every
//!   primitive handed to a [`PrimitiveSink`](crate::render::PrimitiveSink) uses.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Number of fraction bits in a device coordinate.
pub const FIXED_POINT_SHIFT: u32 = 16;

/// One whole pixel in device units.
pub const FIXED_POINT_ONE: i32 = 1 << FIXED_POINT_SHIFT;

/// Lowest pixel coordinate a device point can address.
pub const MIN_PIXEL: i32 = i32::MIN >> FIXED_POINT_SHIFT;

/// Highest pixel coordinate a device point can address.
pub const MAX_PIXEL: i32 = i32::MAX >> FIXED_POINT_SHIFT;

/// A point in 16.16 fixed-point device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DevicePoint {
    pub x: i32,
    pub y: i32,
}

impl DevicePoint {
    /// Creates a point from raw fixed-point coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a point at the top-left corner of pixel `(x, y)`.
    ///
    /// Returns `None` when either coordinate is outside
    /// [`MIN_PIXEL`]..=[`MAX_PIXEL`] and would not fit in 16.16.
    pub fn from_pixel(x: i32, y: i32) -> Option<Self> {
        Some(Self {
            x: x.checked_mul(FIXED_POINT_ONE)?,
            y: y.checked_mul(FIXED_POINT_ONE)?,
        })
    }
}

/// 24-bit RGB beam color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpacks the low 24 bits of `0x__RRGGBB`.
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Packs as `0x00RRGGBB`.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A beam color with its intensity carried in the alpha byte.
///
/// Packs as `0xIIRRGGBB`, which is what the additive blend stage of a
/// renderer expects: alpha scales the contribution of the RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb {
    pub alpha: u8,
    pub color: Rgb,
}

impl Argb {
    pub const fn new(alpha: u8, color: Rgb) -> Self {
        Self { alpha, color }
    }

    pub const fn packed(self) -> u32 {
        ((self.alpha as u32) << 24) | self.color.to_u32()
    }
}

/// The visible area of the emulated screen, in whole pixels, inclusive.
///
/// Both corners lie in [`MIN_PIXEL`]..=[`MAX_PIXEL`] and the maximum is never
/// below the minimum. Deserialization goes through [`VisibleArea::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVisibleArea"))]
pub struct VisibleArea {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl VisibleArea {
    /// Creates a visible area spanning `(min_x, min_y)..=(max_x, max_y)`.
    ///
    /// Fails with [`Error::InvalidArea`] when a maximum is below its minimum
    /// or a corner cannot be addressed in 16.16 device units.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Self> {
        let addressable = |v: i32| (MIN_PIXEL..=MAX_PIXEL).contains(&v);
        let corners = [min_x, min_y, max_x, max_y];
        if max_x < min_x || max_y < min_y || !corners.into_iter().all(addressable) {
            return Err(Error::InvalidArea {
                min: (min_x, min_y),
                max: (max_x, max_y),
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Creates a `width` x `height` area anchored at the origin.
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::InvalidArea {
                min: (0, 0),
                max: (width.saturating_sub(1) as i32, height.saturating_sub(1) as i32),
            });
        }
        Self::new(0, 0, width as i32 - 1, height as i32 - 1)
    }

    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    pub fn min_y(&self) -> i32 {
        self.min_y
    }

    pub fn max_x(&self) -> i32 {
        self.max_x
    }

    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Width in pixels (always at least 1).
    pub fn width(&self) -> u32 {
        (self.max_x as i64 - self.min_x as i64 + 1) as u32
    }

    /// Height in pixels (always at least 1).
    pub fn height(&self) -> u32 {
        (self.max_y as i64 - self.min_y as i64 + 1) as u32
    }
}

/// Unchecked wire form of [`VisibleArea`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawVisibleArea {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawVisibleArea> for VisibleArea {
    type Error = Error;

    fn try_from(raw: RawVisibleArea) -> Result<Self> {
        VisibleArea::new(raw.min_x, raw.min_y, raw.max_x, raw.max_y)
    }
}

/// A rectangle, or a line from `(x0, y0)` to `(x1, y1)`, in logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    /// The whole logical screen.
    pub const FULL: Bounds = Bounds {
        x0: 0.0,
        y0: 0.0,
        x1: 1.0,
        y1: 1.0,
    };

    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// A square of half extents `(half_w, half_h)` centred on `(x, y)`.
    pub fn around(x: f32, y: f32, half_w: f32, half_h: f32) -> Self {
        Self {
            x0: x - half_w,
            y0: y - half_h,
            x1: x + half_w,
            y1: y + half_h,
        }
    }

    /// True when both endpoints coincide.
    pub fn is_point(&self) -> bool {
        self.x0 == self.x1 && self.y0 == self.y1
    }

    /// True when the rectangle contains no area and no points.
    pub fn is_empty(&self) -> bool {
        !(self.x0 <= self.x1 && self.y0 <= self.y1)
    }

    /// Intersects this rectangle with [`Bounds::FULL`].
    pub fn clamp_to_screen(&self) -> Self {
        Self {
            x0: if self.x0 > 0.0 { self.x0 } else { 0.0 },
            y0: if self.y0 > 0.0 { self.y0 } else { 0.0 },
            x1: if self.x1 < 1.0 { self.x1 } else { 1.0 },
            y1: if self.y1 < 1.0 { self.y1 } else { 1.0 },
        }
    }
}

/// Maps device coordinates into logical space for one visible area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    x_scale: f32,
    y_scale: f32,
    x_offset: f32,
    y_offset: f32,
}

impl Normalizer {
    pub fn new(area: &VisibleArea) -> Self {
        let one = FIXED_POINT_ONE as f32;
        Self {
            x_scale: 1.0 / (one * area.width() as f32),
            y_scale: 1.0 / (one * area.height() as f32),
            x_offset: area.min_x() as f32 * one,
            y_offset: area.min_y() as f32 * one,
        }
    }

    /// Returns the logical `(x, y)` of a device point.
    pub fn point(&self, p: DevicePoint) -> (f32, f32) {
        (
            (p.x as f32 - self.x_offset) * self.x_scale,
            (p.y as f32 - self.y_offset) * self.y_scale,
        )
    }

    /// Returns the logical line (or rectangle) spanning two device points.
    pub fn span(&self, from: DevicePoint, to: DevicePoint) -> Bounds {
        let (x0, y0) = self.point(from);
        let (x1, y1) = self.point(to);
        Bounds { x0, y0, x1, y1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(x: i32, y: i32) -> DevicePoint {
        DevicePoint::from_pixel(x, y).unwrap()
    }

    // ==========================================================================
    // Color Tests
    // ==========================================================================

    #[test]
    fn test_rgb_packing() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x123456);
        assert_eq!(Rgb::from_u32(0xff123456), c);
        assert_eq!(c.to_string(), "#123456");
    }

    #[test]
    fn test_argb_puts_intensity_in_top_byte() {
        let packed = Argb::new(200, Rgb::WHITE).packed();
        assert_eq!(packed, 0xc8ffffff);
        assert_eq!(Argb::new(0, Rgb::WHITE).packed(), 0x00ffffff);
    }

    // ==========================================================================
    // VisibleArea Tests
    // ==========================================================================

    #[test]
    fn test_visible_area_dimensions_are_inclusive() {
        let area = VisibleArea::new(0, 0, 399, 299).unwrap();
        assert_eq!(area.width(), 400);
        assert_eq!(area.height(), 300);

        let single = VisibleArea::new(5, 5, 5, 5).unwrap();
        assert_eq!(single.width(), 1);
        assert_eq!(single.height(), 1);
    }

    #[test]
    fn test_visible_area_rejects_inverted_corners() {
        let err = VisibleArea::new(10, 0, 9, 100).unwrap_err();
        assert!(err.is_invalid_area());
        assert!(VisibleArea::with_size(0, 10).is_err());
        assert!(VisibleArea::with_size(10, 0).is_err());
    }

    #[test]
    fn test_visible_area_must_be_addressable() {
        assert!(VisibleArea::new(MIN_PIXEL, MIN_PIXEL, MAX_PIXEL, MAX_PIXEL).is_ok());
        assert!(VisibleArea::new(i32::MIN, 0, i32::MAX, 10)
            .unwrap_err()
            .is_invalid_area());
        assert!(VisibleArea::new(0, 0, MAX_PIXEL + 1, 10).is_err());
        assert!(VisibleArea::with_size(32_768, 100).is_ok());
        assert!(VisibleArea::with_size(32_769, 100).is_err());

        let widest = VisibleArea::new(MIN_PIXEL, 0, MAX_PIXEL, 0).unwrap();
        assert_eq!(widest.width(), 65_536);
    }

    // ==========================================================================
    // DevicePoint Tests
    // ==========================================================================

    #[test]
    fn test_from_pixel_shifts_into_fixed_point() {
        assert_eq!(px(1, -2), DevicePoint::new(FIXED_POINT_ONE, -2 * FIXED_POINT_ONE));
        assert_eq!(px(MAX_PIXEL, MIN_PIXEL), DevicePoint::new(0x7fff_0000, i32::MIN));
    }

    #[test]
    fn test_from_pixel_rejects_unaddressable_coordinates() {
        assert_eq!(DevicePoint::from_pixel(40_000, 0), None);
        assert_eq!(DevicePoint::from_pixel(0, MIN_PIXEL - 1), None);
        assert_eq!(DevicePoint::from_pixel(MAX_PIXEL + 1, 0), None);
    }

    // ==========================================================================
    // Normalizer Tests
    // ==========================================================================

    #[test]
    fn test_normalizer_maps_area_to_unit_square() {
        let area = VisibleArea::with_size(256, 128).unwrap();
        let n = Normalizer::new(&area);

        assert_eq!(n.point(px(0, 0)), (0.0, 0.0));
        assert_eq!(n.point(px(128, 64)), (0.5, 0.5));
        assert_eq!(n.point(px(256, 128)), (1.0, 1.0));
    }

    #[test]
    fn test_normalizer_honours_area_origin() {
        let area = VisibleArea::new(64, 32, 64 + 127, 32 + 127).unwrap();
        let n = Normalizer::new(&area);

        assert_eq!(n.point(px(64, 32)), (0.0, 0.0));
        assert_eq!(n.point(px(128, 96)), (0.5, 0.5));
        // Points left of the area land at negative logical coordinates
        let (x, _) = n.point(px(0, 32));
        assert_eq!(x, -0.5);
    }

    // ==========================================================================
    // Bounds Tests
    // ==========================================================================

    #[test]
    fn test_clamp_to_screen_only_shrinks() {
        let wide = Bounds::new(-0.5, -1.0, 1.5, 2.0).clamp_to_screen();
        assert_eq!(wide, Bounds::FULL);

        let inner = Bounds::new(0.25, 0.25, 0.75, 0.75);
        assert_eq!(inner.clamp_to_screen(), inner);
    }

    #[test]
    fn test_bounds_point_and_empty() {
        assert!(Bounds::new(0.5, 0.5, 0.5, 0.5).is_point());
        assert!(!Bounds::new(0.5, 0.5, 0.6, 0.5).is_point());
        assert!(Bounds::new(0.6, 0.0, 0.5, 1.0).is_empty());
        assert!(!Bounds::new(0.5, 0.5, 0.5, 0.5).is_empty());
        assert!(Bounds::new(f32::NAN, 0.0, 1.0, 1.0).is_empty());
    }
}
