//! Beam spot profile used to texture dots and line starting points.
//!
//! A stationary beam lights a soft round spot rather than a hard pixel. The
//! profile approximates it with the product of two half sine waves, one per
//! axis, so the centre pixel is at full brightness and the border is dark.

use std::f32::consts::PI;

use crate::error::{Error, Result};

/// Default side length of the dot bitmap, in pixels. Odd so the spot has a
/// centre pixel.
pub const DOT_SIZE: usize = 7;

/// Square ARGB intensity bitmap of a beam spot.
///
/// Generated once and immutable afterwards; cloning it is cheap enough to
/// share one profile between several displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotProfile {
    size: usize,
    /// Row-major `0xAARRGGBB` pixels, opaque grey.
    pixels: Vec<u32>,
}

impl DotProfile {
    /// Builds a `size` x `size` profile. `size` must be odd and at least 3.
    pub fn new(size: usize) -> Result<Self> {
        if size < 3 || size % 2 == 0 {
            return Err(Error::invalid_config(format!(
                "dot size must be odd and at least 3 (got {})",
                size
            )));
        }

        let profile = Self::build(size);
        log::debug!("Generated {}x{} dot profile", size, size);
        Ok(profile)
    }

    fn build(size: usize) -> Self {
        let ratio = PI / (size - 1) as f32;
        let mut pixels = Vec::with_capacity(size * size);
        for y in 0..size {
            let fy = (y as f32 * ratio).sin();
            for x in 0..size {
                let fx = (x as f32 * ratio).sin();
                let intensity = (fx * fy * 255.0).round().clamp(0.0, 255.0) as u32;
                pixels.push(0xff00_0000 | (intensity << 16) | (intensity << 8) | intensity);
            }
        }
        Self { size, pixels }
    }

    /// Side length in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The ARGB pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.size && y < self.size {
            Some(self.pixels[y * self.size + x])
        } else {
            None
        }
    }

    /// Brightness (0-255) at `(x, y)`, or `None` outside the bitmap.
    pub fn intensity(&self, x: usize, y: usize) -> Option<u8> {
        self.pixel(x, y).map(|p| p as u8)
    }
}

impl Default for DotProfile {
    fn default() -> Self {
        Self::build(DOT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_seven_by_seven() {
        let profile = DotProfile::default();
        assert_eq!(profile.size(), 7);
        assert_eq!(profile.pixels().len(), 49);
        assert_eq!(profile, DotProfile::new(DOT_SIZE).unwrap());
    }

    #[test]
    fn test_centre_is_brightest() {
        let profile = DotProfile::default();
        let centre = profile.intensity(3, 3).unwrap();
        assert_eq!(centre, 255);
        for y in 0..7 {
            for x in 0..7 {
                assert!(profile.intensity(x, y).unwrap() <= centre);
            }
        }
    }

    #[test]
    fn test_border_is_dark() {
        let profile = DotProfile::default();
        for i in 0..7 {
            assert_eq!(profile.intensity(i, 0), Some(0), "top edge at {}", i);
            assert_eq!(profile.intensity(0, i), Some(0), "left edge at {}", i);
            assert_eq!(profile.intensity(i, 6), Some(0), "bottom edge at {}", i);
            assert_eq!(profile.intensity(6, i), Some(0), "right edge at {}", i);
        }
    }

    #[test]
    fn test_falloff_is_symmetric_and_monotonic() {
        let profile = DotProfile::new(9).unwrap();
        let row: Vec<u8> = (0..9).map(|x| profile.intensity(x, 4).unwrap()).collect();

        for x in 0..4 {
            assert!(row[x] <= row[x + 1], "row should rise towards centre: {:?}", row);
            let mirrored = row[8 - x] as i32;
            assert!((row[x] as i32 - mirrored).abs() <= 1, "row not symmetric: {:?}", row);
        }
    }

    #[test]
    fn test_pixels_are_opaque_grey() {
        let profile = DotProfile::default();
        for &p in profile.pixels() {
            assert_eq!(p >> 24, 0xff);
            let (r, g, b) = ((p >> 16) & 0xff, (p >> 8) & 0xff, p & 0xff);
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let profile = DotProfile::default();
        assert_eq!(profile.pixel(7, 0), None);
        assert_eq!(profile.intensity(0, 7), None);
    }

    #[test]
    fn test_rejects_even_or_tiny_sizes() {
        assert!(DotProfile::new(8).unwrap_err().is_invalid_config());
        assert!(DotProfile::new(1).is_err());
        assert!(DotProfile::new(0).is_err());
        assert!(DotProfile::new(3).is_ok());
    }
}
