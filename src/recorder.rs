//! Record-time intensity handling: clamping and beam-current jitter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest intensity a segment can carry.
pub const MAX_INTENSITY: i32 = 0xff;

/// Random intensity perturbation applied as segments are recorded.
///
/// Real beam current is noisy; each recorded segment gets an independent
/// signed nudge proportional to its intensity and the flicker level. The RNG
/// is owned here so a seeded instance gives reproducible frames.
#[derive(Debug, Clone)]
pub struct Jitter<R = StdRng> {
    rng: R,
}

impl Jitter<StdRng> {
    /// Jitter seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Jitter with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Jitter<R> {
    /// Wraps an existing RNG.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Clamps `intensity` into 0..=255 and, when `flicker_level` is non-zero,
    /// perturbs it by up to +/- `intensity * flicker_level / 512`.
    pub fn apply(&mut self, intensity: i32, flicker_level: i32) -> u8 {
        let intensity = intensity.clamp(0, MAX_INTENSITY);
        if flicker_level == 0 || intensity == 0 {
            return intensity as u8;
        }

        let noise = 0x80 - (self.rng.random::<u8>() as i32);
        let jittered = intensity + ((intensity * noise * flicker_level) >> 16);
        jittered.clamp(0, MAX_INTENSITY) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// RNG that always yields the same byte.
    struct FixedByte(u8);

    impl RngCore for FixedByte {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0);
        }
    }

    #[test]
    fn test_clamps_without_flicker() {
        let mut jitter = Jitter::seeded(1);
        assert_eq!(jitter.apply(300, 0), 255);
        assert_eq!(jitter.apply(-20, 0), 0);
        assert_eq!(jitter.apply(128, 0), 128);
    }

    #[test]
    fn test_zero_intensity_is_never_jittered() {
        let mut jitter = Jitter::with_rng(FixedByte(0));
        assert_eq!(jitter.apply(0, 255), 0);
        assert_eq!(jitter.apply(-5, 255), 0);
    }

    #[test]
    fn test_midpoint_byte_leaves_intensity_alone() {
        // 0x80 - 0x80 == 0
        let mut jitter = Jitter::with_rng(FixedByte(0x80));
        assert_eq!(jitter.apply(200, 255), 200);
    }

    #[test]
    fn test_extreme_bytes_push_both_ways() {
        // noise = 0x80: 200 + (200 * 128 * 255) >> 16 = 200 + 99
        let mut up = Jitter::with_rng(FixedByte(0x00));
        assert_eq!(up.apply(200, 255), 255);
        assert_eq!(up.apply(100, 255), 149);

        // noise = -0x7f: 100 + (100 * -127 * 255) >> 16 = 100 - 50
        let mut down = Jitter::with_rng(FixedByte(0xff));
        assert_eq!(down.apply(100, 255), 50);
    }

    #[test]
    fn test_full_flicker_reaches_both_clamps() {
        let mut jitter = Jitter::seeded(0xC0FFEE);

        // Upward noise saturates at 255; the largest downward nudge is -127
        let bright: Vec<u8> = (0..500).map(|_| jitter.apply(255, 255)).collect();
        assert!(bright.contains(&255));
        assert!(bright.iter().any(|&v| v < 255));
        assert!(bright.iter().all(|&v| v >= 128));

        // At intensity 1 any downward noise floors at zero
        let dim: Vec<u8> = (0..500).map(|_| jitter.apply(1, 255)).collect();
        assert!(dim.contains(&0));
        assert!(dim.iter().all(|&v| v <= 2));
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = Jitter::seeded(42);
        let mut b = Jitter::seeded(42);
        let va: Vec<u8> = (0..64).map(|_| a.apply(180, 102)).collect();
        let vb: Vec<u8> = (0..64).map(|_| b.apply(180, 102)).collect();
        assert_eq!(va, vb);
        // And it actually varies
        assert!(va.iter().any(|&v| v != va[0]));
    }
}
