//! Deterministic random number generation.
//!
//! Patterns that want organic jitter draw from a seeded [`Mulberry32`] so the
//! same seed always reproduces the same scene.

/// Mulberry32: a 32-bit state generator with a multiply/xor-shift avalanche.
///
/// All arithmetic is wrapping `u32`, so the sequence is bit-identical to any
/// other mulberry32 implementation fed the same seed.
///
/// # Example
/// ```
/// use brandloom::rng::Mulberry32;
///
/// let mut rng = Mulberry32::new(1);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// assert!((value - 0.6270739405881613).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Additive step applied to the state before every draw.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Create a new RNG with the given seed.
    #[inline]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Get the next raw u32 value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    /// Get a random f64 in the range [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Get a random f64 in the range [-1, 1).
    #[inline]
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Get a random f64 in the range [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

impl Iterator for Mulberry32 {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut rng1 = Mulberry32::new(42);
        let mut rng2 = Mulberry32::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn matches_reference_sequence() {
        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
        assert_eq!(rng.next_u32(), 3_661_312_704);

        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_u32(), 1_144_304_738);
        assert_eq!(rng.next_u32(), 1_416_247);
    }

    #[test]
    fn reference_floats_for_seed_one() {
        let values: Vec<f64> = Mulberry32::new(1).take(3).collect();
        assert_eq!(values[0], 0.6270739405881613);
        assert_eq!(values[1], 0.002735721180215478);
        assert_eq!(values[2], 0.5274470399599522);
    }

    #[test]
    fn different_seeds_differ() {
        let vals1: Vec<_> = Mulberry32::new(1).take(10).collect();
        let vals2: Vec<_> = Mulberry32::new(2).take(10).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let mut a = Mulberry32::new(7);
        let mut b = Mulberry32::new(7);
        for _ in 0..5 {
            a.next_u32();
        }
        let fresh: Vec<_> = Mulberry32::new(7).take(3).collect();
        let from_b: Vec<_> = (0..3).map(|_| b.next_f64()).collect();
        assert_eq!(fresh, from_b);
    }

    #[test]
    fn f64_in_range() {
        let mut rng = Mulberry32::new(12345);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn signed_in_range() {
        let mut rng = Mulberry32::new(12345);
        for _ in 0..1000 {
            let v = rng.next_signed();
            assert!((-1.0..1.0).contains(&v));
        }
    }

    #[test]
    fn range_works() {
        let mut rng = Mulberry32::new(12345);
        for _ in 0..1000 {
            let v = rng.next_range(10.0, 20.0);
            assert!((10.0..20.0).contains(&v));
        }
    }
}
