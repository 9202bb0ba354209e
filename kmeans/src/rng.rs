// ---------------------------------------------------------------------------
// Xoshiro256** PRNG + Box-Muller normal distribution
// ---------------------------------------------------------------------------

pub(crate) struct Xoshiro256ss {
    s: [u64; 4],
    has_spare: bool,
    spare: f64,
}

impl Xoshiro256ss {
    pub(crate) fn new(seed: u64) -> Self {
        // SplitMix64 to initialize state from single seed.
        let mut z = seed;
        let mut s = [0u64; 4];
        for slot in &mut s {
            z = z.wrapping_add(0x9e3779b97f4a7c15);
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
            *slot = z ^ (z >> 31);
        }
        Self {
            s,
            has_spare: false,
            spare: 0.0,
        }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let result = (self.s[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    pub(crate) fn float64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in `0..n`. `n` must be positive.
    pub(crate) fn below(&mut self, n: usize) -> usize {
        ((self.float64() * n as f64) as usize).min(n - 1)
    }

    /// Box-Muller transform to generate standard normal.
    pub(crate) fn norm_float64(&mut self) -> f64 {
        if self.has_spare {
            self.has_spare = false;
            return self.spare;
        }

        loop {
            let u1 = self.float64();
            let u2 = self.float64();
            if u1 > 0.0 {
                let mag = (-2.0 * u1.ln()).sqrt();
                let angle = 2.0 * std::f64::consts::PI * u2;
                self.spare = mag * angle.sin();
                self.has_spare = true;
                return mag * angle.cos();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_seed() {
        let mut a = Xoshiro256ss::new(42);
        let mut b = Xoshiro256ss::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = Xoshiro256ss::new(3);
        for _ in 0..1000 {
            assert!(rng.below(7) < 7);
        }
        assert_eq!(rng.below(1), 0);
    }

    #[test]
    fn normal_moments() {
        let mut rng = Xoshiro256ss::new(0);
        let n = 10000;
        let (mut sum, mut sum_sq) = (0.0, 0.0);
        for _ in 0..n {
            let v = rng.norm_float64();
            sum += v;
            sum_sq += v * v;
        }
        let mean = sum / n as f64;
        let variance = sum_sq / n as f64 - mean * mean;
        assert!(mean.abs() < 0.1, "mean should be ~0, got {mean}");
        assert!((variance - 1.0).abs() < 0.1, "variance should be ~1, got {variance}");
    }
}
