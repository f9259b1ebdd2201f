use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the unexplained-variance term added before clamping.
pub trait NoiseSource {
    /// Returns a value in `[0, ceiling)`.
    fn draw(&mut self, ceiling: f64) -> f64;
}

/// Uniform noise backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomNoise<R> {
    rng: R,
}

impl<R: Rng> RandomNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomNoise<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> NoiseSource for RandomNoise<R> {
    fn draw(&mut self, ceiling: f64) -> f64 {
        if ceiling <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..ceiling)
    }
}

/// Always yields the same value, ignoring the ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn draw(&mut self, _ceiling: f64) -> f64 {
        self.0
    }
}
