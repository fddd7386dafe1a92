use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every random decision the engine makes: mark assignment,
/// starting turn, random computer picks and the medium coin flip.
pub trait RandomSource: Send {
    fn random_bool(&mut self) -> bool;

    /// Uniform index in `0..upper`. Callers never pass `upper == 0`.
    fn random_index(&mut self, upper: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn random_bool(&mut self) -> bool {
        self.rng.random()
    }

    fn random_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}
