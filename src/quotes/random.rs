use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform index source behind every random decision in the quote views.
pub trait RandomSource {
    /// Returns an index uniformly distributed in `[0, upper)`. `upper` is
    /// always at least 1.
    fn next_index(&mut self, upper: usize) -> usize;
}

pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl RandomSource for StdRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

pub fn pick_random<'a, T>(items: &'a [T], rng: &mut impl RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}

/// Fisher-Yates over a copy of `items`.
pub fn shuffle<T: Clone>(items: &[T], rng: &mut impl RandomSource) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.next_index(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}
