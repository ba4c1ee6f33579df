use std::ops::RangeInclusive;

use rand::rngs::{StdRng, ThreadRng};
use rand::Rng;

/// Source of the uniform draws used by the daily jackpot and the guess game.
/// Callers always pass a non-empty range.
pub trait Roller {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32;
}

impl Roller for ThreadRng {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.gen_range(range)
    }
}

impl Roller for StdRng {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.gen_range(range)
    }
}

impl<R: Roller + ?Sized> Roller for &mut R {
    fn roll(&mut self, range: RangeInclusive<u32>) -> u32 {
        (**self).roll(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn seeded_rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let n = rng.roll(1..=100);
            assert!((1..=100).contains(&n));
        }
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let a: Vec<u32> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| rng.roll(1..=20)).collect()
        };
        let b: Vec<u32> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| rng.roll(1..=20)).collect()
        };
        assert_eq!(a, b);
    }
}
