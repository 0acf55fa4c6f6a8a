//! RNG module - uniform random shape selection
//!
//! Every spawn draws one of the seven shapes with equal probability. There is
//! no bag or history: consecutive draws are independent.
//!
//! The picker can be seeded so tests and replays get the same sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::ShapeKind;

/// Picks the shape of the next spawned piece
#[derive(Debug, Clone)]
pub struct ShapePicker {
    rng: StdRng,
}

impl ShapePicker {
    /// Create a picker with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a picker seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw the next shape
    pub fn pick(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())]
    }
}

impl Default for ShapePicker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picker_deterministic() {
        let mut a = ShapePicker::seeded(12345);
        let mut b = ShapePicker::seeded(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(a.pick(), b.pick());
        }
    }

    #[test]
    fn test_picker_reaches_every_shape() {
        let mut picker = ShapePicker::seeded(1);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = picker.pick();
            let idx = ShapeKind::ALL.iter().position(|&k| k == kind).unwrap();
            counts[idx] += 1;
        }

        // Uniform over 7 gives ~1000 each; anything far off means a skewed table.
        for (kind, &count) in ShapeKind::ALL.iter().zip(counts.iter()) {
            assert!(count > 700 && count < 1300, "{:?} drawn {} times", kind, count);
        }
    }
}
