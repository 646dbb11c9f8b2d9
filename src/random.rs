//! Turn-direction coin flips.
//!
//! Direction choice has no correctness requirement, only variety, so the
//! source is a pluggable capability injected at construction.  The default
//! is the clock-residue generator; simulation runs use a seeded WyRand so a
//! run can be replayed.  Neither is cryptographically meaningful.

use nanorand::{Rng, WyRand};

/// Source of boolean coin flips.
pub trait DirectionSource {
    /// Next coin flip.  `now_ms` is the current tick's clock reading, for
    /// generators that derive from time.
    fn next_bool(&mut self, now_ms: u64) -> bool;
}

/// Low-quality generator built from two odd-modulus clock residues.
///
/// `((now % 3) * (now % 5)) % 2` is odd only when both residues are odd,
/// so `true` comes up 2 times in 15 and the sequence is fully determined
/// by the tick timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockResidue;

impl DirectionSource for ClockResidue {
    fn next_bool(&mut self, now_ms: u64) -> bool {
        ((now_ms % 3) * (now_ms % 5)) % 2 == 1
    }
}

/// Seeded WyRand generator.
#[derive(Clone)]
pub struct SeededDirection {
    rng: WyRand,
}

impl SeededDirection {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: WyRand::new_seed(seed),
        }
    }
}

impl DirectionSource for SeededDirection {
    fn next_bool(&mut self, _now_ms: u64) -> bool {
        self.rng.generate::<bool>()
    }
}

/// Build the source selected by configuration.
pub fn from_seed(seed: Option<u64>) -> Box<dyn DirectionSource> {
    match seed {
        Some(seed) => Box::new(SeededDirection::new(seed)),
        None => Box::new(ClockResidue),
    }
}
