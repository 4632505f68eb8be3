//! RNG module - seeded uniform piece selection
//!
//! Every spawn draws independently and uniformly from the seven kinds. There
//! is no bag, so streaks and droughts are possible. The generator is a small
//! LCG so a seed fully determines a game, which keeps tests and replays exact.

use crate::types::PieceKind;

/// Linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform value in `0..bound`, mapped from the high bits
    pub fn below(&mut self, bound: u32) -> u32 {
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }

    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.below(PieceKind::ALL.len() as u32) as usize]
    }

    /// Current generator state; feeding it back into [`SimpleRng::new`] resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
