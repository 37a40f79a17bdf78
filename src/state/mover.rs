//! Computer move selection.
//!
//! The computer is deliberately naive: it picks any open cell with equal
//! probability and never looks ahead.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks the computer's next cell.
pub trait MoveSelector {
    /// Choose one of `open_cells`. The slice is never empty when called by a
    /// session.
    fn choose_move(&mut self, open_cells: &[usize]) -> usize;
}

/// Draw one element of `open_cells` uniformly at random.
///
/// # Panics
///
/// Panics if `open_cells` is empty.
pub fn choose_move<R: Rng + ?Sized>(open_cells: &[usize], rng: &mut R) -> usize {
    assert!(
        !open_cells.is_empty(),
        "computer asked to move with no open cells"
    );
    open_cells[rng.random_range(0..open_cells.len())]
}

/// Uniform random opponent backed by a seeded [`StdRng`].
///
/// Seeded once at construction and never reseeded.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
    seed: u64,
}

impl RandomMover {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the sub-second part of the wall clock.
    pub fn from_time() -> Self {
        let seed = u64::from(chrono::Utc::now().timestamp_subsec_nanos());
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MoveSelector for RandomMover {
    fn choose_move(&mut self, open_cells: &[usize]) -> usize {
        choose_move(open_cells, &mut self.rng)
    }
}
