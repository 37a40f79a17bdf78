//! Score bookkeeping.

use std::fmt;

/// Highest score either side can reach.
pub const MAX_SCORE: u16 = 999;

/// Who scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Computer => "computer",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running totals for both sides, clamped to [`MAX_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    player: u16,
    computer: u16,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one point to `side`, returning its new score.
    pub fn increment(&mut self, side: Side) -> u16 {
        let score = match side {
            Side::Player => &mut self.player,
            Side::Computer => &mut self.computer,
        };
        *score = score.saturating_add(1).min(MAX_SCORE);
        *score
    }

    pub fn get(&self, side: Side) -> u16 {
        match side {
            Side::Player => self.player,
            Side::Computer => self.computer,
        }
    }

    pub fn player(&self) -> u16 {
        self.player
    }

    pub fn computer(&self) -> u16 {
        self.computer
    }

    pub fn reset(&mut self) {
        self.player = 0;
        self.computer = 0;
    }

    #[cfg(test)]
    pub(crate) fn with_scores(player: u16, computer: u16) -> Self {
        Self { player, computer }
    }
}
