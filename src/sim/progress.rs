//! Score and collection progress for a single level

use serde::{Deserialize, Serialize};

use super::state::CollectibleKind;

/// Running score plus how many collectibles have been gathered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub gathered: u32,
    pub total: u32,
    pub score: u32,
}

impl Progress {
    pub fn new(total: u32) -> Self {
        Self {
            gathered: 0,
            total,
            score: 0,
        }
    }

    /// Count one collection and award its points. Returns the points added.
    pub fn record(&mut self, kind: CollectibleKind) -> u32 {
        let points = kind.points();
        self.gathered = (self.gathered + 1).min(self.total);
        self.score += points;
        points
    }

    pub fn remaining(&self) -> u32 {
        self.total - self.gathered
    }

    pub fn is_complete(&self) -> bool {
        self.gathered == self.total
    }
}
