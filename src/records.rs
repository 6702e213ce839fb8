//! Best completion time
//!
//! Lives for the lifetime of the process only: it survives level restarts
//! but is never written to storage.

use serde::{Deserialize, Serialize};

use crate::format_seconds;

/// Fastest level completion seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestTime {
    best: Option<f32>,
    /// Number of completions recorded
    pub completions: u32,
}

impl BestTime {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a time would replace the current best
    pub fn qualifies(&self, time: f32) -> bool {
        self.best.map(|best| time < best).unwrap_or(true)
    }

    /// Record a completion time. Returns true if it became the new best.
    pub fn record(&mut self, time: f32) -> bool {
        self.completions += 1;
        if !self.qualifies(time) {
            return false;
        }
        self.best = Some(time);
        true
    }

    pub fn get(&self) -> Option<f32> {
        self.best
    }

    pub fn is_set(&self) -> bool {
        self.best.is_some()
    }

    /// HUD text: one decimal place, or "--" before any completion
    pub fn display(&self) -> String {
        match self.best {
            Some(best) => format_seconds(best),
            None => "--".to_string(),
        }
    }
}
