//! Piecewise score bands expressed as data.

use serde::{Deserialize, Serialize};
use std::ops::{Bound, RangeBounds};

/// One `(range, score)` entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
    pub score: f64,
}

impl Band {
    /// `[min, max] -> score`
    pub fn inclusive(min: f64, max: f64, score: f64) -> Self {
        Self {
            lower: Bound::Included(min),
            upper: Bound::Included(max),
            score,
        }
    }

    /// `(-inf, max) -> score`
    pub fn below(max: f64, score: f64) -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Excluded(max),
            score,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower, self.upper).contains(&value)
    }
}

/// Ordered bands; the first one containing the value wins, `otherwise`
/// applies when none does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBands {
    pub bands: Vec<Band>,
    pub otherwise: f64,
}

impl ScoreBands {
    pub fn new(bands: Vec<Band>, otherwise: f64) -> Self {
        Self { bands, otherwise }
    }

    pub fn score(&self, value: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| band.contains(value))
            .map_or(self.otherwise, |band| band.score)
    }
}
