//! Per-frame coaching cues for whoever draws the live overlay.

use crate::{config::CueThresholds, metrics::FrameMetrics};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cue {
    GoodElbowElevation,
    CheckElbowPosition,
    HeadOverFrontKnee,
    HeadNotOverFrontKnee,
}

impl Cue {
    pub fn message(self) -> &'static str {
        match self {
            Cue::GoodElbowElevation => "Good elbow elevation",
            Cue::CheckElbowPosition => "Check elbow position",
            Cue::HeadOverFrontKnee => "Head over front knee",
            Cue::HeadNotOverFrontKnee => "Head not over front knee",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Elbow cue first, then head cue; metrics that are absent give no cue.
pub fn live_cues(metrics: &FrameMetrics, thresholds: &CueThresholds) -> Vec<Cue> {
    let mut cues = Vec::with_capacity(2);
    if let Some(elbow) = metrics.elbow_angle {
        cues.push(
            if (thresholds.elbow_min..=thresholds.elbow_max).contains(&elbow) {
                Cue::GoodElbowElevation
            } else {
                Cue::CheckElbowPosition
            },
        );
    }
    if let Some(offset) = metrics.head_knee_alignment {
        cues.push(if offset < thresholds.head_knee_max {
            Cue::HeadOverFrontKnee
        } else {
            Cue::HeadNotOverFrontKnee
        });
    }
    cues
}
