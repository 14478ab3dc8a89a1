use crate::{
    error::Error,
    evaluate::bands::{Band, ScoreBands},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Everything tunable, built once at startup and passed down explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub evaluator: EvaluatorConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| Error::ReadConfig(e, path.to_path_buf()))?;
        toml::from_str(&content).map_err(|e| Error::ParseConfig(e, path.to_path_buf()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Landmarks at or below this visibility count as missing.
    pub visibility_threshold: f64,
    /// Frame rate used to turn frame indices into timestamps.
    pub target_fps: f64,
    /// Balance falls by this much per unit of hip/ankle horizontal offset.
    pub balance_gain: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
            target_fps: 30.0,
            balance_gain: 10.0,
        }
    }
}

/// Scoring rule for a category whose mean signal maps onto score bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub bands: ScoreBands,
    /// Score used when the signal never appears.
    pub fallback_score: f64,
    /// Scores at or above this get the positive feedback line.
    pub good_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceRule {
    pub gain: f64,
    pub min: f64,
    pub max: f64,
    pub fallback_score: f64,
    pub good_score: f64,
}

impl Default for BalanceRule {
    fn default() -> Self {
        Self {
            gain: 10.0,
            min: 1.0,
            max: 10.0,
            fallback_score: 6.0,
            good_score: 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowThroughRule {
    /// Spine lean bands over the last third of the shot.
    pub rule: CategoryRule,
    /// Shorter shots are not judged.
    pub min_frames: usize,
    /// Score when the last third carries no spine lean at all.
    pub no_lean_score: f64,
}

impl Default for FollowThroughRule {
    fn default() -> Self {
        Self {
            rule: CategoryRule {
                bands: ScoreBands::new(vec![Band::inclusive(15.0, 25.0, 8.0)], 6.0),
                fallback_score: 6.0,
                good_score: 7.0,
            },
            min_frames: 10,
            no_lean_score: 5.0,
        }
    }
}

/// Whole-shot means that trigger a coaching tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// Mean elbow angle below this asks for a higher front elbow.
    pub elbow_min: f64,
    /// Mean head/knee offset above this asks for the head over the knee.
    pub head_knee_max: f64,
    /// Mean spine lean above this asks for a more upright posture.
    pub spine_lean_max: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            elbow_min: 110.0,
            head_knee_max: 0.05,
            spine_lean_max: 25.0,
        }
    }
}

/// Per-frame cue limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueThresholds {
    pub elbow_min: f64,
    pub elbow_max: f64,
    pub head_knee_max: f64,
}

impl Default for CueThresholds {
    fn default() -> Self {
        Self {
            elbow_min: 110.0,
            elbow_max: 140.0,
            head_knee_max: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub footwork: CategoryRule,
    pub head_position: CategoryRule,
    pub swing_control: CategoryRule,
    pub balance: BalanceRule,
    pub follow_through: FollowThroughRule,
    pub recommendations: RecommendationThresholds,
    pub cues: CueThresholds,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            footwork: CategoryRule {
                bands: ScoreBands::new(
                    vec![
                        Band::inclusive(45.0, 60.0, 9.0),
                        Band::inclusive(35.0, 70.0, 7.0),
                    ],
                    5.0,
                ),
                fallback_score: 5.0,
                good_score: 7.0,
            },
            head_position: CategoryRule {
                bands: ScoreBands::new(vec![Band::below(0.03, 9.0), Band::below(0.05, 7.0)], 5.0),
                fallback_score: 5.0,
                good_score: 7.0,
            },
            swing_control: CategoryRule {
                bands: ScoreBands::new(
                    vec![
                        Band::inclusive(110.0, 140.0, 9.0),
                        Band::inclusive(100.0, 150.0, 7.0),
                    ],
                    5.0,
                ),
                fallback_score: 5.0,
                good_score: 8.0,
            },
            balance: BalanceRule::default(),
            follow_through: FollowThroughRule::default(),
            recommendations: RecommendationThresholds::default(),
            cues: CueThresholds::default(),
        }
    }
}
