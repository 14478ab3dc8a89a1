//! Whole-shot scoring.
//!
//! [`evaluate_shot`] reduces the ordered per-frame metrics of one shot into
//! five category scores, an overall score and coaching recommendations. It is
//! a pure function of the metrics and the [`EvaluatorConfig`].

use crate::{
    config::{CategoryRule, EvaluatorConfig},
    metrics::FrameMetrics,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

pub mod bands;

/// Declaration order is the serialization order of [`ShotEvaluation::scores`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Footwork,
    HeadPosition,
    SwingControl,
    Balance,
    FollowThrough,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Footwork,
        Category::HeadPosition,
        Category::SwingControl,
        Category::Balance,
        Category::FollowThrough,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Footwork => "footwork",
            Category::HeadPosition => "head_position",
            Category::SwingControl => "swing_control",
            Category::Balance => "balance",
            Category::FollowThrough => "follow_through",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub feedback: String,
}

impl CategoryScore {
    fn new(score: f64, feedback: impl Into<String>) -> Self {
        Self {
            score,
            feedback: feedback.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotEvaluation {
    /// Mean of the category scores, one decimal.
    pub overall_score: f64,
    pub total_frames_analyzed: usize,
    pub scores: BTreeMap<Category, CategoryScore>,
    pub recommendations: Vec<String>,
}

pub(crate) mod messages {
    pub(crate) const NO_DATA: &str = "No data available";
    pub(crate) const UNABLE_TO_ANALYZE: &str = "Unable to analyze - ensure clear view of player";
    pub(crate) const RAISE_ELBOW: &str = "Work on getting the front elbow higher during the shot";
    pub(crate) const HEAD_OVER_KNEE: &str = "Focus on keeping your head over the front knee";
    pub(crate) const STAY_UPRIGHT: &str = "Try to maintain a more upright posture during the shot";
    pub(crate) const KEEP_PRACTICING: &str =
        "Overall technique looks good! Continue practicing for consistency";
}

impl ShotEvaluation {
    /// The result for a shot with no frames at all.
    pub fn empty() -> Self {
        Self {
            overall_score: 0.0,
            total_frames_analyzed: 0,
            scores: Category::ALL
                .iter()
                .map(|&category| (category, CategoryScore::new(0.0, messages::NO_DATA)))
                .collect(),
            recommendations: vec![messages::UNABLE_TO_ANALYZE.to_owned()],
        }
    }

    pub fn score(&self, category: Category) -> Option<f64> {
        self.scores.get(&category).map(|s| s.score)
    }
}

/// Score one shot. `metrics` must be in ascending frame order; gaps are fine.
pub fn evaluate_shot(metrics: &[FrameMetrics], config: &EvaluatorConfig) -> ShotEvaluation {
    if metrics.is_empty() {
        return ShotEvaluation::empty();
    }

    let scores: BTreeMap<_, _> = Category::ALL
        .iter()
        .map(|&category| (category, score_category(category, metrics, config)))
        .collect();

    let overall = scores.values().map(|s| s.score).sum::<f64>() / scores.len() as f64;

    let evaluation = ShotEvaluation {
        overall_score: round1(overall),
        total_frames_analyzed: metrics.len(),
        scores,
        recommendations: recommendations(metrics, config),
    };
    tracing::trace!(overall_score = evaluation.overall_score, frames = metrics.len());
    evaluation
}

fn score_category(
    category: Category,
    metrics: &[FrameMetrics],
    config: &EvaluatorConfig,
) -> CategoryScore {
    match category {
        Category::Footwork => banded(
            &config.footwork,
            mean(metrics.iter().filter_map(|m| m.foot_direction)),
            "Could not analyze foot direction",
            |mean, good| {
                format!(
                    "Foot angle: {:.1}°. {}",
                    mean,
                    if good {
                        "Good positioning"
                    } else {
                        "Improve foot placement"
                    }
                )
            },
        ),
        Category::HeadPosition => banded(
            &config.head_position,
            mean(metrics.iter().filter_map(|m| m.head_knee_alignment)),
            "Could not analyze head position",
            |_, good| {
                let feedback = if good {
                    "Head stability good"
                } else {
                    "Keep head over front knee"
                };
                feedback.to_owned()
            },
        ),
        Category::SwingControl => banded(
            &config.swing_control,
            mean(metrics.iter().filter_map(|m| m.elbow_angle)),
            "Could not analyze swing mechanics",
            |_, good| {
                format!(
                    "Elbow positioning {}",
                    if good { "excellent" } else { "needs work" }
                )
            },
        ),
        Category::Balance => balance(metrics, config),
        Category::FollowThrough => follow_through(metrics, config),
    }
}

fn banded(
    rule: &CategoryRule,
    mean: Option<f64>,
    missing: &str,
    feedback: impl FnOnce(f64, bool) -> String,
) -> CategoryScore {
    match mean {
        Some(mean) => {
            let score = rule.bands.score(mean);
            CategoryScore::new(score, feedback(mean, score >= rule.good_score))
        }
        None => CategoryScore::new(rule.fallback_score, missing),
    }
}

fn balance(metrics: &[FrameMetrics], config: &EvaluatorConfig) -> CategoryScore {
    let rule = &config.balance;
    match mean(metrics.iter().filter_map(|m| m.balance_score)) {
        Some(mean) => {
            let score = (mean * rule.gain).clamp(rule.min, rule.max);
            // feedback judges the unrounded score
            let feedback = if score >= rule.good_score {
                "Good balance"
            } else {
                "Work on stability"
            };
            CategoryScore::new(round1(score), feedback)
        }
        None => CategoryScore::new(rule.fallback_score, "Balance analysis limited"),
    }
}

/// Judged on spine lean over the last third of the shot only, so this is the
/// one rule that depends on frame order.
fn follow_through(metrics: &[FrameMetrics], config: &EvaluatorConfig) -> CategoryScore {
    let rule = &config.follow_through;
    if metrics.len() < rule.min_frames {
        return CategoryScore::new(rule.rule.fallback_score, "Limited follow-through data");
    }

    let last_third = &metrics[2 * metrics.len() / 3..];
    let score = match mean(last_third.iter().filter_map(|m| m.spine_lean)) {
        Some(lean) => rule.rule.bands.score(lean),
        None => rule.no_lean_score,
    };
    let feedback = if score >= rule.rule.good_score {
        "Good completion"
    } else {
        "Focus on follow-through"
    };
    CategoryScore::new(score, feedback)
}

fn recommendations(metrics: &[FrameMetrics], config: &EvaluatorConfig) -> Vec<String> {
    let thresholds = &config.recommendations;
    let mut tips = Vec::new();

    if mean(metrics.iter().filter_map(|m| m.elbow_angle))
        .map_or(false, |elbow| elbow < thresholds.elbow_min)
    {
        tips.push(messages::RAISE_ELBOW.to_owned());
    }
    if mean(metrics.iter().filter_map(|m| m.head_knee_alignment))
        .map_or(false, |offset| offset > thresholds.head_knee_max)
    {
        tips.push(messages::HEAD_OVER_KNEE.to_owned());
    }
    if mean(metrics.iter().filter_map(|m| m.spine_lean))
        .map_or(false, |lean| lean > thresholds.spine_lean_max)
    {
        tips.push(messages::STAY_UPRIGHT.to_owned());
    }

    if tips.is_empty() {
        tips.push(messages::KEEP_PRACTICING.to_owned());
    }
    tips
}

/// Mean of the values present, `None` if there are none.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[inline]
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests;
