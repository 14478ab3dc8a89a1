use super::*;
use crate::metrics::SMOOTHNESS;
use assert_approx_eq::assert_approx_eq;

fn frame(frame_index: u64) -> FrameMetrics {
    FrameMetrics {
        frame_index,
        timestamp_seconds: frame_index as f64 / 30.0,
        elbow_angle: None,
        spine_lean: None,
        head_knee_alignment: None,
        foot_direction: None,
        balance_score: None,
        smoothness: SMOOTHNESS,
    }
}

fn frames(n: usize) -> Vec<FrameMetrics> {
    (0..n as u64).map(|i| frame(i + 1)).collect()
}

/// A shot that scores well in every category.
fn clean_shot() -> Vec<FrameMetrics> {
    frames(12)
        .into_iter()
        .map(|m| FrameMetrics {
            elbow_angle: Some(125.0),
            spine_lean: Some(20.0),
            head_knee_alignment: Some(0.02),
            foot_direction: Some(50.0),
            balance_score: Some(0.95),
            ..m
        })
        .collect()
}

fn evaluate(metrics: &[FrameMetrics]) -> ShotEvaluation {
    evaluate_shot(metrics, &EvaluatorConfig::default())
}

fn feedback(evaluation: &ShotEvaluation, category: Category) -> &str {
    &evaluation.scores[&category].feedback
}

#[test]
fn empty_sequence() {
    let evaluation = evaluate(&[]);
    assert_eq!(evaluation.overall_score, 0.0);
    assert_eq!(evaluation.total_frames_analyzed, 0);
    assert_eq!(evaluation.scores.len(), 5);
    for category in Category::ALL {
        assert_eq!(evaluation.score(category), Some(0.0));
        assert_eq!(feedback(&evaluation, category), "No data available");
    }
    assert_eq!(
        evaluation.recommendations,
        vec!["Unable to analyze - ensure clear view of player"]
    );
}

#[test]
fn clean_shot_scores() {
    let evaluation = evaluate(&clean_shot());
    assert_eq!(evaluation.total_frames_analyzed, 12);
    assert_eq!(evaluation.score(Category::Footwork), Some(9.0));
    assert_eq!(evaluation.score(Category::HeadPosition), Some(9.0));
    assert_eq!(evaluation.score(Category::SwingControl), Some(9.0));
    assert_eq!(evaluation.score(Category::Balance), Some(9.5));
    assert_eq!(evaluation.score(Category::FollowThrough), Some(8.0));
    // (9 + 9 + 9 + 9.5 + 8) / 5 = 8.9
    assert_approx_eq!(evaluation.overall_score, 8.9);
    assert_eq!(
        evaluation.recommendations,
        vec!["Overall technique looks good! Continue practicing for consistency"]
    );
}

#[test]
fn signals_absent_throughout() {
    let evaluation = evaluate(&frames(3));
    assert_eq!(evaluation.score(Category::Footwork), Some(5.0));
    assert_eq!(
        feedback(&evaluation, Category::Footwork),
        "Could not analyze foot direction"
    );
    assert_eq!(evaluation.score(Category::HeadPosition), Some(5.0));
    assert_eq!(
        feedback(&evaluation, Category::HeadPosition),
        "Could not analyze head position"
    );
    assert_eq!(evaluation.score(Category::SwingControl), Some(5.0));
    assert_eq!(
        feedback(&evaluation, Category::SwingControl),
        "Could not analyze swing mechanics"
    );
    assert_eq!(evaluation.score(Category::Balance), Some(6.0));
    assert_eq!(
        feedback(&evaluation, Category::Balance),
        "Balance analysis limited"
    );
    assert_eq!(evaluation.score(Category::FollowThrough), Some(6.0));
    assert_eq!(
        feedback(&evaluation, Category::FollowThrough),
        "Limited follow-through data"
    );
    assert_approx_eq!(evaluation.overall_score, 5.4);
    assert_eq!(evaluation.recommendations, vec![messages::KEEP_PRACTICING]);
}

mod footwork_tests {
    use super::*;

    fn footwork(angles: &[Option<f64>]) -> CategoryScore {
        let metrics: Vec<_> = angles
            .iter()
            .enumerate()
            .map(|(i, &foot_direction)| FrameMetrics {
                foot_direction,
                ..frame(i as u64)
            })
            .collect();
        evaluate(&metrics).scores[&Category::Footwork].clone()
    }

    #[test]
    fn steady_fifty_degrees() {
        let score = footwork(&[Some(50.0), Some(50.0), Some(50.0)]);
        assert_eq!(score.score, 9.0);
        assert_eq!(score.feedback, "Foot angle: 50.0°. Good positioning");
    }

    #[test]
    fn mean_skips_missing_frames() {
        assert_eq!(footwork(&[Some(40.0), None, None, Some(40.0)]).score, 7.0);
    }

    #[test]
    fn outside_bands() {
        let score = footwork(&[Some(80.0), Some(90.0)]);
        assert_eq!(score.score, 5.0);
        assert_eq!(score.feedback, "Foot angle: 85.0°. Improve foot placement");
    }
}

mod head_position_tests {
    use super::*;

    fn head(offset: f64) -> CategoryScore {
        let metrics = vec![FrameMetrics {
            head_knee_alignment: Some(offset),
            ..frame(1)
        }];
        evaluate(&metrics).scores[&Category::HeadPosition].clone()
    }

    #[test]
    fn bands() {
        assert_eq!(head(0.02).score, 9.0);
        assert_eq!(head(0.02).feedback, "Head stability good");
        assert_eq!(head(0.04).score, 7.0);
        assert_eq!(head(0.04).feedback, "Head stability good");
        assert_eq!(head(0.05).score, 5.0);
        assert_eq!(head(0.05).feedback, "Keep head over front knee");
    }
}

mod swing_control_tests {
    use super::*;

    fn swing(elbow: f64) -> CategoryScore {
        let metrics = vec![FrameMetrics {
            elbow_angle: Some(elbow),
            ..frame(1)
        }];
        evaluate(&metrics).scores[&Category::SwingControl].clone()
    }

    #[test]
    fn bands() {
        assert_eq!(swing(110.0).score, 9.0);
        assert_eq!(swing(110.0).feedback, "Elbow positioning excellent");
        assert_eq!(swing(145.0).score, 7.0);
        assert_eq!(swing(145.0).feedback, "Elbow positioning needs work");
        assert_eq!(swing(160.0).score, 5.0);
    }
}

mod balance_tests {
    use super::*;

    fn balance(value: f64) -> CategoryScore {
        let metrics = vec![FrameMetrics {
            balance_score: Some(value),
            ..frame(1)
        }];
        evaluate(&metrics).scores[&Category::Balance].clone()
    }

    #[test]
    fn perfect() {
        let score = balance(1.0);
        assert_eq!(score.score, 10.0);
        assert_eq!(score.feedback, "Good balance");
    }

    #[test]
    fn clamps_to_one() {
        let score = balance(0.0);
        assert_eq!(score.score, 1.0);
        assert_eq!(score.feedback, "Work on stability");
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(balance(0.5555).score, 5.6);
    }

    #[test]
    fn feedback_uses_unrounded_score() {
        for value in [0.696, 0.699] {
            let score = balance(value);
            assert_eq!(score.score, 7.0);
            assert_eq!(score.feedback, "Work on stability");
        }
        assert_eq!(balance(0.75).feedback, "Good balance");
    }
}

mod follow_through_tests {
    use super::*;

    fn with_lean(mut metrics: Vec<FrameMetrics>, leans: &[(usize, f64)]) -> Vec<FrameMetrics> {
        for &(i, lean) in leans {
            metrics[i].spine_lean = Some(lean);
        }
        metrics
    }

    fn follow_through(metrics: &[FrameMetrics]) -> CategoryScore {
        evaluate(metrics).scores[&Category::FollowThrough].clone()
    }

    #[test]
    fn only_last_third_counts() {
        // frame indices with gaps, as when some frames had no pose
        let metrics: Vec<_> = (0..12).map(|i| frame(i * 3 + 1)).collect();
        let metrics = with_lean(
            metrics,
            &[
                (0, 60.0),
                (3, 70.0),
                (7, 5.0),
                (8, 15.0),
                (9, 25.0),
                (10, 18.0),
                (11, 22.0),
            ],
        );
        let score = follow_through(&metrics);
        assert_eq!(score.score, 8.0);
        assert_eq!(score.feedback, "Good completion");
    }

    #[test]
    fn lean_outside_band() {
        let metrics = with_lean(frames(12), &[(8, 40.0), (11, 40.0)]);
        let score = follow_through(&metrics);
        assert_eq!(score.score, 6.0);
        assert_eq!(score.feedback, "Focus on follow-through");
    }

    #[test]
    fn no_lean_in_last_third() {
        let metrics = with_lean(frames(12), &[(0, 20.0), (7, 20.0)]);
        let score = follow_through(&metrics);
        assert_eq!(score.score, 5.0);
        assert_eq!(score.feedback, "Focus on follow-through");
    }

    #[test]
    fn short_shot() {
        let metrics = with_lean(frames(9), &[(6, 20.0), (7, 20.0), (8, 20.0)]);
        let score = follow_through(&metrics);
        assert_eq!(score.score, 6.0);
        assert_eq!(score.feedback, "Limited follow-through data");
    }

    #[test]
    fn ten_frames_is_enough() {
        // last third of 10 starts at index 6
        let metrics = with_lean(frames(10), &[(5, 90.0), (6, 20.0)]);
        assert_eq!(follow_through(&metrics).score, 8.0);
    }
}

mod recommendation_tests {
    use super::*;

    #[test]
    fn fixed_order() {
        let metrics: Vec<_> = frames(4)
            .into_iter()
            .map(|m| FrameMetrics {
                elbow_angle: Some(100.0),
                head_knee_alignment: Some(0.08),
                spine_lean: Some(30.0),
                ..m
            })
            .collect();
        assert_eq!(
            evaluate(&metrics).recommendations,
            vec![
                messages::RAISE_ELBOW,
                messages::HEAD_OVER_KNEE,
                messages::STAY_UPRIGHT
            ]
        );
    }

    #[test]
    fn single_trigger() {
        let metrics = vec![
            FrameMetrics {
                head_knee_alignment: Some(0.1),
                elbow_angle: Some(120.0),
                ..frame(1)
            },
            FrameMetrics {
                head_knee_alignment: Some(0.04),
                ..frame(2)
            },
        ];
        assert_eq!(
            evaluate(&metrics).recommendations,
            vec![messages::HEAD_OVER_KNEE]
        );
    }

    #[test]
    fn uses_whole_shot_spine_mean() {
        // the follow-through window is fine, but the whole shot leans too far
        let metrics: Vec<_> = frames(12)
            .into_iter()
            .enumerate()
            .map(|(i, m)| FrameMetrics {
                spine_lean: Some(if i < 8 { 40.0 } else { 20.0 }),
                ..m
            })
            .collect();
        let evaluation = evaluate(&metrics);
        assert_eq!(evaluation.score(Category::FollowThrough), Some(8.0));
        assert_eq!(evaluation.recommendations, vec![messages::STAY_UPRIGHT]);
    }

    #[test]
    fn thresholds_come_from_config() {
        let metrics = vec![FrameMetrics {
            spine_lean: Some(30.0),
            ..frame(1)
        }];
        let mut config = EvaluatorConfig::default();
        config.recommendations.spine_lean_max = 35.0;
        assert_eq!(
            evaluate_shot(&metrics, &config).recommendations,
            vec![messages::KEEP_PRACTICING]
        );
    }
}

#[test]
fn deterministic_document() {
    let metrics = clean_shot();
    let first = serde_json::to_string(&evaluate(&metrics)).unwrap();
    let second = serde_json::to_string(&evaluate(&metrics)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn document_shape() {
    let value = serde_json::to_value(evaluate(&clean_shot())).unwrap();
    assert_eq!(value["total_frames_analyzed"], 12);
    assert_eq!(value["scores"]["footwork"]["score"], 9.0);
    assert_eq!(value["scores"]["follow_through"]["feedback"], "Good completion");
    assert!(value["recommendations"].is_array());

    let text = serde_json::to_string(&evaluate(&clean_shot())).unwrap();
    let order: Vec<_> = Category::ALL
        .iter()
        .map(|c| text.find(&format!("\"{}\"", c)).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));

    let parsed: ShotEvaluation = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, evaluate(&clean_shot()));
}

#[test]
fn mean_of_nothing() {
    assert_eq!(mean(std::iter::empty()), None);
    assert_eq!(mean([1.0, 2.0, 6.0].iter().copied()), Some(3.0));
}
