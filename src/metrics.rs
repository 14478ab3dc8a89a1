use crate::{
    config::ExtractorConfig,
    point::Point,
    pose::{JointId::{self, *}, Pose},
};
use serde::{Deserialize, Serialize};

/// Stand-in smoothness value; no temporal model backs it.
pub const SMOOTHNESS: f64 = 0.8;

/// Geometry of one frame that had a detected pose.
///
/// A `None` field means "insufficient evidence": a required landmark was not
/// visible enough or the vectors involved were degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    pub frame_index: u64,
    pub timestamp_seconds: f64,
    /// Degrees, at the front (right) elbow.
    pub elbow_angle: Option<f64>,
    /// Degrees between the hip-to-shoulder midline and vertical.
    pub spine_lean: Option<f64>,
    /// Horizontal head to front (left) knee offset, normalized units.
    pub head_knee_alignment: Option<f64>,
    /// Degrees between the knee-to-ankle segment and horizontal.
    pub foot_direction: Option<f64>,
    /// In `[0, 1]`, 1 when hips sit directly above the ankles.
    pub balance_score: Option<f64>,
    pub smoothness: f64,
}

/// Turns one landmark set into [`FrameMetrics`]. Holds no per-shot state, so
/// one extractor can serve any number of frames on any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, pose: &Pose, frame_index: u64) -> FrameMetrics {
        let metrics = FrameMetrics {
            frame_index,
            timestamp_seconds: self.timestamp(frame_index),
            elbow_angle: self.elbow_angle(pose),
            spine_lean: self.spine_lean(pose),
            head_knee_alignment: self.head_knee_alignment(pose),
            foot_direction: self.foot_direction(pose),
            balance_score: self.balance_score(pose),
            smoothness: SMOOTHNESS,
        };
        tracing::trace!(?metrics);
        metrics
    }

    fn timestamp(&self, frame_index: u64) -> f64 {
        frame_index as f64 / self.config.target_fps
    }

    fn visible(&self, pose: &Pose, joint: JointId) -> Option<Point> {
        pose.visible(joint, self.config.visibility_threshold)
    }

    fn elbow_angle(&self, pose: &Pose) -> Option<f64> {
        let shoulder = self.visible(pose, RightShoulder)?;
        let elbow = self.visible(pose, RightElbow)?;
        let wrist = self.visible(pose, RightWrist)?;
        (shoulder - elbow).angle_to(wrist - elbow)
    }

    fn spine_lean(&self, pose: &Pose) -> Option<f64> {
        let hip_mid = self
            .visible(pose, LeftHip)?
            .midpoint(self.visible(pose, RightHip)?);
        let shoulder_mid = self
            .visible(pose, LeftShoulder)?
            .midpoint(self.visible(pose, RightShoulder)?);
        (shoulder_mid - hip_mid).angle_to(Point::UP)
    }

    fn head_knee_alignment(&self, pose: &Pose) -> Option<f64> {
        let head = self.visible(pose, Nose)?;
        let knee = self.visible(pose, LeftKnee)?;
        Some((head.x() - knee.x()).abs())
    }

    fn foot_direction(&self, pose: &Pose) -> Option<f64> {
        let ankle = self.visible(pose, LeftAnkle)?;
        let knee = self.visible(pose, LeftKnee)?;
        (ankle - knee).angle_to(Point::RIGHT)
    }

    fn balance_score(&self, pose: &Pose) -> Option<f64> {
        let hip_mid = self
            .visible(pose, LeftHip)?
            .midpoint(self.visible(pose, RightHip)?);
        let ankle_mid = self
            .visible(pose, LeftAnkle)?
            .midpoint(self.visible(pose, RightAnkle)?);
        let offset = (hip_mid.x() - ankle_mid.x()).abs();
        Some((1.0 - self.config.balance_gain * offset).clamp(0.0, 1.0))
    }
}
