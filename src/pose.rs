use crate::{error::Error, point::Point};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Named joints of the 33-landmark body layout, keyed by their slot in the
/// provider's output.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum JointId {
    Nose = 0,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
}

impl JointId {
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }
}

pub const NUM_LANDMARKS: usize = 33;

/// One landmark as handed over by a pose provider, before validation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    pub visibility: f64,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Landmark {
    /// `None` for slots the schema does not name.
    pub kind: Option<JointId>,
    pub point: Point,
    /// Carried through but unused by every metric.
    pub z: f64,
    pub visibility: f64,
}

pub type Landmarks = [Landmark; NUM_LANDMARKS];

/// A single detected person.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    landmarks: Landmarks,
}

impl Pose {
    /// Validate a provider's raw output against the fixed schema.
    ///
    /// A wrong landmark count or a non-finite coordinate is a hard error: every
    /// metric assumes fixed indexing.
    pub fn from_raw(raw: &[RawLandmark]) -> Result<Self, Error> {
        if raw.len() != NUM_LANDMARKS {
            return Err(Error::SchemaViolation {
                expected: NUM_LANDMARKS,
                got: raw.len(),
            });
        }

        let mut landmarks: Landmarks = [Landmark::default(); NUM_LANDMARKS];
        for (i, (slot, raw)) in landmarks.iter_mut().zip(raw).enumerate() {
            *slot = Landmark {
                kind: JointId::from_usize(i),
                point: Point::new(raw.x, raw.y)?,
                z: raw.z,
                visibility: raw.visibility,
            };
        }

        Ok(Self { landmarks })
    }

    #[inline]
    pub fn landmark(&self, joint: JointId) -> &Landmark {
        &self.landmarks[joint.idx()]
    }

    pub fn landmarks(&self) -> &Landmarks {
        &self.landmarks
    }

    /// The joint's position, if its visibility is strictly above `threshold`.
    pub fn visible(&self, joint: JointId, threshold: f64) -> Option<Point> {
        let landmark = self.landmark(joint);
        if landmark.visibility > threshold {
            Some(landmark.point)
        } else {
            None
        }
    }
}
