use crate::error::Error;
use ordered_float::NotNan;
use std::ops::Sub;

/// A planar position in normalized image coordinates, x to the right and y
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, Error> {
        Ok(Self {
            x: finite(x)?,
            y: finite(y)?,
        })
    }

    /// Image-space "up", i.e. negative y.
    pub(crate) const UP: Self = Self { x: 0.0, y: -1.0 };

    pub(crate) const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    #[inline]
    pub fn x(self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(self) -> f64 {
        self.y
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Angle between two vectors in degrees, in `[0, 180]`.
    ///
    /// The cosine is clamped to `[-1, 1]` before `acos` so rounding overshoot
    /// cannot produce NaN. Returns `None` when either vector has zero length.
    pub fn angle_to(self, other: Self) -> Option<f64> {
        let denom = self.norm() * other.norm();
        if denom <= 0.0 || !denom.is_finite() {
            return None;
        }
        let cos_angle = (self.dot(other) / denom).clamp(-1.0, 1.0);
        Some(cos_angle.acos().to_degrees())
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

fn finite(value: f64) -> Result<f64, Error> {
    let value = NotNan::new(value)
        .map_err(|e| Error::ConstructNotNan(e, value))?
        .into_inner();
    if value.is_infinite() {
        Err(Error::InfiniteCoordinate(value))
    } else {
        Ok(value)
    }
}
