//! Oriented 2D planes and side classification.

use crate::float_types::{Real, EPSILON};
use nalgebra::{Point2, Vector2};

/// Which side of an oriented line a point lies on, under [`EPSILON`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineSide {
    Front,
    Back,
    On,
}

/// An oriented 2D plane: the set of points satisfying `normal · p = distance`.
///
/// `normal` is expected to be unit length. The front half-space is the side
/// the normal points into (`point_side > 0`), the back half-space is the
/// opposite side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub normal: Vector2<Real>,
    pub distance: Real,
}

impl Line {
    pub fn new(normal: Vector2<Real>, distance: Real) -> Self {
        Self { normal, distance }
    }

    /// Signed distance of `p` to the line: `normal · p - distance`.
    ///
    /// This is the single source of truth for side classification; every
    /// front/back decision in the crate is a comparison on this value.
    #[inline]
    pub fn point_side(&self, p: Point2<Real>) -> Real {
        self.normal.x * p.x + self.normal.y * p.y - self.distance
    }

    /// Classifies `p` against the line under [`EPSILON`].
    #[inline]
    pub fn classify(&self, p: Point2<Real>) -> LineSide {
        let side = self.point_side(p);
        if side > EPSILON {
            LineSide::Front
        } else if side < -EPSILON {
            LineSide::Back
        } else {
            LineSide::On
        }
    }

    /// The plane through the directed edge `a -> b`, oriented so that for a
    /// counter-clockwise vertex loop the interior lies on the back side.
    ///
    /// Returns `None` when the edge is too short to carry a normal.
    pub fn from_ccw_edge(a: Point2<Real>, b: Point2<Real>) -> Option<Self> {
        let e = b - a;
        let normal = Vector2::new(e.y, -e.x).try_normalize(EPSILON)?;
        Some(Self {
            normal,
            distance: normal.x * a.x + normal.y * a.y,
        })
    }

    /// The same line with opposite orientation.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}
