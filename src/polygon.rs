//! Collision polygons: winding, area, and the ray-cast containment oracle.

use crate::errors::PartitionError;
use crate::float_types::{Real, EPSILON};
use nalgebra::{Point2, Vector2};

/// A collision polygon: an ordered vertex loop with implicit wrap-around
/// edges, plus whether the enclosed region is solid.
///
/// The engine never mutates a polygon in place; ingestion (in the
/// partitioner) works on a cleaned, winding-normalized copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point2<Real>>,
    /// `true` for solid obstacles, `false` for empty space.
    pub is_solid: bool,
}

impl Polygon {
    pub fn new(vertices: Vec<Point2<Real>>, is_solid: bool) -> Self {
        Self { vertices, is_solid }
    }

    /// A solid polygon; the common case for collision geometry.
    pub fn solid(vertices: Vec<Point2<Real>>) -> Self {
        Self::new(vertices, true)
    }

    /// Shoelace sum; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> Real {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.vertices[i].x * self.vertices[j].y;
            area -= self.vertices[j].x * self.vertices[i].y;
        }
        area / 2.0
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns the polygon with counter-clockwise winding, reversing the
    /// vertex order if it was clockwise.
    pub fn ensure_ccw(mut self) -> Self {
        if !self.is_ccw() {
            self.vertices.reverse();
        }
        self
    }

    /// Ray-cast parity containment test.
    ///
    /// O(n) in the vertex count; the BSP answers the same question in
    /// logarithmic expected time. This is the reference oracle, valid for
    /// either winding. Points on the boundary are not classified reliably;
    /// callers comparing against BSP queries must stay off edges.
    pub fn contains_point(&self, p: Point2<Real>) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_cross = vj.x + (p.y - vj.y) / (vi.y - vj.y) * (vi.x - vj.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Arithmetic mean of the vertices. Good enough as an interior witness
    /// for convex polygons.
    pub(crate) fn centroid(&self) -> Point2<Real> {
        let n = self.vertices.len().max(1) as Real;
        let mut sum = Vector2::zeros();
        for v in &self.vertices {
            sum += v.coords;
        }
        Point2::from(sum / n)
    }

    /// Ingestion cleanup: finite coordinates and at least 3 distinct
    /// vertices after dropping consecutive duplicates. The area check runs
    /// later, once the partitioner has ruled out self-intersection (a
    /// bowtie also has vanishing signed area, and the self-intersection is
    /// the more useful report).
    pub(crate) fn cleaned(&self) -> Result<Self, PartitionError> {
        for v in &self.vertices {
            if !v.x.is_finite() || !v.y.is_finite() {
                return Err(PartitionError::InvalidCoordinate(v.x, v.y));
            }
        }
        let mut vertices: Vec<Point2<Real>> = Vec::with_capacity(self.vertices.len());
        for &v in &self.vertices {
            if let Some(&last) = vertices.last() {
                if (v - last).norm() <= EPSILON {
                    continue;
                }
            }
            vertices.push(v);
        }
        // The loop wraps around, so the first and last may coincide too.
        while let Some(&last) = vertices.last() {
            if vertices.len() >= 2 && (vertices[0] - last).norm() <= EPSILON {
                vertices.pop();
            } else {
                break;
            }
        }
        if vertices.len() < 3 {
            return Err(PartitionError::DegeneratePolygon(
                "fewer than 3 distinct vertices",
            ));
        }
        Ok(Self::new(vertices, self.is_solid))
    }
}
