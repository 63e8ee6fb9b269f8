//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use bsp2d::{float_types::Real, polygon::Polygon};
use nalgebra::Point2;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a solid polygon from coordinate pairs.
pub fn solid_polygon(points: &[[Real; 2]]) -> Polygon {
    Polygon::solid(points.iter().map(|p| Point2::new(p[0], p[1])).collect())
}

/// The 10x10 square centered at the origin.
pub fn origin_box() -> Polygon {
    solid_polygon(&[[-5.0, -5.0], [5.0, -5.0], [5.0, 5.0], [-5.0, 5.0]])
}

/// Concave L-shape: a 4x2 bar with a 2x2 block on its left end.
pub fn l_shape() -> Polygon {
    solid_polygon(&[
        [0.0, 0.0],
        [4.0, 0.0],
        [4.0, 2.0],
        [2.0, 2.0],
        [2.0, 4.0],
        [0.0, 4.0],
    ])
}

/// Concave U-shape: two 2x3 arms on a 6x1 base.
pub fn u_shape() -> Polygon {
    solid_polygon(&[
        [0.0, 0.0],
        [0.0, 4.0],
        [2.0, 4.0],
        [2.0, 1.0],
        [4.0, 1.0],
        [4.0, 4.0],
        [6.0, 4.0],
        [6.0, 0.0],
    ])
}

/// Axis-aligned solid box spanning `[x0, x1] x [y0, y1]`.
pub fn solid_box(x0: Real, y0: Real, x1: Real, y1: Real) -> Polygon {
    solid_polygon(&[[x0, y0], [x1, y0], [x1, y1], [x0, y1]])
}

/// Distance from `p` to the nearest point on any edge of the polygon.
/// Used to keep oracle-comparison samples away from boundaries, where the
/// ray-cast oracle and the boundary-is-solid BSP rule legitimately differ.
pub fn min_edge_distance(poly: &Polygon, p: Point2<Real>) -> Real {
    let n = poly.vertices.len();
    let mut best = Real::MAX;
    for i in 0..n {
        let a = poly.vertices[i];
        let b = poly.vertices[(i + 1) % n];
        let ab = b - a;
        let len2 = ab.norm_squared();
        let t = if len2 > 0.0 {
            ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = a + ab * t;
        best = best.min((p - closest).norm());
    }
    best
}
