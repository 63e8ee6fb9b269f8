//! Read-only queries over a built tree.
//!
//! Both queries are pure functions of an immutable tree; any number of
//! readers may run them concurrently on a shared tree.

use crate::bsp::node::{BspNode, BspTree};
use crate::float_types::{Real, EPSILON};
use crate::line::Line;
use nalgebra::{Point2, Vector2};

/// Whether `point` lies in solid space.
///
/// Points exactly on a splitting plane descend into the back child, so a
/// point on the boundary of a solid region counts as solid. Out-of-range
/// indices answer `false`, the conservative empty-space default.
pub fn point_in_tree(tree: &BspTree, point: Point2<Real>) -> bool {
    let mut index = tree.root_index();
    // One step per node at most; a longer walk means a malformed tree.
    for _ in 0..=tree.nodes().len() {
        match tree.node(index) {
            None => return false,
            Some(BspNode::Leaf { is_solid, .. }) => return *is_solid,
            Some(BspNode::Split {
                normal_x,
                normal_y,
                distance,
                front_index,
                back_index,
            }) => {
                let plane = Line::new(Vector2::new(*normal_x, *normal_y), *distance);
                index = if plane.point_side(point) > 0.0 {
                    *front_index
                } else {
                    *back_index
                };
            }
        }
    }
    debug_assert!(false, "cyclic node references in tree");
    false
}

/// First solid hit along the directed segment `from -> to`, if any.
///
/// Returns the earliest point at which the segment enters a solid region;
/// a segment that starts inside solid space hits at `from`. Malformed
/// trees report no hit.
pub fn trace(tree: &BspTree, from: Point2<Real>, to: Point2<Real>) -> Option<Point2<Real>> {
    let mut budget = tree.nodes().len() + 1;
    trace_node(tree, tree.root_index(), from, to, 0.0, 1.0, &mut budget)
}

/// One recursion frame of the trace: the sub-segment of `from -> to`
/// covered by the window `[t0, t1]`, tested against the node at `index`.
fn trace_node(
    tree: &BspTree,
    index: u32,
    from: Point2<Real>,
    to: Point2<Real>,
    t0: Real,
    t1: Real,
    budget: &mut usize,
) -> Option<Point2<Real>> {
    if *budget == 0 {
        debug_assert!(false, "cyclic node references in tree");
        return None;
    }
    *budget -= 1;

    // Active sub-segment endpoints, recomputed from the global segment at
    // every level so hit coordinates stay consistent at any depth.
    let p0 = from + (to - from) * t0;
    let p1 = from + (to - from) * t1;

    match tree.node(index)? {
        // Solid leaf: the segment enters here; the entry point is the hit.
        BspNode::Leaf { is_solid: true, .. } => Some(p0),
        BspNode::Leaf { is_solid: false, .. } => None,
        BspNode::Split {
            normal_x,
            normal_y,
            distance,
            front_index,
            back_index,
        } => {
            let plane = Line::new(Vector2::new(*normal_x, *normal_y), *distance);
            let d0 = plane.point_side(p0);
            let d1 = plane.point_side(p1);

            if d0 > EPSILON && d1 > EPSILON {
                return trace_node(tree, *front_index, from, to, t0, t1, budget);
            }
            if d0 <= EPSILON && d1 <= EPSILON {
                // On-plane endpoints go back, matching the point query.
                return trace_node(tree, *back_index, from, to, t0, t1, budget);
            }

            // The sub-segment crosses the plane at t on [p0, p1]; map it
            // back onto the global parameter.
            let t = -d0 / (d1 - d0);
            let t_mid = t0 + t * (t1 - t0);
            let (near, far) = if d0 > 0.0 {
                (*front_index, *back_index)
            } else {
                (*back_index, *front_index)
            };
            if let Some(hit) = trace_node(tree, near, from, to, t0, t_mid, budget) {
                return Some(hit);
            }
            trace_node(tree, far, from, to, t_mid, t1, budget)
        }
    }
}
