//! BSP construction: per-polygon half-space chains and the OR-merge.

use crate::bsp::node::{BspNode, BspTree};
use crate::errors::BuildError;
use crate::float_types::EPSILON;
use crate::line::Line;
use crate::partition::partition_convex;
use crate::polygon::Polygon;
use nalgebra::Vector2;

/// Which half-space of a clip plane a `clip` call restricts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ClipSide {
    Front,
    Back,
}

/// Builds a tree from `polygons`, skipping any the partitioner rejects.
///
/// Convenience wrapper around [`BspBuilder::build`].
pub fn build(polygons: &[Polygon]) -> BspTree {
    BspBuilder::new().build(polygons)
}

/// Incremental tree builder owning the growing node array.
///
/// Children are appended before their parent, so the root of the finished
/// tree is the last node emitted and no node can reference itself or a
/// later node. Nodes orphaned by merging stay in the array unreferenced.
/// The finished [`BspTree`] is handed to the caller by move.
///
/// [`build`](BspBuilder::build) is lenient: polygons the partitioner
/// rejects are skipped with a warning and the rest are kept, so an editor
/// gets partial results while geometry is mid-edit.
/// [`try_build`](BspBuilder::try_build) is strict and fails on the first
/// rejected polygon, identifying it by input position.
#[derive(Debug, Default)]
pub struct BspBuilder {
    nodes: Vec<BspNode>,
}

impl BspBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Lenient build: rejected polygons are logged and skipped.
    pub fn build(self, polygons: &[Polygon]) -> BspTree {
        let mut convex = Vec::new();
        for (index, poly) in polygons.iter().enumerate() {
            match partition_convex(poly) {
                Ok(pieces) => convex.extend(pieces),
                Err(err) => log::warn!("skipping polygon {index}: {err}"),
            }
        }
        self.build_from_convex(convex)
    }

    /// Strict build: the first rejected polygon aborts the build.
    pub fn try_build(self, polygons: &[Polygon]) -> Result<BspTree, BuildError> {
        let mut convex = Vec::new();
        for (index, poly) in polygons.iter().enumerate() {
            let pieces =
                partition_convex(poly).map_err(|source| BuildError::Partition { index, source })?;
            convex.extend(pieces);
        }
        Ok(self.build_from_convex(convex))
    }

    fn build_from_convex(mut self, convex: Vec<Polygon>) -> BspTree {
        let mut roots = Vec::new();
        for piece in &convex {
            // Empty regions contribute nothing to a union.
            if !piece.is_solid {
                continue;
            }
            if let Some(root) = self.chain(piece) {
                roots.push(root);
            }
        }
        let root = match roots.split_first() {
            None => self.push(BspNode::empty_leaf()),
            Some((&first, rest)) => rest.iter().fold(first, |acc, &next| self.merge(acc, next)),
        };
        BspTree::from_build(self.nodes, root)
    }

    fn push(&mut self, node: BspNode) -> u32 {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        index
    }

    /// Half-space chain for one convex CCW polygon: one split per directed
    /// edge, whose back child continues to the next edge test and whose
    /// front child is empty space. The terminal back child, reached only
    /// after passing every edge test, is solid.
    fn chain(&mut self, piece: &Polygon) -> Option<u32> {
        let verts = &piece.vertices;
        if verts.len() < 3 {
            return None;
        }
        let mut planes = Vec::with_capacity(verts.len());
        for i in 0..verts.len() {
            let a = verts[i];
            let b = verts[(i + 1) % verts.len()];
            planes.push(Line::from_ccw_edge(a, b)?);
        }
        // The interior of a CCW loop lies on the back side of every edge
        // plane; flip the whole chain if numerics put the centroid in front.
        if planes[0].point_side(piece.centroid()) > 0.0 {
            for plane in &mut planes {
                *plane = plane.flipped();
            }
        }
        let mut back = self.push(BspNode::solid_leaf());
        for plane in planes.iter().rev() {
            let front = self.push(BspNode::empty_leaf());
            back = self.push(BspNode::split(plane, front, back));
        }
        Some(back)
    }

    /// OR-merge: a subtree whose solid region is the union of the solid
    /// regions of `a` and `b`.
    fn merge(&mut self, a: u32, b: u32) -> u32 {
        match self.nodes[a as usize].clone() {
            // Solid absorbs.
            BspNode::Leaf { is_solid: true, .. } => a,
            // Empty is the identity. The surviving subtree is copied because
            // the same clip result can surface on both sides of a split, and
            // the reachable graph must stay a strict tree.
            BspNode::Leaf { is_solid: false, .. } => self.copy_subtree(b),
            BspNode::Split {
                normal_x,
                normal_y,
                distance,
                front_index,
                back_index,
            } => {
                let plane = Line::new(Vector2::new(normal_x, normal_y), distance);
                let b_front = self.clip(b, &plane, ClipSide::Front);
                let front = self.merge(front_index, b_front);
                let b_back = self.clip(b, &plane, ClipSide::Back);
                let back = self.merge(back_index, b_back);
                self.push(BspNode::Split {
                    normal_x,
                    normal_y,
                    distance,
                    front_index: front,
                    back_index: back,
                })
            }
        }
    }

    /// Deep copy of the subtree at `index`, children appended before the
    /// parent. Returns the copy's root.
    fn copy_subtree(&mut self, index: u32) -> u32 {
        match self.nodes[index as usize].clone() {
            node @ BspNode::Leaf { .. } => self.push(node),
            BspNode::Split {
                normal_x,
                normal_y,
                distance,
                front_index,
                back_index,
            } => {
                let front = self.copy_subtree(front_index);
                let back = self.copy_subtree(back_index);
                self.push(BspNode::Split {
                    normal_x,
                    normal_y,
                    distance,
                    front_index: front,
                    back_index: back,
                })
            }
        }
    }

    /// Conservative restriction of the subtree at `index` to one half-space
    /// of `plane`.
    ///
    /// When a node's own plane is parallel or anti-parallel to the clip
    /// plane, an offset comparison proves which child covers the entire
    /// half-space, and the other child is dropped. Anything unprovable is
    /// returned unchanged, which keeps the union correct at the cost of a
    /// larger merged tree.
    fn clip(&mut self, index: u32, plane: &Line, side: ClipSide) -> u32 {
        let (node_plane, front_index, back_index) = match self.nodes[index as usize] {
            BspNode::Split {
                normal_x,
                normal_y,
                distance,
                front_index,
                back_index,
            } => (
                Line::new(Vector2::new(normal_x, normal_y), distance),
                front_index,
                back_index,
            ),
            BspNode::Leaf { .. } => return index,
        };
        let dot = plane.normal.dot(&node_plane.normal);
        if dot > 1.0 - EPSILON {
            // Same orientation: compare offsets along the shared normal.
            match side {
                ClipSide::Front if node_plane.distance <= plane.distance => {
                    return self.clip(front_index, plane, side);
                }
                ClipSide::Back if node_plane.distance >= plane.distance => {
                    return self.clip(back_index, plane, side);
                }
                _ => {}
            }
        } else if dot < EPSILON - 1.0 {
            // Opposite orientation: offsets compare against the negation.
            match side {
                ClipSide::Front if node_plane.distance >= -plane.distance => {
                    return self.clip(back_index, plane, side);
                }
                ClipSide::Back if node_plane.distance < -plane.distance => {
                    return self.clip(front_index, plane, side);
                }
                _ => {}
            }
        }
        index
    }
}
