use crate::float_types::Real;

/// Polygon-level failures surfaced by the convex partitioner.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum PartitionError {
    /// Fewer than 3 distinct vertices, or signed area indistinguishable from zero
    #[error("degenerate polygon: {}", .0)]
    DegeneratePolygon(&'static str),
    /// Two non-adjacent edges properly intersect
    #[error("polygon is self-intersecting (edges {} and {})", .0, .1)]
    NotSimplePolygon(usize, usize),
    /// The decomposition produced no output or failed its self-check
    #[error("convex partition failed: {}", .0)]
    PartitionFailed(&'static str),
    /// A vertex coordinate is NaN or infinite
    #[error("vertex ({}, {}) has a non-finite coordinate", .0, .1)]
    InvalidCoordinate(Real, Real),
}

/// Strict-mode build failure, identifying the offending input polygon
/// by its position in the input list.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum BuildError {
    #[error("polygon {index}: {source}")]
    Partition {
        index: usize,
        source: PartitionError,
    },
}

/// Structural validation failures for a persisted tree.
///
/// A tree is well-formed iff every index is in range, no node references
/// itself, and the graph reachable from the root is a finite tree.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum TreeError {
    #[error("root index {root} is out of range (nodes.len = {len})")]
    RootOutOfRange { root: u32, len: usize },
    #[error("node {index} references child {child} out of range (nodes.len = {len})")]
    ChildOutOfRange { index: u32, child: u32, len: usize },
    #[error("node {index} references itself")]
    SelfReferential { index: u32 },
    #[error("node {index} is reachable more than once from the root")]
    NodeRevisited { index: u32 },
}
