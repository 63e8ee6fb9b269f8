//! 2D solid-geometry collision engine: convex partitioning, flat BSP
//! trees with boolean OR, point-in-solid and first-hit segment queries.
#![forbid(unsafe_code)]

pub mod bsp;
pub mod errors;
pub mod float_types;
pub mod line;
pub mod partition;
pub mod polygon;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use bsp::{build, point_in_tree, trace, BspBuilder, BspNode, BspTree};
pub use errors::{BuildError, PartitionError, TreeError};
pub use float_types::{Real, EPSILON};
pub use line::{Line, LineSide};
pub use partition::partition_convex;
pub use polygon::Polygon;
