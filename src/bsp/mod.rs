//! Flat BSP trees: construction, queries, and the persisted shape.

pub mod build;
pub mod node;
pub mod query;

pub use build::{build, BspBuilder};
pub use node::{BspNode, BspTree};
pub use query::{point_in_tree, trace};
