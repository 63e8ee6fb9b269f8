//! BSP node and tree data structures.

use crate::errors::TreeError;
use crate::float_types::Real;
use crate::line::Line;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A node in the flat tree: either a leaf region or a splitting plane.
///
/// `Leaf` carries the auxiliary fields `sector_id` and `polygon_indices`
/// for compatibility with persisted level data; queries ignore both.
/// `Split` stores its plane as raw scalars, matching the persisted shape;
/// child indices point into the owning tree's node array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BspNode {
    Leaf {
        is_solid: bool,
        #[serde(default)]
        sector_id: i32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        polygon_indices: Vec<u32>,
    },
    Split {
        normal_x: Real,
        normal_y: Real,
        distance: Real,
        front_index: u32,
        back_index: u32,
    },
}

impl BspNode {
    /// A leaf covering entirely solid space.
    pub fn solid_leaf() -> Self {
        BspNode::Leaf {
            is_solid: true,
            sector_id: 0,
            polygon_indices: Vec::new(),
        }
    }

    /// A leaf covering entirely empty space.
    pub fn empty_leaf() -> Self {
        BspNode::Leaf {
            is_solid: false,
            sector_id: 0,
            polygon_indices: Vec::new(),
        }
    }

    pub(crate) fn split(plane: &Line, front_index: u32, back_index: u32) -> Self {
        BspNode::Split {
            normal_x: plane.normal.x,
            normal_y: plane.normal.y,
            distance: plane.distance,
            front_index,
            back_index,
        }
    }

    /// The splitting plane of a `Split` node, `None` for leaves.
    pub fn plane(&self) -> Option<Line> {
        match *self {
            BspNode::Split {
                normal_x,
                normal_y,
                distance,
                ..
            } => Some(Line::new(Vector2::new(normal_x, normal_y), distance)),
            BspNode::Leaf { .. } => None,
        }
    }
}

/// An immutable BSP tree over a dense, 0-indexed node array.
///
/// Built once by [`BspBuilder`](crate::bsp::BspBuilder) and handed to the
/// caller by move; edits mean a rebuild, never in-place mutation. Queries
/// borrow the tree immutably, so any number of readers may share it
/// across threads.
///
/// The serialized form is `{ nodes, root_index }`; deserialization runs
/// [`BspTree::validate`] so a malformed persisted tree fails to load
/// instead of producing a tree that loops or indexes out of range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTree")]
pub struct BspTree {
    nodes: Vec<BspNode>,
    root_index: u32,
}

/// Mirror of the persisted shape before structural validation.
#[derive(Deserialize)]
struct UncheckedTree {
    nodes: Vec<BspNode>,
    root_index: u32,
}

impl TryFrom<UncheckedTree> for BspTree {
    type Error = TreeError;

    fn try_from(raw: UncheckedTree) -> Result<Self, TreeError> {
        BspTree::from_parts(raw.nodes, raw.root_index)
    }
}

impl BspTree {
    /// Checked construction from a node array and root index; the way to
    /// adopt a tree that was not produced by the builder in this process.
    pub fn from_parts(nodes: Vec<BspNode>, root_index: u32) -> Result<Self, TreeError> {
        let tree = BspTree { nodes, root_index };
        tree.validate()?;
        Ok(tree)
    }

    /// Unchecked construction for the builder, which appends children
    /// before parents and so cannot produce self-references or cycles.
    pub(crate) fn from_build(nodes: Vec<BspNode>, root_index: u32) -> Self {
        debug_assert!((root_index as usize) < nodes.len());
        BspTree { nodes, root_index }
    }

    pub fn nodes(&self) -> &[BspNode] {
        &self.nodes
    }

    pub fn root_index(&self) -> u32 {
        self.root_index
    }

    /// The node at `index`, or `None` when the index is out of range.
    pub fn node(&self, index: u32) -> Option<&BspNode> {
        self.nodes.get(index as usize)
    }

    /// Structural validation: every child index in range and distinct from
    /// its node, and the graph reachable from the root a finite tree (no
    /// cycles, no shared descendants).
    pub fn validate(&self) -> Result<(), TreeError> {
        let len = self.nodes.len();
        if self.root_index as usize >= len {
            return Err(TreeError::RootOutOfRange {
                root: self.root_index,
                len,
            });
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let BspNode::Split {
                front_index,
                back_index,
                ..
            } = node
            {
                for child in [*front_index, *back_index] {
                    if child as usize >= len {
                        return Err(TreeError::ChildOutOfRange {
                            index: i as u32,
                            child,
                            len,
                        });
                    }
                    if child as usize == i {
                        return Err(TreeError::SelfReferential { index: i as u32 });
                    }
                }
            }
        }
        let mut visited = vec![false; len];
        let mut stack = vec![self.root_index];
        while let Some(index) = stack.pop() {
            let i = index as usize;
            if visited[i] {
                return Err(TreeError::NodeRevisited { index });
            }
            visited[i] = true;
            if let BspNode::Split {
                front_index,
                back_index,
                ..
            } = &self.nodes[i]
            {
                stack.push(*front_index);
                stack.push(*back_index);
            }
        }
        Ok(())
    }
}
