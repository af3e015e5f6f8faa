//! Layout capability.
//!
//! A [`LayoutEngine`] consumes a graph carrying layer and swimlane hints and
//! returns [`Geometry`]. Any hierarchical drawing backend can sit behind the
//! trait; [`GridEngine`] is the reference implementation used by the CLI.

mod grid;

pub use grid::GridEngine;

use indexmap::IndexMap;

use abgraph_core::geometry::Point;

use crate::graph::{AntibodyGraph, SequenceKey};

/// Turns layer and swimlane hints into coordinates.
pub trait LayoutEngine {
    /// Computes a position for the nodes of `graph`.
    fn layout(&self, graph: &AntibodyGraph) -> Geometry;
}

/// Node positions produced by a [`LayoutEngine`], in render order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    positions: IndexMap<SequenceKey, Point>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position of `key`, replacing any earlier one.
    pub fn insert(&mut self, key: SequenceKey, position: Point) {
        self.positions.insert(key, position);
    }

    pub fn position(&self, key: SequenceKey) -> Option<Point> {
        self.positions.get(&key).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = (SequenceKey, Point)> {
        self.positions.iter().map(|(key, point)| (*key, *point))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bottom-right corner of the bounding box of all positions.
    pub fn extent(&self) -> Point {
        self.positions
            .values()
            .fold(Point::default(), |extent, point| {
                Point::new(extent.x().max(point.x()), extent.y().max(point.y()))
            })
    }
}
