//! Row/column inference for sibling elements.
//!
//! Siblings whose centers spread further horizontally than vertically are
//! laid out side by side ([`Direction::Row`]); otherwise they are stacked
//! ([`Direction::Column`]). The spread is the population standard deviation
//! of the center coordinates.

use std::fmt;

use log::trace;

use boxnest_core::geometry::{BBox, Point};

use crate::structure::{ElementTree, NodeId};

/// Main axis along which a node's children are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Children are placed side by side and ordered by `x1`.
    Row,
    /// Children are stacked and ordered by `y1`.
    #[default]
    Column,
}

impl Direction {
    /// Infers the direction from the children's center points.
    ///
    /// Returns [`Direction::Row`] only when the x-spread is strictly greater
    /// than the y-spread. No children, a single child, and ties are all
    /// [`Direction::Column`].
    pub fn from_centers(centers: &[Point]) -> Self {
        if centers.is_empty() {
            return Direction::Column;
        }

        let std_x = population_std_dev(centers.iter().map(|p| p.x()));
        let std_y = population_std_dev(centers.iter().map(|p| p.y()));

        if std_x > std_y {
            Direction::Row
        } else {
            Direction::Column
        }
    }

    /// Coordinate that orders siblings along this axis.
    pub fn sort_key(self, bbox: BBox) -> i32 {
        match self {
            Direction::Row => bbox.x1(),
            Direction::Column => bbox.y1(),
        }
    }

    /// Utility class used by flex containers.
    pub fn flex_class(self) -> &'static str {
        match self {
            Direction::Row => "flex-row",
            Direction::Column => "flex-col",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Row => write!(f, "row"),
            Direction::Column => write!(f, "column"),
        }
    }
}

/// A node's inferred direction and its children in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    direction: Direction,
    children: Vec<NodeId>,
}

impl Arrangement {
    /// Arranges the children of `id`.
    ///
    /// Children with the same sort key keep their attachment order.
    pub fn of(tree: &ElementTree, id: NodeId) -> Self {
        let direction = tree.direction_of(id);

        let mut ordered = tree.children(id).to_vec();
        ordered.sort_by_key(|&child| direction.sort_key(tree.bbox(child)));

        trace!(node:% = id, direction:% = direction, children = ordered.len(); "Arranged children");

        Self {
            direction,
            children: ordered,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl ElementTree {
    /// Infers the direction in which the children of `id` are arranged.
    pub fn direction_of(&self, id: NodeId) -> Direction {
        let centers: Vec<Point> = self
            .children(id)
            .iter()
            .map(|&child| self.bbox(child).center())
            .collect();
        Direction::from_centers(&centers)
    }
}

fn population_std_dev(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let count = values.clone().count();
    if count == 0 {
        return 0.0;
    }
    let n = count as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
