//! Closed polygon container and the linked-ring representation used while
//! inserting proximity vertexes.
mod ring;

pub use ring::{NodeRef, RingIter, RingSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::core::math::Point;

/// A closed polygon as a sequence of vertexes with an implicit closing edge
/// from the last vertex back to the first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polygon {
    /// Contiguous sequence of ring vertexes.
    pub vertex_data: Vec<Point>,
}

impl Polygon {
    /// Create a new empty [Polygon].
    #[inline]
    pub fn new() -> Self {
        Polygon {
            vertex_data: Vec::new(),
        }
    }

    /// Create a new empty [Polygon] with `capacity` vertexes reserved.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Polygon {
            vertex_data: Vec::with_capacity(capacity),
        }
    }

    /// Append a vertex to the ring.
    #[inline]
    pub fn add(&mut self, x: i64, y: i64) {
        self.vertex_data.push(Point::new(x, y));
    }

    /// Number of vertexes in the ring.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len()
    }

    /// Iterate over the ring vertexes in order.
    #[inline]
    pub fn iter_vertexes(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertex_data.iter().copied()
    }
}

impl Index<usize> for Polygon {
    type Output = Point;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vertex_data[index]
    }
}

impl IndexMut<usize> for Polygon {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vertex_data[index]
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Polygon {
            vertex_data: iter.into_iter().collect(),
        }
    }
}
