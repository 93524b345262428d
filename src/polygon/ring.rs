use crate::core::math::Point;
use crate::polygon::Polygon;

/// Stable handle to one node of one ring in a [RingSet].
///
/// Handles stay valid across [RingSet::insert_before] calls; nodes are never
/// removed, so a handle obtained during construction can be dereferenced for
/// the lifetime of the ring set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    /// Index of the ring within the ring set.
    pub ring: usize,
    /// Index of the node within the ring's node arena.
    pub node: usize,
}

#[derive(Debug, Clone)]
struct RingNode {
    point: Point,
    prev: usize,
    next: usize,
}

#[derive(Debug, Clone)]
struct Ring {
    /// Node arena; `prev`/`next` index into this vec. Nodes are only ever
    /// appended so indexes are stable.
    nodes: Vec<RingNode>,
    /// Index of the node the linear traversal starts at.
    head: usize,
}

impl Ring {
    fn from_polygon(polygon: &Polygon) -> Self {
        let count = polygon.vertex_count();
        let nodes = polygon
            .iter_vertexes()
            .enumerate()
            .map(|(i, point)| RingNode {
                point,
                prev: (i + count - 1) % count.max(1),
                next: (i + 1) % count.max(1),
            })
            .collect();
        Ring { nodes, head: 0 }
    }
}

/// The doubly-linked cyclic rings the proximity linker operates on.
///
/// Each input polygon becomes one ring. Nodes live in a per-ring arena and
/// are addressed by [NodeRef]; inserting a node patches two neighbour indexes
/// and invalidates nothing.
#[derive(Debug, Clone, Default)]
pub struct RingSet {
    rings: Vec<Ring>,
}

impl RingSet {
    /// Convert polygons to rings, preserving vertex order.
    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        RingSet {
            rings: polygons.iter().map(Ring::from_polygon).collect(),
        }
    }

    /// Number of rings.
    #[inline]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Number of nodes in ring `ring`.
    #[inline]
    pub fn ring_len(&self, ring: usize) -> usize {
        self.rings[ring].nodes.len()
    }

    /// The first node of ring `ring` in traversal order, or `None` for an
    /// empty ring.
    #[inline]
    pub fn first(&self, ring: usize) -> Option<NodeRef> {
        let r = &self.rings[ring];
        (!r.nodes.is_empty()).then(|| NodeRef {
            ring,
            node: r.head,
        })
    }

    /// The point stored at `node`.
    #[inline]
    pub fn point(&self, node: NodeRef) -> Point {
        self.rings[node.ring].nodes[node.node].point
    }

    /// The next node along the ring, wrapping around.
    #[inline]
    pub fn next(&self, node: NodeRef) -> NodeRef {
        NodeRef {
            ring: node.ring,
            node: self.rings[node.ring].nodes[node.node].next,
        }
    }

    /// The previous node along the ring, wrapping around.
    #[inline]
    pub fn prev(&self, node: NodeRef) -> NodeRef {
        NodeRef {
            ring: node.ring,
            node: self.rings[node.ring].nodes[node.node].prev,
        }
    }

    /// Insert a new node holding `point` immediately before `before` and
    /// return a handle to it.
    ///
    /// Inserting before the ring head makes the new node the head, so the
    /// linear traversal order stays consistent with inserting at the front
    /// of a list.
    pub fn insert_before(&mut self, before: NodeRef, point: Point) -> NodeRef {
        let ring = &mut self.rings[before.ring];
        let new_index = ring.nodes.len();
        let prev_index = ring.nodes[before.node].prev;
        ring.nodes.push(RingNode {
            point,
            prev: prev_index,
            next: before.node,
        });
        ring.nodes[prev_index].next = new_index;
        ring.nodes[before.node].prev = new_index;
        if before.node == ring.head {
            ring.head = new_index;
        }
        NodeRef {
            ring: before.ring,
            node: new_index,
        }
    }

    /// Iterate the nodes of ring `ring` once around, starting at the head.
    pub fn iter_ring(&self, ring: usize) -> RingIter<'_> {
        RingIter {
            rings: self,
            next: self.first(ring),
            remaining: self.ring_len(ring),
        }
    }

    /// Write the rings back into `polygons`, replacing each polygon's
    /// vertexes with its ring's traversal order.
    pub fn write_back(&self, polygons: &mut [Polygon]) {
        debug_assert_eq!(self.rings.len(), polygons.len());
        for (ring, polygon) in polygons.iter_mut().enumerate() {
            polygon.vertex_data.clear();
            polygon
                .vertex_data
                .extend(self.iter_ring(ring).map(|n| self.point(n)));
        }
    }
}

/// Iterator over the nodes of a single ring. See [RingSet::iter_ring].
pub struct RingIter<'a> {
    rings: &'a RingSet,
    next: Option<NodeRef>,
    remaining: usize,
}

impl Iterator for RingIter<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next?;
        self.next = Some(self.rings.next(current));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
