//! Computing and compensating for overlapping wall lines.
//!
//! The overlapping area between two stretches of wall is approximated with
//! connected trapezoids: the area between two neighbouring proximity links is
//! the length between the two locations multiplied by the average overlap at
//! them. When paths are generated, the first line crossing an overlap quad is
//! laid down at full flow and the second line is reduced by the overlap
//! amount; [OverlapFlow] keeps which quads have been crossed as a set of
//! unordered link pairs.

use std::collections::HashSet;
use std::mem;

use crate::core::math::{min_max, Point};
use crate::linker::{LinkKey, ProximityLink, ProximityLinker};
use crate::polygon::{NodeRef, Polygon};

/// Key for an unordered pair of links bounding one overlap quad.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct PassedPair {
    first: LinkKey,
    second: LinkKey,
}

impl PassedPair {
    fn new(link_a: &ProximityLink, link_b: &ProximityLink) -> Self {
        let (first, second) = min_max(link_a.key(), link_b.key());
        PassedPair { first, second }
    }
}

/// Per-edge extrusion flow compensation for overlapping walls.
///
/// Construction runs the [ProximityLinker] over the wall polygons; the
/// polygons are rewritten to contain the inserted link vertexes and must be
/// fed back edge by edge through [OverlapFlow::flow] in path-traversal
/// order.
#[derive(Debug)]
pub struct OverlapFlow {
    linker: ProximityLinker,
    line_width: i64,
    passed: HashSet<PassedPair>,
}

impl OverlapFlow {
    /// Build the proximity state for `polygons` with the given wall line
    /// width, rewriting the polygons to include the inserted vertexes.
    pub fn new(polygons: &mut [Polygon], line_width: i64) -> Self {
        OverlapFlow {
            linker: ProximityLinker::new(polygons, line_width),
            line_width,
            passed: HashSet::new(),
        }
    }

    /// The underlying link state.
    #[inline]
    pub fn linker(&self) -> &ProximityLinker {
        &self.linker
    }

    /// Forget which overlap quads have been crossed, so a new traversal
    /// session can start over.
    pub fn reset(&mut self) {
        self.passed.clear();
    }

    /// Compute the flow multiplier for the directed wall edge `from → to`.
    ///
    /// Edges must be fed in path-traversal order, so that each ring vertex
    /// appears once as `to` and once as `from`. Each overlap quad is entered
    /// once from each side of its shared boundary; the first crossing returns
    /// full flow and the reduction is applied on the second.
    pub fn flow(&mut self, from: Point, to: Point) -> f32 {
        let linker = &self.linker;
        let passed = &mut self.passed;
        if !linker.is_linked(from) {
            return 1.0;
        }
        let to_links = linker.links_at(to);
        if to_links.is_empty() {
            return 1.0;
        }

        let rings = linker.rings();
        let mut overlap_area: i64 = 0;
        for to_link in to_links {
            // orient the link so [to_ref] is the endpoint at [to]
            let mut to_ref = to_link.a;
            let mut other_ref = to_link.b;
            if rings.point(to_ref) != to {
                debug_assert!(
                    rings.point(other_ref) == to,
                    "link indexed under [to] has no endpoint there"
                );
                mem::swap(&mut to_ref, &mut other_ref);
            } else if rings.point(other_ref) == to
                && rings.point(rings.prev(to_ref)) != from
                && rings.point(rings.next(to_ref)) != from
            {
                // both endpoints carry [to]; pick the side the caller walks
                mem::swap(&mut to_ref, &mut other_ref);
            }

            let prev = rings.prev(to_ref);
            let next = rings.next(to_ref);
            let (from_ref, other_ahead) = if rings.point(prev) == from {
                (prev, rings.next(other_ref))
            } else if rings.point(next) == from {
                (next, rings.prev(other_ref))
            } else {
                // the link anchors at a node that shares [to]'s point but
                // belongs to a different stretch of wall than the edge being
                // traversed; it bounds no quad with this edge
                continue;
            };

            // overlap quad closing at the shared vertex [to]
            overlap_area += handle_potential_overlap(linker, passed, to_link, other_ahead, to_ref);
            // overlap quad between this segment and the other side's segment
            overlap_area += handle_potential_overlap(linker, passed, to_link, other_ref, from_ref);
            overlap_area +=
                handle_potential_overlap(linker, passed, to_link, other_ahead, from_ref);
        }

        let nominal_area = (to - from).length() * self.line_width;
        if nominal_area == 0 {
            return 1.0;
        }
        ((nominal_area - overlap_area) as f64 / nominal_area as f64).clamp(0.0, 1.0) as f32
    }
}

/// If `from_it` and `to_it` are linked, account for the overlap quad bounded
/// by that link and `link_a`: zero on the first crossing, the approximate
/// quad area on the second.
fn handle_potential_overlap(
    linker: &ProximityLinker,
    passed: &mut HashSet<PassedPair>,
    link_a: &ProximityLink,
    from_it: NodeRef,
    to_it: NodeRef,
) -> i64 {
    let Some(link_b) = linker.lookup_link(from_it, to_it) else {
        return 0;
    };
    if passed.insert(PassedPair::new(link_a, &link_b)) {
        return 0;
    }
    approx_overlap_area(linker, link_a, &link_b)
}

/// Approximate area of the overlap quad bounded by two links: the distance
/// between the two link midpoints times the average overlap across them.
fn approx_overlap_area(
    linker: &ProximityLinker,
    link_a: &ProximityLink,
    link_b: &ProximityLink,
) -> i64 {
    let rings = linker.rings();
    let p = rings.point(link_a.a);
    let q = rings.point(link_a.b);
    let r = rings.point(link_b.a);
    let s = rings.point(link_b.b);
    // both factors are twice their nominal value, folded into a single /4
    let double_mid_span = ((p + q) - (r + s)).length();
    let w = linker.proximity_distance();
    double_mid_span * (2 * w - link_a.dist - link_b.dist) / 4
}
