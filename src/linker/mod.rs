//! Construction and querying of the proximity link graph between polygon
//! rings.
mod link;
mod svg;

pub use link::{LinkKey, ProximityLink};

use std::collections::HashMap;

use crate::core::math::{closest_point_on_segment, Point};
use crate::polygon::{NodeRef, Polygon, RingSet};

/// Tuning parameters for proximity link construction.
#[derive(Debug, Clone)]
pub struct ProximityOptions {
    /// Radius within which a computed foot point is merged with an existing
    /// ring vertex instead of inserting a new node.
    pub snap_tolerance: i64,
    /// Cosine above which two diverging segments are treated as parallel
    /// when computing ending distances.
    pub parallel_cos_threshold: f64,
}

impl ProximityOptions {
    pub fn new() -> Self {
        Self {
            snap_tolerance: 10,
            parallel_cos_threshold: 0.9999,
        }
    }
}

impl Default for ProximityOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds which parts of polygons lie within a proximity distance of which
/// other parts and records them as [ProximityLink]s.
///
/// A link always connects two ring nodes. When the closest approach from a
/// vertex falls in the interior of a segment, a node is inserted at the foot
/// point so the location can later be addressed when adjusting extrusion
/// along that segment. The input polygons are rewritten on construction to
/// include all inserted nodes.
///
/// Where a run of links ends, the two polygon arcs diverge away from each
/// other; *ending* links with a distance of exactly the proximity distance
/// are inserted to bound each such overlap region.
///
/// All state is built by the constructor; afterwards the linker only serves
/// lookups.
#[derive(Debug, Clone)]
pub struct ProximityLinker {
    rings: RingSet,
    proximity_distance: i64,
    options: ProximityOptions,
    /// Links found inside overlap regions, in the order they were found.
    primary: Vec<ProximityLink>,
    /// Synthetic links bounding each overlap region, `dist` always equal to
    /// the proximity distance.
    endings: Vec<ProximityLink>,
    /// Unified endpoint-pair lookup over both link sets.
    by_pair: HashMap<LinkKey, ProximityLink>,
    /// Multimap from a node's point to every link with an endpoint there.
    point_links: HashMap<Point, Vec<ProximityLink>>,
}

impl ProximityLinker {
    /// Build the link graph for `polygons` with the given proximity
    /// distance (the wall line width in the slicing context).
    ///
    /// On return `polygons` contain the synthetic vertexes inserted during
    /// linking.
    pub fn new(polygons: &mut [Polygon], proximity_distance: i64) -> Self {
        Self::with_options(polygons, proximity_distance, ProximityOptions::new())
    }

    /// Same as [ProximityLinker::new] with explicit [ProximityOptions].
    pub fn with_options(
        polygons: &mut [Polygon],
        proximity_distance: i64,
        options: ProximityOptions,
    ) -> Self {
        let total_vertexes: usize = polygons.iter().map(|p| p.vertex_count()).sum();
        let mut linker = ProximityLinker {
            rings: RingSet::from_polygons(polygons),
            proximity_distance,
            options,
            primary: Vec::with_capacity(total_vertexes * 2),
            endings: Vec::with_capacity(total_vertexes * 2),
            by_pair: HashMap::with_capacity(total_vertexes * 4),
            point_links: HashMap::with_capacity(total_vertexes * 4),
        };
        linker.find_proximate_points();
        linker.add_proximity_endings();
        linker.add_sharp_corners();
        linker.rings.write_back(polygons);
        linker
    }

    /// The configured proximity distance.
    #[inline]
    pub fn proximity_distance(&self) -> i64 {
        self.proximity_distance
    }

    /// The ring state including all inserted nodes. Link endpoints resolve
    /// against this.
    #[inline]
    pub fn rings(&self) -> &RingSet {
        &self.rings
    }

    /// Links found inside overlap regions, in discovery order.
    #[inline]
    pub fn primary_links(&self) -> &[ProximityLink] {
        &self.primary
    }

    /// Synthetic links bounding the overlap regions.
    #[inline]
    pub fn ending_links(&self) -> &[ProximityLink] {
        &self.endings
    }

    /// All links with an endpoint at point `p`, from either link set.
    #[inline]
    pub fn links_at(&self, p: Point) -> &[ProximityLink] {
        self.point_links.get(&p).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any link has an endpoint at point `p`.
    #[inline]
    pub fn is_linked(&self, p: Point) -> bool {
        self.point_links.contains_key(&p)
    }

    /// The link with exactly the endpoint pair `{a, b}`, from either link
    /// set, if one exists.
    #[inline]
    pub fn lookup_link(&self, a: NodeRef, b: NodeRef) -> Option<ProximityLink> {
        self.by_pair.get(&LinkKey::new(a, b)).copied()
    }

    /// Link each vertex of each ring to each proximate segment of any ring.
    ///
    /// Each ring is compared only against itself and previous rings; for a
    /// ring compared with itself each vertex is compared only against the
    /// segments from its own position onward.
    fn find_proximate_points(&mut self) {
        for ring_index in 0..self.rings.ring_count() {
            for other_index in 0..=ring_index {
                let Some(first) = self.rings.first(ring_index) else {
                    continue;
                };
                let mut v = first;
                loop {
                    if ring_index == other_index {
                        self.find_proximate_for_vertex(v, other_index, Some(v));
                    } else {
                        self.find_proximate_for_vertex(v, other_index, None);
                    }
                    v = self.rings.next(v);
                    if Some(v) == self.rings.first(ring_index) {
                        break;
                    }
                }
            }
        }
    }

    /// Scan the segments of ring `to_ring` from `start` (its first node when
    /// `None`) through its last node, linking `from` to every segment within
    /// the proximity distance.
    fn find_proximate_for_vertex(&mut self, from: NodeRef, to_ring: usize, start: Option<NodeRef>) {
        let Some(head) = self.rings.first(to_ring) else {
            return;
        };
        let start = start.unwrap_or(head);
        let last = self.rings.prev(head);
        let from_point = self.rings.point(from);

        let mut seg_start = last;
        let mut seg_end = start;
        loop {
            self.consider_edge(from, from_point, seg_start, seg_end);
            seg_start = seg_end;
            if seg_end == last {
                break;
            }
            seg_end = self.rings.next(seg_end);
        }
    }

    /// Test one vertex against one segment and record a link if they are
    /// proximate, inserting a foot-point node when the closest approach is
    /// in the segment interior.
    fn consider_edge(&mut self, from: NodeRef, from_point: Point, u0: NodeRef, u1: NodeRef) {
        let same_ring = from.ring == u0.ring;
        if same_ring
            && (from == u0
                || from == u1
                || self.rings.prev(from) == u1
                || self.rings.next(from) == u0)
        {
            // segment is incident on [from] or on one of its own ring edges
            return;
        }

        let u0_point = self.rings.point(u0);
        let u1_point = self.rings.point(u1);
        let closest = closest_point_on_segment(from_point, u0_point, u1_point);
        let dist2 = (closest - from_point).length_squared();
        let w = self.proximity_distance;
        if dist2 >= w * w {
            return;
        }
        if same_ring {
            let seg_dir = u1_point - u0_point;
            let next_point = self.rings.point(self.rings.next(from));
            let prev_point = self.rings.point(self.rings.prev(from));
            if (next_point - from_point).dot(seg_dir) > 0
                && (from_point - prev_point).dot(seg_dir) > 0
            {
                // segment runs with [from]'s own winding direction; the two
                // are connected stretches of the same wall, not an overlap
                return;
            }
        }

        let dist = (dist2 as f64).sqrt().round() as i64;
        let snap = self.options.snap_tolerance;
        if (closest - u0_point).shorter_than(snap) {
            self.add_primary_link(from, u0, dist);
        } else if (closest - u1_point).shorter_than(snap) {
            self.add_primary_link(from, u1, dist);
        } else {
            let inserted = self.rings.insert_before(u1, closest);
            self.add_primary_link(from, inserted, dist);
        }
    }

    /// Add ending links bounding every overlap region.
    ///
    /// Primary links are visited in discovery order; each can be an ending
    /// in two directions, walking forward on one ring and backward on the
    /// other.
    fn add_proximity_endings(&mut self) {
        for index in 0..self.primary.len() {
            let link = self.primary[index];
            if link.dist == self.proximity_distance {
                // the link is an ending itself
                continue;
            }
            {
                let a2 = self.rings.next(link.a);
                let b2 = self.rings.prev(link.b);
                self.add_proximity_ending(link, a2, b2, a2, link.b);
            }
            {
                let a2 = self.rings.prev(link.a);
                let b2 = self.rings.next(link.b);
                self.add_proximity_ending(link, a2, b2, link.a, b2);
            }
        }
    }

    /// Add an ending link in the direction of `a2`/`b2` if the overlap
    /// region past `link` is still unbounded there.
    ///
    /// `a_before` and `b_before` are the nodes to insert new ending nodes in
    /// front of, chosen by the caller so that the insertion lands between
    /// the link and the direction nodes.
    fn add_proximity_ending(
        &mut self,
        link: ProximityLink,
        a2: NodeRef,
        b2: NodeRef,
        a_before: NodeRef,
        b_before: NodeRef,
    ) {
        let a1_point = self.rings.point(link.a);
        let b1_point = self.rings.point(link.b);
        let a2_point = self.rings.point(a2);
        let b2_point = self.rings.point(b2);
        if self.point_links.contains_key(&a2_point) && self.point_links.contains_key(&b2_point) {
            // both direction points already carry links, so the ending was
            // materialised from a neighbouring link; one linked side alone is
            // the normal state inside a region and must not stop the ending
            return;
        }

        let Some(dist) = self.proximity_ending_distance(a1_point, a2_point, b1_point, b2_point, link.dist)
        else {
            return;
        };

        let a = a2_point - a1_point;
        let b = b2_point - b1_point;
        let a_length2 = a.length_squared();
        let b_length2 = b.length_squared();
        let w = self.proximity_distance;
        if dist * dist > a_length2.min(b_length2) {
            // the divergence point lies past the end of the shorter segment;
            // clamp to it and displace a node proportionally on the longer one
            let clamped = (a_length2.min(b_length2) as f64).sqrt() as i64;
            if a_length2 < b_length2 {
                let new_b = self.rings.insert_before(b_before, b1_point + b.scaled_to(clamped));
                self.add_ending_link(a2, new_b, w);
            } else if b_length2 < a_length2 {
                let new_a = self.rings.insert_before(a_before, a1_point + a.scaled_to(clamped));
                self.add_ending_link(new_a, b2, w);
            } else {
                self.add_ending_link(a2, b2, w);
            }
        } else if dist > 0 {
            let new_a = self.rings.insert_before(a_before, a1_point + a.scaled_to(dist));
            let new_b = self.rings.insert_before(b_before, b1_point + b.scaled_to(dist));
            self.add_ending_link(new_a, new_b, w);
        } else {
            self.add_ending_link(link.a, link.b, w);
        }
    }

    /// Distance from `a1` along `a1a2` (equivalently from `b1` along `b1b2`)
    /// at which the two polylines have diverged to exactly the proximity
    /// distance apart.
    ///
    /// Returns `None` when the segments fold back on each other
    /// (`cos θ <= 0` or not finite), meaning no ending exists in this
    /// direction.
    fn proximity_ending_distance(
        &self,
        a1: Point,
        a2: Point,
        b1: Point,
        b2: Point,
        link_dist: i64,
    ) -> Option<i64> {
        let overlap = self.proximity_distance - link_dist;
        let a = a2 - a1;
        let b = b2 - b1;
        let cos_angle = a.dot(b) as f64
            / ((a.length_squared() as f64).sqrt() * (b.length_squared() as f64).sqrt());
        // dist == .5*overlap / tan(.5*acos(cos_angle))
        //      == .5*overlap / sqrt(2/(cos_angle + 1) - 1)
        if !cos_angle.is_finite() || cos_angle <= 0.0 {
            None
        } else if cos_angle > self.options.parallel_cos_threshold {
            // near parallel, 1/x blows up; the region runs to the end of the
            // shorter segment
            Some(a.length().min(b.length()))
        } else {
            Some((overlap as f64 / (2.0 * (2.0 / (cos_angle + 1.0) - 1.0).sqrt())) as i64)
        }
    }

    /// Add overlap links for sharp corners, so that the overlap of two
    /// consecutive segments of the same wall is compensated for.
    ///
    /// Future work: runs after ending links so an implementation sees the
    /// complete link graph. Currently a no-op.
    fn add_sharp_corners(&mut self) {}

    fn add_primary_link(&mut self, a: NodeRef, b: NodeRef, dist: i64) -> bool {
        let link = ProximityLink::new(a, b, dist);
        if self.by_pair.contains_key(&link.key()) {
            return false;
        }
        self.by_pair.insert(link.key(), link);
        self.primary.push(link);
        self.register_points(link);
        true
    }

    fn add_ending_link(&mut self, a: NodeRef, b: NodeRef, dist: i64) -> bool {
        let link = ProximityLink::new(a, b, dist);
        if self.by_pair.contains_key(&link.key()) {
            return false;
        }
        self.by_pair.insert(link.key(), link);
        self.endings.push(link);
        self.register_points(link);
        true
    }

    /// Index a newly added link under both of its endpoint points.
    fn register_points(&mut self, link: ProximityLink) {
        let a_point = self.rings.point(link.a);
        let b_point = self.rings.point(link.b);
        self.point_links.entry(a_point).or_default().push(link);
        if b_point != a_point {
            self.point_links.entry(b_point).or_default().push(link);
        }
    }
}
