#![allow(dead_code)]

use wall_overlap::core::math::Point;
use wall_overlap::flow::OverlapFlow;
use wall_overlap::linker::ProximityLinker;
use wall_overlap::polygon::Polygon;

/// Axis aligned rectangle from `(x0, y0)` to `(x1, y1)`, counter clockwise.
pub fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Polygon {
    polygon_from(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
}

pub fn polygon_from(vertexes: &[(i64, i64)]) -> Polygon {
    let mut poly = Polygon::with_capacity(vertexes.len());
    for &(x, y) in vertexes {
        poly.add(x, y);
    }
    poly
}

/// A narrow U shaped polygon whose two inner arms run parallel at a gap of
/// 100 for the lower stretch and splay apart above `y = 1200`, opening past
/// the proximity distance used with it in tests (300).
///
/// Right arm bottom to top, across the top, left arm top to bottom, closed
/// across the 100 wide waist at `y = 0`.
pub fn narrow_u() -> Polygon {
    polygon_from(&[
        (50, 0),
        (50, 400),
        (50, 800),
        (50, 1200),
        (250, 1600),
        (250, 2000),
        (-250, 2000),
        (-250, 1600),
        (-50, 1200),
        (-50, 800),
        (-50, 400),
        (-50, 0),
    ])
}

/// Traverse every polygon's edges in ring order, calling `flow` for each
/// directed edge and collecting `(from, to, flow)`.
pub fn traverse_flows(flow: &mut OverlapFlow, polygons: &[Polygon]) -> Vec<(Point, Point, f32)> {
    let mut result = Vec::new();
    for polygon in polygons {
        let count = polygon.vertex_count();
        for i in 0..count {
            let from = polygon[i];
            let to = polygon[(i + 1) % count];
            let f = flow.flow(from, to);
            result.push((from, to, f));
        }
    }
    result
}

/// Same as [traverse_flows] but walking every ring in reversed vertex order.
pub fn traverse_flows_reversed(
    flow: &mut OverlapFlow,
    polygons: &[Polygon],
) -> Vec<(Point, Point, f32)> {
    let mut result = Vec::new();
    for polygon in polygons {
        let count = polygon.vertex_count();
        for i in (0..count).rev() {
            let from = polygon[(i + 1) % count];
            let to = polygon[i];
            let f = flow.flow(from, to);
            result.push((from, to, f));
        }
    }
    result
}

/// All links of both sets as `(point_a, point_b, dist)` triples with the two
/// points in sorted order, the whole list sorted. Two constructions are
/// equivalent iff these compare equal.
pub fn link_triples(linker: &ProximityLinker) -> Vec<((i64, i64), (i64, i64), i64)> {
    let rings = linker.rings();
    let mut triples: Vec<_> = linker
        .primary_links()
        .iter()
        .chain(linker.ending_links().iter())
        .map(|link| {
            let a = rings.point(link.a);
            let b = rings.point(link.b);
            let (a, b) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
            ((a.x, a.y), (b.x, b.y), link.dist)
        })
        .collect();
    triples.sort();
    triples
}

/// Find the flow recorded for the directed edge `from -> to`.
pub fn flow_for(flows: &[(Point, Point, f32)], from: Point, to: Point) -> f32 {
    flows
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, flow)| *flow)
        .unwrap_or_else(|| panic!("no traversed edge {:?} -> {:?}", from, to))
}
