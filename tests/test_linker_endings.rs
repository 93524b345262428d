mod test_utils;

use test_utils::{link_triples, narrow_u, rect};
use wall_overlap::core::math::Point;
use wall_overlap::linker::ProximityLinker;

/// The narrow U has its two inner arms 100 apart (a third of the proximity
/// distance) up to `y = 1200`, splaying open above; the overlap region must
/// be closed off by an ending pair inserted mid-segment on the splay and by
/// a clamped pair at the closed bottom end.
#[test]
fn narrow_u_gets_primary_links_and_two_endings() {
    let mut polygons = vec![narrow_u()];
    let linker = ProximityLinker::new(&mut polygons, 300);

    let primary: Vec<_> = link_triples(&linker)
        .into_iter()
        .filter(|&(_, _, dist)| dist < 300)
        .collect();
    assert_eq!(
        primary,
        vec![
            ((-50, 400), (50, 400), 100),
            ((-50, 800), (50, 800), 100),
            ((-50, 1200), (50, 1200), 100),
        ]
    );

    assert_eq!(linker.ending_links().len(), 2);
    for link in linker.ending_links() {
        assert_eq!(link.dist, 300);
    }
}

#[test]
fn splayed_ending_is_placed_at_the_divergence_point() {
    let mut polygons = vec![narrow_u()];
    let linker = ProximityLinker::new(&mut polygons, 300);

    // arms splay from gap 100 at (±50, 1200) toward (±250, 1600) at
    // cos θ = 0.6; the gap reaches 300 at distance 200 along each segment
    let rings = linker.rings();
    let ending_points: Vec<_> = linker
        .ending_links()
        .iter()
        .map(|link| (rings.point(link.a), rings.point(link.b)))
        .collect();
    assert!(
        ending_points.contains(&(Point::new(139, 1378), Point::new(-139, 1378)))
            || ending_points.contains(&(Point::new(-139, 1378), Point::new(139, 1378))),
        "no mouth ending at the divergence point: {:?}",
        ending_points
    );

    // written back polygon carries the inserted mouth vertexes in ring order
    let data = &polygons[0].vertex_data;
    let mouth_right = data.iter().position(|&p| p == Point::new(139, 1378));
    let mouth_left = data.iter().position(|&p| p == Point::new(-139, 1378));
    assert!(mouth_right.is_some() && mouth_left.is_some());
}

#[test]
fn parallel_arms_clamp_ending_to_segment_end() {
    let mut polygons = vec![narrow_u()];
    let linker = ProximityLinker::new(&mut polygons, 300);

    // below the lowest links the arms run exactly parallel down to the
    // waist corners, so the bottom ending collapses onto them
    let rings = linker.rings();
    let has_bottom_ending = linker.ending_links().iter().any(|link| {
        let pair = (rings.point(link.a), rings.point(link.b));
        pair == (Point::new(50, 0), Point::new(-50, 0))
            || pair == (Point::new(-50, 0), Point::new(50, 0))
    });
    assert!(has_bottom_ending);

    // the bottom ending nodes coincide with the waist corners, so the ring
    // now holds those points twice
    let count = |p: Point| polygons[0].iter_vertexes().filter(|&v| v == p).count();
    assert_eq!(count(Point::new(50, 0)), 2);
    assert_eq!(count(Point::new(-50, 0)), 2);
}

#[test]
fn folding_back_corners_get_no_ending() {
    // parallel rectangle walls: the overlap region spans the full facing
    // edges and both rings turn 90 degrees away at the ends (cos θ <= 0)
    let mut polygons = vec![rect(0, 0, 1000, 100), rect(0, 125, 1000, 225)];
    let linker = ProximityLinker::new(&mut polygons, 50);
    assert_eq!(linker.primary_links().len(), 2);
    assert!(linker.ending_links().is_empty());
}

#[test]
fn kissing_links_are_skipped_as_ending_sources() {
    // corners (1000, 100) and (1016, 147) are sqrt(2465) apart, which is
    // inside the proximity distance but rounds up to it; the link is an
    // ending in disguise and spawns no extra ending nodes
    let mut polygons = vec![rect(0, 0, 1000, 100), rect(1016, 147, 2016, 247)];
    let linker = ProximityLinker::new(&mut polygons, 50);
    assert_eq!(link_triples(&linker), vec![((1000, 100), (1016, 147), 50)]);
    assert!(linker.ending_links().is_empty());
    // no nodes inserted by ending handling
    assert_eq!(polygons[0].vertex_count(), 4);
    assert_eq!(polygons[1].vertex_count(), 4);
}
