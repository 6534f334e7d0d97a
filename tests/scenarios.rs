//! Scenario-level integration tests exercising whole operators end to end,
//! plus the quantified invariants over small generated families of inputs.

use approx::relative_eq;
use geo_overlay::{cascaded_union, overlay, overlay_with_precision, unary_union, OpCode, PrecisionModel};
use geo_types::{point, polygon, Geometry, MultiPolygon, Polygon};

fn area_of(geom: &Geometry<f64>) -> f64 {
    use geo_types::Coord;
    fn ring_area(coords: &[Coord<f64>]) -> f64 {
        let mut sum = 0.0;
        for w in coords.windows(2) {
            sum += w[0].x * w[1].y - w[1].x * w[0].y;
        }
        sum.abs() / 2.0
    }
    fn polygon_area(p: &Polygon<f64>) -> f64 {
        let mut a = ring_area(&p.exterior().0);
        for hole in p.interiors() {
            a -= ring_area(&hole.0);
        }
        a
    }
    match geom {
        Geometry::Polygon(p) => polygon_area(p),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(polygon_area).sum(),
        _ => 0.0,
    }
}

fn vertex_count(geom: &Geometry<f64>) -> usize {
    match geom {
        Geometry::Polygon(p) => p.exterior().0.len() - 1 + p.interiors().iter().map(|h| h.0.len() - 1).sum::<usize>(),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(|p| Geometry::Polygon(p.clone())).map(|g| vertex_count(&g)).sum(),
        _ => 0,
    }
}

fn polygon_count(geom: &Geometry<f64>) -> usize {
    match geom {
        Geometry::Polygon(_) => 1,
        Geometry::MultiPolygon(mp) => mp.0.len(),
        _ => 0,
    }
}

// Scenario 1: two overlapping unit squares union into one 8-vertex, area-7 polygon.
#[test]
fn overlapping_squares_union_has_area_seven_and_eight_vertices() {
    let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)].into();
    let b: Geometry<f64> = polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)].into();

    let result = overlay(a, b, OpCode::Union).unwrap();
    assert!(matches!(result, Geometry::Polygon(_)));
    assert!(relative_eq!(area_of(&result), 7.0, epsilon = 1e-9));
    assert_eq!(vertex_count(&result), 8);
}

// Scenario 2: disjoint squares union into a two-component MultiPolygon with no overlap envelope.
#[test]
fn disjoint_squares_union_into_a_multipolygon() {
    let a: Polygon<f64> = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
    let b: Polygon<f64> = polygon![(x: 2.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 3.0), (x: 2.0, y: 3.0)];

    let result = overlay(Geometry::Polygon(a.clone()), Geometry::Polygon(b.clone()), OpCode::Union).unwrap();
    assert_eq!(polygon_count(&result), 2);
    assert!(relative_eq!(area_of(&result), 2.0, epsilon = 1e-9));
}

// Scenario 3: symmetric difference of nested squares leaves an outer shell with one hole.
#[test]
fn symmetric_difference_of_nested_squares_has_a_hole() {
    let outer: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)].into();
    let inner: Geometry<f64> = polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)].into();

    let result = overlay(outer, inner, OpCode::SymDifference).unwrap();
    match result {
        Geometry::Polygon(p) => {
            assert_eq!(p.interiors().len(), 1);
            assert!(relative_eq!(area_of(&Geometry::Polygon(p)), 16.0 - 4.0, epsilon = 1e-9));
        }
        other => panic!("expected a single polygon with a hole, got {other:?}"),
    }
}

// Scenario 4: crossing lines intersect at a single point.
#[test]
fn crossing_lines_intersect_at_a_point() {
    use geo_types::line_string;

    let a: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)].into();
    let b: Geometry<f64> = line_string![(x: 0.0, y: 2.0), (x: 2.0, y: 0.0)].into();

    let result = overlay(a, b, OpCode::Intersection).unwrap();
    match result {
        Geometry::Point(p) => {
            assert!(relative_eq!(p.x(), 1.0, epsilon = 1e-9));
            assert!(relative_eq!(p.y(), 1.0, epsilon = 1e-9));
        }
        other => panic!("expected a single point, got {other:?}"),
    }
}

// Scenario 5: unary union of three polygons, one disjoint, keeps the disjoint
// component separate while the overlapping pair merges with area 7.
#[test]
fn unary_union_keeps_disjoint_component_separate() {
    let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)].into();
    let b: Geometry<f64> = polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)].into();
    let c: Geometry<f64> = polygon![(x: 10.0, y: 10.0), (x: 11.0, y: 10.0), (x: 11.0, y: 11.0), (x: 10.0, y: 11.0)].into();

    let result = unary_union(&[a, b, c]).unwrap().unwrap();
    assert_eq!(polygon_count(&result), 2);
    match &result {
        Geometry::MultiPolygon(mp) => {
            let merged = mp.0.iter().find(|p| area_of(&Geometry::Polygon((*p).clone())) > 2.0).expect("merged component present");
            assert!(relative_eq!(area_of(&Geometry::Polygon(merged.clone())), 7.0, epsilon = 1e-9));
        }
        other => panic!("expected a multipolygon, got {other:?}"),
    }
}

// Scenario 6: a point over a polygon is absorbed; a point outside it survives
// alongside the polygon in a collection.
#[test]
fn point_over_polygon_unary_union_absorbs_or_keeps_the_point() {
    let polygon: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)].into();

    let inside: Geometry<f64> = point!(x: 5.0, y: 5.0).into();
    let absorbed = unary_union(&[inside, polygon.clone()]).unwrap().unwrap();
    assert!(matches!(absorbed, Geometry::Polygon(_)));

    let outside: Geometry<f64> = point!(x: 20.0, y: 20.0).into();
    let kept = unary_union(&[outside, polygon]).unwrap().unwrap();
    assert!(matches!(kept, Geometry::GeometryCollection(gc) if gc.0.len() == 2));
}

fn unit_square_at(x: f64, y: f64) -> Polygon<f64> {
    polygon![(x: x, y: y), (x: x + 1.0, y: y), (x: x + 1.0, y: y + 1.0), (x: x, y: y + 1.0)]
}

// Idempotence: union(g, g) and intersection(g, g) both reproduce g's area.
#[test]
fn union_and_intersection_with_self_are_idempotent() {
    let square: Geometry<f64> = unit_square_at(0.0, 0.0).into();

    let unioned = overlay(square.clone(), square.clone(), OpCode::Union).unwrap();
    assert!(relative_eq!(area_of(&unioned), area_of(&square), epsilon = 1e-9));

    let intersected = overlay(square.clone(), square, OpCode::Intersection).unwrap();
    assert!(relative_eq!(area_of(&intersected), 1.0, epsilon = 1e-9));
}

// Commutativity: union and intersection don't care about argument order.
#[test]
fn union_and_intersection_are_commutative() {
    let a: Geometry<f64> = unit_square_at(0.0, 0.0).into();
    let b: Geometry<f64> = unit_square_at(0.5, 0.5).into();

    let union_ab = overlay(a.clone(), b.clone(), OpCode::Union).unwrap();
    let union_ba = overlay(b.clone(), a.clone(), OpCode::Union).unwrap();
    assert!(relative_eq!(area_of(&union_ab), area_of(&union_ba), epsilon = 1e-9));

    let inter_ab = overlay(a.clone(), b.clone(), OpCode::Intersection).unwrap();
    let inter_ba = overlay(b, a, OpCode::Intersection).unwrap();
    assert!(relative_eq!(area_of(&inter_ab), area_of(&inter_ba), epsilon = 1e-9));
}

// De Morgan: symdiff(a, b) == union(difference(a, b), difference(b, a)) by area.
#[test]
fn symmetric_difference_matches_union_of_differences() {
    let a: Geometry<f64> = unit_square_at(0.0, 0.0).into();
    let b: Geometry<f64> = unit_square_at(0.5, 0.5).into();

    let symdiff = overlay(a.clone(), b.clone(), OpCode::SymDifference).unwrap();

    let diff_ab = overlay(a.clone(), b.clone(), OpCode::Difference).unwrap();
    let diff_ba = overlay(b, a, OpCode::Difference).unwrap();
    let union_of_diffs = overlay(diff_ab, diff_ba, OpCode::Union).unwrap();

    assert!(relative_eq!(area_of(&symdiff), area_of(&union_of_diffs), epsilon = 1e-9));
}

// Dimension rule: difference of a polygon by itself is empty and stays an
// (empty) areal geometry rather than collapsing to a point or line type.
#[test]
fn empty_result_keeps_the_expected_dimension() {
    let a: Geometry<f64> = unit_square_at(0.0, 0.0).into();
    let result = overlay(a.clone(), a, OpCode::Difference).unwrap();
    assert!(matches!(result, Geometry::MultiPolygon(mp) if mp.0.is_empty()));
}

// Cascaded union of non-overlapping polygons equals their iterative pairwise union.
#[test]
fn cascaded_union_matches_iterative_union_for_disjoint_polygons() {
    let squares: Vec<Polygon<f64>> = (0..5).map(|i| unit_square_at(i as f64 * 3.0, 0.0)).collect();

    let cascaded = cascaded_union(squares.clone()).unwrap().unwrap();

    let mut iterative: Geometry<f64> = Geometry::Polygon(squares[0].clone());
    for square in &squares[1..] {
        iterative = overlay(iterative, Geometry::Polygon(square.clone()), OpCode::Union).unwrap();
    }

    assert!(relative_eq!(area_of(&cascaded), area_of(&iterative), epsilon = 1e-9));
    assert_eq!(polygon_count(&cascaded), polygon_count(&iterative));
}

// Ring orientation: every shell winds clockwise, every hole counter-clockwise.
#[test]
fn result_rings_follow_shell_cw_hole_ccw_convention() {
    use geo_types::Coord;

    fn signed_area(coords: &[Coord<f64>]) -> f64 {
        let mut sum = 0.0;
        for w in coords.windows(2) {
            sum += (w[1].x - w[0].x) * (w[1].y + w[0].y);
        }
        sum
    }

    let outer: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)].into();
    let inner: Geometry<f64> = polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)].into();
    let result = overlay(outer, inner, OpCode::SymDifference).unwrap();

    let Geometry::Polygon(p) = result else { panic!("expected a polygon") };
    assert!(signed_area(&p.exterior().0) > 0.0, "shell should wind clockwise in (x, y) screen convention");
    for hole in p.interiors() {
        assert!(signed_area(&hole.0) < 0.0, "hole should wind counter-clockwise");
    }
}

// No orphan holes: every hole in the nested-squares symdiff result is
// properly contained within the result's own shell.
#[test]
fn holes_stay_contained_within_their_own_shell() {
    let outer: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)].into();
    let inner: Geometry<f64> = polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)].into();
    let result = overlay(outer, inner, OpCode::SymDifference).unwrap();

    let Geometry::Polygon(p) = result else { panic!("expected a polygon") };
    use geo_types::Coord;
    let shell_bounds = p.exterior().0.iter().fold((f64::MAX, f64::MAX, f64::MIN, f64::MIN), |(minx, miny, maxx, maxy), c: &Coord<f64>| {
        (minx.min(c.x), miny.min(c.y), maxx.max(c.x), maxy.max(c.y))
    });
    for hole in p.interiors() {
        for c in &hole.0 {
            assert!(c.x >= shell_bounds.0 && c.x <= shell_bounds.2);
            assert!(c.y >= shell_bounds.1 && c.y <= shell_bounds.3);
        }
    }
}

// A FIXED precision model rounds near-coincident vertices onto the same
// grid cell before noding, so two squares that only overlap once their
// coordinates are snapped to an integer grid still union into one shape.
#[test]
fn fixed_precision_model_merges_near_coincident_vertices() {
    let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)].into();
    let b: Geometry<f64> = polygon![(x: 1.9999, y: 1.9999), (x: 4.0, y: 2.0), (x: 4.0, y: 4.0), (x: 2.0, y: 4.0)].into();

    let result = overlay_with_precision(a, b, OpCode::Union, PrecisionModel::Fixed { scale: 1.0 }, PrecisionModel::Fixed { scale: 1.0 }).unwrap();

    assert!(relative_eq!(area_of(&result), 8.0, epsilon = 1e-6));
}
