use geo_types::{Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::location::CoordPos;
use crate::num::{Kernel, Orientation, OverlayFloat};

/// Classifies a coordinate as interior, boundary, or exterior of a geometry.
///
/// This is the one spatial predicate spec.md keeps in the core's own scope
/// (point-in-ring), used for incomplete-node labelling (spec §4.2), free-hole
/// placement (§4.4), and the unary-union point filter (§4.8).
pub trait PointLocator<T: OverlayFloat> {
    fn locate(&self, coord: Coord<T>) -> CoordPos;
}

impl<T: OverlayFloat> PointLocator<T> for Geometry<T> {
    fn locate(&self, coord: Coord<T>) -> CoordPos {
        let mut is_inside = false;
        let mut boundary_count = 0usize;
        accumulate(self, coord, &mut is_inside, &mut boundary_count);
        classify(is_inside, boundary_count)
    }
}

fn classify(is_inside: bool, boundary_count: usize) -> CoordPos {
    // OGC SFA §6.1.15.1: the boundary of a collection with disjoint-interior
    // members is the mod-2 union of element boundaries.
    if boundary_count % 2 == 1 {
        CoordPos::Boundary
    } else if is_inside {
        CoordPos::Interior
    } else {
        CoordPos::Exterior
    }
}

fn accumulate<T: OverlayFloat>(geom: &Geometry<T>, coord: Coord<T>, is_inside: &mut bool, boundary_count: &mut usize) {
    match geom {
        Geometry::Point(p) => accumulate_point(p, coord, is_inside),
        Geometry::MultiPoint(mp) => accumulate_multi_point(mp, coord, is_inside),
        Geometry::Line(l) => accumulate_line(*l, coord, is_inside, boundary_count),
        Geometry::LineString(ls) => accumulate_line_string(ls, coord, is_inside, boundary_count),
        Geometry::MultiLineString(mls) => accumulate_multi_line_string(mls, coord, is_inside, boundary_count),
        Geometry::Polygon(p) => accumulate_polygon(p, coord, is_inside),
        Geometry::MultiPolygon(mp) => accumulate_multi_polygon(mp, coord, is_inside),
        Geometry::GeometryCollection(gc) => accumulate_collection(gc, coord, is_inside, boundary_count),
        Geometry::Rect(r) => accumulate_polygon(&r.to_polygon(), coord, is_inside),
        Geometry::Triangle(t) => accumulate_polygon(&t.to_polygon(), coord, is_inside),
    }
}

fn accumulate_point<T: OverlayFloat>(p: &Point<T>, coord: Coord<T>, is_inside: &mut bool) {
    if p.0 == coord {
        *is_inside = true;
    }
}

fn accumulate_multi_point<T: OverlayFloat>(mp: &MultiPoint<T>, coord: Coord<T>, is_inside: &mut bool) {
    for p in &mp.0 {
        accumulate_point(p, coord, is_inside);
    }
}

fn accumulate_line<T: OverlayFloat>(line: Line<T>, coord: Coord<T>, is_inside: &mut bool, boundary_count: &mut usize) {
    if line.start == line.end {
        accumulate_point(&Point(line.start), coord, is_inside);
        return;
    }
    if coord == line.start || coord == line.end {
        *boundary_count += 1;
    } else if point_on_segment(coord, line) {
        *is_inside = true;
    }
}

fn accumulate_line_string<T: OverlayFloat>(ls: &LineString<T>, coord: Coord<T>, is_inside: &mut bool, boundary_count: &mut usize) {
    if ls.0.len() < 2 {
        return;
    }
    if ls.0.len() == 2 {
        accumulate_line(Line::new(ls.0[0], ls.0[1]), coord, is_inside, boundary_count);
        return;
    }
    if !ring_bbox_contains(ls, coord) {
        return;
    }
    let closed = ls.0.first() == ls.0.last();
    if !closed && (coord == *ls.0.first().unwrap() || coord == *ls.0.last().unwrap()) {
        *boundary_count += 1;
        return;
    }
    for line in ls.lines() {
        if coord == line.start || coord == line.end {
            // interior vertex of a closed ring, or of an open linestring's
            // middle: not a boundary point, but still "on" the line.
            *is_inside = true;
            return;
        }
        if point_on_segment(coord, line) {
            *is_inside = true;
            return;
        }
    }
}

fn accumulate_multi_line_string<T: OverlayFloat>(mls: &MultiLineString<T>, coord: Coord<T>, is_inside: &mut bool, boundary_count: &mut usize) {
    for ls in &mls.0 {
        accumulate_line_string(ls, coord, is_inside, boundary_count);
    }
}

fn accumulate_polygon<T: OverlayFloat>(polygon: &Polygon<T>, coord: Coord<T>, is_inside: &mut bool) {
    // A coordinate is interior to the polygon iff it is in the closed
    // exterior ring and not inside (or on the boundary of) any hole.
    let mut exterior_on_boundary = false;
    let exterior_inside = point_in_ring(polygon.exterior(), coord, &mut exterior_on_boundary);
    if exterior_on_boundary {
        *is_inside = true;
        return;
    }
    if !exterior_inside {
        return;
    }
    for hole in polygon.interiors() {
        let mut hole_on_boundary = false;
        let in_hole = point_in_ring(hole, coord, &mut hole_on_boundary);
        if hole_on_boundary {
            *is_inside = true;
            return;
        }
        if in_hole {
            return;
        }
    }
    *is_inside = true;
}

fn accumulate_multi_polygon<T: OverlayFloat>(mp: &MultiPolygon<T>, coord: Coord<T>, is_inside: &mut bool) {
    for p in &mp.0 {
        accumulate_polygon(p, coord, is_inside);
        if *is_inside {
            return;
        }
    }
}

fn accumulate_collection<T: OverlayFloat>(gc: &GeometryCollection<T>, coord: Coord<T>, is_inside: &mut bool, boundary_count: &mut usize) {
    for geom in gc {
        accumulate(geom, coord, is_inside, boundary_count);
    }
}

fn ring_bbox_contains<T: OverlayFloat>(ls: &LineString<T>, coord: Coord<T>) -> bool {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (ls.0[0].x, ls.0[0].x, ls.0[0].y, ls.0[0].y);
    for c in &ls.0 {
        if c.x < min_x {
            min_x = c.x;
        }
        if c.x > max_x {
            max_x = c.x;
        }
        if c.y < min_y {
            min_y = c.y;
        }
        if c.y > max_y {
            max_y = c.y;
        }
    }
    coord.x >= min_x && coord.x <= max_x && coord.y >= min_y && coord.y <= max_y
}

fn point_on_segment<T: OverlayFloat>(coord: Coord<T>, line: Line<T>) -> bool {
    if line.start == line.end {
        return coord == line.start;
    }
    if !matches!(T::orient2d(line.start, line.end, coord), Orientation::Collinear) {
        return false;
    }
    coord.x >= line.start.x.min(line.end.x)
        && coord.x <= line.start.x.max(line.end.x)
        && coord.y >= line.start.y.min(line.end.y)
        && coord.y <= line.start.y.max(line.end.y)
}

/// Ray-crossing point-in-ring test. Returns whether `coord` is strictly
/// interior to the (possibly non-convex, simple) ring; sets `on_boundary`
/// if the point lies exactly on an edge or vertex of the ring.
pub fn point_in_ring<T: OverlayFloat>(ring: &LineString<T>, coord: Coord<T>, on_boundary: &mut bool) -> bool {
    *on_boundary = false;
    if !ring_bbox_contains(ring, coord) {
        return false;
    }
    let mut crossings = 0u32;
    for line in ring.lines() {
        if point_on_segment(coord, line) {
            *on_boundary = true;
            return false;
        }
        let (p1, p2) = (line.start, line.end);
        let straddles = (p1.y > coord.y) != (p2.y > coord.y);
        if straddles {
            let x_at_y = p1.x + (coord.y - p1.y) / (p2.y - p1.y) * (p2.x - p1.x);
            if x_at_y > coord.x {
                crossings += 1;
            }
        }
    }
    crossings % 2 == 1
}
