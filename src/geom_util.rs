//! Coordinate-level traversal helpers shared by the robustness wrappers
//! (common-bits removal, snapping) and the union subsystem (envelope
//! partitioning). Nothing here is specific to the overlay algorithm itself.

use geo_types::{Coord, Geometry, GeometryCollection, Line, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect};

use crate::num::OverlayFloat;

/// Visits every coordinate of `geom`, recursing into collections.
pub fn for_each_coord<T: OverlayFloat>(geom: &Geometry<T>, f: &mut impl FnMut(Coord<T>)) {
    match geom {
        Geometry::Point(p) => f(p.0),
        Geometry::MultiPoint(mp) => mp.0.iter().for_each(|p| f(p.0)),
        Geometry::Line(l) => {
            f(l.start);
            f(l.end);
        }
        Geometry::LineString(ls) => ls.0.iter().for_each(|&c| f(c)),
        Geometry::MultiLineString(mls) => mls.0.iter().for_each(|ls| ls.0.iter().for_each(|&c| f(c))),
        Geometry::Polygon(p) => for_each_polygon_coord(p, f),
        Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|p| for_each_polygon_coord(p, f)),
        Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| for_each_coord(g, f)),
        Geometry::Rect(r) => for_each_polygon_coord(&r.to_polygon(), f),
        Geometry::Triangle(t) => for_each_polygon_coord(&t.to_polygon(), f),
    }
}

fn for_each_polygon_coord<T: OverlayFloat>(polygon: &Polygon<T>, f: &mut impl FnMut(Coord<T>)) {
    polygon.exterior().0.iter().for_each(|&c| f(c));
    polygon.interiors().iter().for_each(|ring| ring.0.iter().for_each(|&c| f(c)));
}

/// Rebuilds `geom` with every coordinate passed through `f`, preserving its
/// variant and ring structure.
pub fn map_coords<T: OverlayFloat>(geom: &Geometry<T>, f: &impl Fn(Coord<T>) -> Coord<T>) -> Geometry<T> {
    match geom {
        Geometry::Point(p) => Geometry::Point(Point(f(p.0))),
        Geometry::MultiPoint(mp) => Geometry::MultiPoint(MultiPoint(mp.0.iter().map(|p| Point(f(p.0))).collect())),
        Geometry::Line(l) => Geometry::Line(Line::new(f(l.start), f(l.end))),
        Geometry::LineString(ls) => Geometry::LineString(map_line_string(ls, f)),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(MultiLineString(mls.0.iter().map(|ls| map_line_string(ls, f)).collect())),
        Geometry::Polygon(p) => Geometry::Polygon(map_polygon(p, f)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon(mp.0.iter().map(|p| map_polygon(p, f)).collect())),
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(gc.iter().map(|g| map_coords(g, f)).collect())),
        Geometry::Rect(r) => Geometry::Polygon(map_polygon(&r.to_polygon(), f)),
        Geometry::Triangle(t) => Geometry::Polygon(map_polygon(&t.to_polygon(), f)),
    }
}

fn map_line_string<T: OverlayFloat>(ls: &LineString<T>, f: &impl Fn(Coord<T>) -> Coord<T>) -> LineString<T> {
    LineString(ls.0.iter().map(|&c| f(c)).collect())
}

fn map_polygon<T: OverlayFloat>(p: &Polygon<T>, f: &impl Fn(Coord<T>) -> Coord<T>) -> Polygon<T> {
    Polygon::new(map_line_string(p.exterior(), f), p.interiors().iter().map(|r| map_line_string(r, f)).collect())
}

/// Rebuilds `geom` with every linestring/ring passed through `f` as a whole,
/// used by the snapper since snapping can change a ring's vertex count.
pub fn map_line_strings<T: OverlayFloat>(geom: &Geometry<T>, f: &impl Fn(&LineString<T>) -> LineString<T>) -> Geometry<T> {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => geom.clone(),
        Geometry::Line(l) => Geometry::LineString(f(&LineString(vec![l.start, l.end]))),
        Geometry::LineString(ls) => Geometry::LineString(f(ls)),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(MultiLineString(mls.0.iter().map(f).collect())),
        Geometry::Polygon(p) => Geometry::Polygon(map_polygon_rings(p, f)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon(mp.0.iter().map(|p| map_polygon_rings(p, f)).collect())),
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(gc.iter().map(|g| map_line_strings(g, f)).collect())),
        Geometry::Rect(r) => Geometry::Polygon(map_polygon_rings(&r.to_polygon(), f)),
        Geometry::Triangle(t) => Geometry::Polygon(map_polygon_rings(&t.to_polygon(), f)),
    }
}

fn map_polygon_rings<T: OverlayFloat>(p: &Polygon<T>, f: &impl Fn(&LineString<T>) -> LineString<T>) -> Polygon<T> {
    Polygon::new(f(p.exterior()), p.interiors().iter().map(f).collect())
}

/// The length of a geometry's envelope diagonal, used as the `size(g)` term
/// in the snap-tolerance formula (spec §4.6).
pub fn envelope_diagonal<T: OverlayFloat>(geom: &Geometry<T>) -> T {
    match bounding_rect(geom) {
        Some(rect) => {
            let dx = rect.max().x - rect.min().x;
            let dy = rect.max().y - rect.min().y;
            (dx * dx + dy * dy).sqrt()
        }
        None => T::zero(),
    }
}

/// The axis-aligned envelope of every coordinate in `geom`, or `None` for an
/// empty geometry.
pub fn bounding_rect<T: OverlayFloat>(geom: &Geometry<T>) -> Option<Rect<T>> {
    let mut min = Coord {
        x: <T as num_traits::Float>::max_value(),
        y: <T as num_traits::Float>::max_value(),
    };
    let mut max = Coord {
        x: <T as num_traits::Float>::min_value(),
        y: <T as num_traits::Float>::min_value(),
    };
    let mut any = false;
    for_each_coord(geom, &mut |c| {
        any = true;
        if c.x < min.x {
            min.x = c.x;
        }
        if c.y < min.y {
            min.y = c.y;
        }
        if c.x > max.x {
            max.x = c.x;
        }
        if c.y > max.y {
            max.y = c.y;
        }
    });
    if any {
        Some(Rect::new(min, max))
    } else {
        None
    }
}
