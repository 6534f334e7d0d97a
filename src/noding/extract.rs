use geo_types::{Coord, Geometry, LineString, Polygon};

use crate::graph::is_clockwise;
use crate::label::Label;
use crate::location::CoordPos;
use crate::num::OverlayFloat;
use crate::topology_position::TopologyPosition;

/// A not-yet-noded coordinate sequence with its provisional label, produced
/// directly from an input geometry before self- and cross-noding subdivide
/// it further (spec §4.1 steps 1-4).
#[derive(Debug, Clone)]
pub struct RawEdge<T: OverlayFloat> {
    pub coords: Vec<Coord<T>>,
    pub label: Label,
}

/// Everything `extract` pulls out of one argument geometry before noding.
pub struct Extracted<T: OverlayFloat> {
    pub edges: Vec<RawEdge<T>>,
    /// One entry per line/linestring endpoint occurrence, consumed by the
    /// mod-2 boundary determination rule when nodes are created.
    pub line_endpoints: Vec<Coord<T>>,
    /// Coordinates of `Point`/`MultiPoint` components, always interior to
    /// themselves.
    pub points: Vec<Coord<T>>,
}

pub fn extract<T: OverlayFloat>(geom: &Geometry<T>, geom_index: usize) -> Extracted<T> {
    let mut out = Extracted {
        edges: Vec::new(),
        line_endpoints: Vec::new(),
        points: Vec::new(),
    };
    extract_into(geom, geom_index, &mut out);
    out
}

fn extract_into<T: OverlayFloat>(geom: &Geometry<T>, geom_index: usize, out: &mut Extracted<T>) {
    match geom {
        Geometry::Point(p) => out.points.push(p.0),
        Geometry::MultiPoint(mp) => out.points.extend(mp.0.iter().map(|p| p.0)),
        Geometry::Line(l) => extract_line(&LineString(vec![l.start, l.end]), geom_index, out),
        Geometry::LineString(ls) => extract_line(ls, geom_index, out),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                extract_line(ls, geom_index, out);
            }
        }
        Geometry::Polygon(p) => extract_polygon(p, geom_index, out),
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                extract_polygon(p, geom_index, out);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                extract_into(g, geom_index, out);
            }
        }
        Geometry::Rect(r) => extract_polygon(&r.to_polygon(), geom_index, out),
        Geometry::Triangle(t) => extract_polygon(&t.to_polygon(), geom_index, out),
    }
}

fn extract_line<T: OverlayFloat>(ls: &LineString<T>, geom_index: usize, out: &mut Extracted<T>) {
    if ls.0.len() < 2 {
        return;
    }
    let label = Label::new(geom_index, TopologyPosition::line_or_point(CoordPos::Interior));
    out.edges.push(RawEdge { coords: ls.0.clone(), label });
    out.line_endpoints.push(ls.0[0]);
    out.line_endpoints.push(*ls.0.last().unwrap());
}

fn extract_polygon<T: OverlayFloat>(polygon: &Polygon<T>, geom_index: usize, out: &mut Extracted<T>) {
    extract_ring(polygon.exterior(), geom_index, true, out);
    for hole in polygon.interiors() {
        extract_ring(hole, geom_index, false, out);
    }
}

/// Normalizes ring orientation (shell CW, hole CCW) before labelling, so a
/// polygon's interior is always to the right of every one of its edges
/// regardless of the winding order the input ring was supplied in.
fn extract_ring<T: OverlayFloat>(ring: &LineString<T>, geom_index: usize, is_shell: bool, out: &mut Extracted<T>) {
    if ring.0.len() < 4 {
        return;
    }
    let mut coords = ring.0.clone();
    if is_clockwise(&coords) != is_shell {
        coords.reverse();
    }
    let label = Label::new(
        geom_index,
        TopologyPosition::area(CoordPos::Boundary, CoordPos::Exterior, CoordPos::Interior),
    );
    out.edges.push(RawEdge { coords, label });
}
