use geo_types::{Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::error::OverlayResult;
use crate::location::CoordPos;
use crate::num::OverlayFloat;
use crate::overlay::OpCode;
use crate::point_locator::PointLocator;
use crate::snap;

use super::cascaded_union::CascadedUnion;

/// Unary union driver (spec §4.8): flattens a mixed collection into its
/// atomic components, unions each dimension pool separately, then composes
/// the per-dimension results back into one geometry.
pub fn unary_union<T: OverlayFloat>(geoms: &[Geometry<T>]) -> OverlayResult<Option<Geometry<T>>, T> {
    let mut points = Vec::new();
    let mut lines = Vec::new();
    let mut polygons = Vec::new();
    let mut max_dim: Option<i8> = None;

    for geom in geoms {
        flatten(geom, &mut points, &mut lines, &mut polygons, &mut max_dim);
    }

    let point_union = union_points(points)?;
    let line_union = union_lines(lines)?;
    let polygon_union = CascadedUnion::new(polygons).union()?;

    let lines_and_polygons = union_with_null(line_union, polygon_union)?;
    let result = merge_points(point_union, lines_and_polygons)?;

    match result {
        Some(g) => Ok(Some(g)),
        None => Ok(max_dim.map(empty_of_dimension)),
    }
}

fn flatten<T: OverlayFloat>(
    geom: &Geometry<T>,
    points: &mut Vec<Point<T>>,
    lines: &mut Vec<LineString<T>>,
    polygons: &mut Vec<Polygon<T>>,
    max_dim: &mut Option<i8>,
) {
    fn note(max_dim: &mut Option<i8>, dim: i8) {
        *max_dim = Some(max_dim.map_or(dim, |d| d.max(dim)));
    }
    match geom {
        Geometry::Point(p) => {
            note(max_dim, 0);
            points.push(*p);
        }
        Geometry::MultiPoint(mp) => {
            note(max_dim, 0);
            points.extend(mp.0.iter().copied());
        }
        Geometry::Line(l) => {
            note(max_dim, 1);
            lines.push(LineString(vec![l.start, l.end]));
        }
        Geometry::LineString(ls) => {
            note(max_dim, 1);
            if !ls.0.is_empty() {
                lines.push(ls.clone());
            }
        }
        Geometry::MultiLineString(mls) => {
            note(max_dim, 1);
            lines.extend(mls.0.iter().filter(|ls| !ls.0.is_empty()).cloned());
        }
        Geometry::Polygon(p) => {
            note(max_dim, 2);
            if !p.exterior().0.is_empty() {
                polygons.push(p.clone());
            }
        }
        Geometry::MultiPolygon(mp) => {
            note(max_dim, 2);
            polygons.extend(mp.0.iter().filter(|p| !p.exterior().0.is_empty()).cloned());
        }
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                flatten(g, points, lines, polygons, max_dim);
            }
        }
        Geometry::Rect(r) => {
            note(max_dim, 2);
            polygons.push(r.to_polygon());
        }
        Geometry::Triangle(t) => {
            note(max_dim, 2);
            polygons.push(t.to_polygon());
        }
    }
}

/// Collapses duplicate points by routing the pool through the overlay's own
/// point handling, unioned against an empty multipoint.
fn union_points<T: OverlayFloat>(points: Vec<Point<T>>) -> OverlayResult<Option<Geometry<T>>, T> {
    if points.is_empty() {
        return Ok(None);
    }
    let multi = Geometry::MultiPoint(MultiPoint(points));
    let empty = Geometry::MultiPoint(MultiPoint(Vec::new()));
    snap::overlay(multi, empty, OpCode::Union).map(Some)
}

/// Noded-and-dissolved linework, by the same empty-union trick used for
/// points.
fn union_lines<T: OverlayFloat>(lines: Vec<LineString<T>>) -> OverlayResult<Option<Geometry<T>>, T> {
    if lines.is_empty() {
        return Ok(None);
    }
    let multi = Geometry::MultiLineString(MultiLineString(lines));
    let empty = Geometry::MultiLineString(MultiLineString(Vec::new()));
    snap::overlay(multi, empty, OpCode::Union).map(Some)
}

/// `unionWithNull`: tolerates either side being absent.
fn union_with_null<T: OverlayFloat>(a: Option<Geometry<T>>, b: Option<Geometry<T>>) -> OverlayResult<Option<Geometry<T>>, T> {
    match (a, b) {
        (None, None) => Ok(None),
        (Some(g), None) | (None, Some(g)) => Ok(Some(g)),
        (Some(a), Some(b)) => snap::overlay(a, b, OpCode::Union).map(Some),
    }
}

fn merge_points<T: OverlayFloat>(points: Option<Geometry<T>>, rest: Option<Geometry<T>>) -> OverlayResult<Option<Geometry<T>>, T> {
    match (points, rest) {
        (Some(points), Some(rest)) => {
            let kept = point_geometry_union(points, &rest);
            Ok(Some(match kept {
                Some(points) => combine_any(points, rest),
                None => rest,
            }))
        }
        (p, r) => Ok(p.or(r)),
    }
}

/// `PointGeometryUnion` (spec §4.8, step 6): keeps only the points
/// classified EXTERIOR against the line/polygon union, and combines them
/// without any further overlay call.
fn point_geometry_union<T: OverlayFloat>(points: Geometry<T>, rest: &Geometry<T>) -> Option<Geometry<T>> {
    let source = match points {
        Geometry::Point(p) => vec![p],
        Geometry::MultiPoint(mp) => mp.0,
        other => return Some(other),
    };
    let kept: Vec<Point<T>> = source.into_iter().filter(|p| matches!(rest.locate(p.0), CoordPos::Exterior)).collect();
    match kept.len() {
        0 => None,
        1 => Some(Geometry::Point(kept.into_iter().next().unwrap())),
        _ => Some(Geometry::MultiPoint(MultiPoint(kept))),
    }
}

fn combine_any<T: OverlayFloat>(a: Geometry<T>, b: Geometry<T>) -> Geometry<T> {
    Geometry::GeometryCollection(GeometryCollection(vec![a, b]))
}

fn empty_of_dimension<T: OverlayFloat>(dim: i8) -> Geometry<T> {
    match dim {
        0 => Geometry::MultiPoint(MultiPoint(Vec::new())),
        1 => Geometry::MultiLineString(MultiLineString(Vec::new())),
        _ => Geometry::MultiPolygon(MultiPolygon(Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, polygon};

    #[test]
    fn point_absorbed_by_covering_polygon_is_dropped() {
        let point: Geometry<f64> = point!(x: 5.0, y: 5.0).into();
        let poly: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)].into();
        let result = unary_union(&[point, poly]).unwrap().unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
    }

    #[test]
    fn point_outside_polygon_is_kept_alongside_it() {
        let point: Geometry<f64> = point!(x: 20.0, y: 20.0).into();
        let poly: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)].into();
        let result = unary_union(&[point, poly]).unwrap().unwrap();
        assert!(matches!(result, Geometry::GeometryCollection(gc) if gc.0.len() == 2));
    }

    #[test]
    fn empty_input_returns_none() {
        let result: Option<Geometry<f64>> = unary_union(&[]).unwrap();
        assert!(result.is_none());
    }
}
