use geo_types::{Coord, Geometry, Line, LineString, MultiPolygon, Polygon, Rect};

use crate::error::OverlayResult;
use crate::geom_util::bounding_rect;
use crate::num::{lex_cmp, OverlayFloat};
use crate::overlay::OpCode;
use crate::precision::PrecisionModel;
use crate::snap;

/// Flattens a geometry into its polygonal components; everything else
/// contributes nothing (the overlay engine's output of an area-only
/// operator should already be polygonal, so this is mostly a defensive
/// filter rather than a lossy one).
pub(crate) fn polygons_of<T: OverlayFloat>(geom: &Geometry<T>) -> Vec<Polygon<T>> {
    match geom {
        Geometry::Polygon(p) => vec![p.clone()],
        Geometry::MultiPolygon(mp) => mp.0.clone(),
        Geometry::GeometryCollection(gc) => gc.iter().flat_map(polygons_of).collect(),
        Geometry::Rect(r) => vec![r.to_polygon()],
        Geometry::Triangle(t) => vec![t.to_polygon()],
        _ => Vec::new(),
    }
}

pub(crate) fn to_geometry<T: OverlayFloat>(mut polygons: Vec<Polygon<T>>) -> Geometry<T> {
    match polygons.len() {
        0 => Geometry::MultiPolygon(MultiPolygon(Vec::new())),
        1 => Geometry::Polygon(polygons.pop().unwrap()),
        _ => Geometry::MultiPolygon(MultiPolygon(polygons)),
    }
}

fn combine<T: OverlayFloat>(mut a: Vec<Polygon<T>>, b: Vec<Polygon<T>>) -> Geometry<T> {
    a.extend(b);
    to_geometry(a)
}

/// Polygonal union of two inputs, partitioned by whether a component's
/// envelope meets the overlap region (spec §4.5.1): only that overlap set
/// is fed through the core overlay, and disjoint components are grafted
/// back in unchanged once the border-segment safety check confirms the
/// partial union preserved every segment straddling the overlap boundary.
pub fn overlap_union<T: OverlayFloat>(g0: &Geometry<T>, g1: &Geometry<T>) -> OverlayResult<Geometry<T>, T> {
    overlap_union_with_precision(g0, PrecisionModel::default(), g1, PrecisionModel::default())
}

/// Same as [`overlap_union`], threading an explicit precision model for
/// each input through every overlay call this makes (spec §3, §4.5.1).
pub fn overlap_union_with_precision<T: OverlayFloat>(
    g0: &Geometry<T>,
    precision0: PrecisionModel<T>,
    g1: &Geometry<T>,
    precision1: PrecisionModel<T>,
) -> OverlayResult<Geometry<T>, T> {
    let overlap_env = match (bounding_rect(g0), bounding_rect(g1)) {
        (Some(a), Some(b)) => rect_intersection(a, b),
        _ => None,
    };
    let Some(overlap_env) = overlap_env else {
        return Ok(combine(polygons_of(g0), polygons_of(g1)));
    };

    let (overlap0, disjoint0) = partition(polygons_of(g0), overlap_env);
    let (overlap1, disjoint1) = partition(polygons_of(g1), overlap_env);

    let union_geom = full_union(&to_geometry(overlap0.clone()), precision0, &to_geometry(overlap1.clone()), precision1)?;

    let mut expected_border = border_segments(&overlap0, overlap_env);
    expected_border.extend(border_segments(&overlap1, overlap_env));
    let actual_border = border_segments(&polygons_of(&union_geom), overlap_env);

    if segment_multisets_equal(&expected_border, &actual_border) {
        Ok(combine(polygons_of(&union_geom), combine_vecs(disjoint0, disjoint1)))
    } else {
        full_union(g0, precision0, g1, precision1)
    }
}

fn combine_vecs<T: OverlayFloat>(mut a: Vec<Polygon<T>>, b: Vec<Polygon<T>>) -> Vec<Polygon<T>> {
    a.extend(b);
    a
}

/// Routes through the snap-if-needed overlay; there is no buffer(0) rescue
/// available in this crate's dependency stack (see DESIGN.md), so a double
/// failure here simply propagates.
fn full_union<T: OverlayFloat>(
    g0: &Geometry<T>,
    precision0: PrecisionModel<T>,
    g1: &Geometry<T>,
    precision1: PrecisionModel<T>,
) -> OverlayResult<Geometry<T>, T> {
    snap::overlay_with_precision(g0.clone(), precision0, g1.clone(), precision1, OpCode::Union)
}

fn partition<T: OverlayFloat>(polygons: Vec<Polygon<T>>, overlap_env: Rect<T>) -> (Vec<Polygon<T>>, Vec<Polygon<T>>) {
    polygons.into_iter().partition(|p| bounding_rect(&Geometry::Polygon(p.clone())).map(|env| rect_intersection(env, overlap_env).is_some()).unwrap_or(false))
}

fn rect_intersection<T: OverlayFloat>(a: Rect<T>, b: Rect<T>) -> Option<Rect<T>> {
    let min = Coord { x: a.min().x.max(b.min().x), y: a.min().y.max(b.min().y) };
    let max = Coord { x: a.max().x.min(b.max().x), y: a.max().y.min(b.max().y) };
    if min.x > max.x || min.y > max.y {
        None
    } else {
        Some(Rect::new(min, max))
    }
}

fn border_segments<T: OverlayFloat>(polygons: &[Polygon<T>], overlap_env: Rect<T>) -> Vec<Line<T>> {
    let mut out = Vec::new();
    for polygon in polygons {
        collect_ring_borders(polygon.exterior(), overlap_env, &mut out);
        for hole in polygon.interiors() {
            collect_ring_borders(hole, overlap_env, &mut out);
        }
    }
    out
}

/// A segment "touches" the overlap envelope's boundary when exactly one of
/// its endpoints lies strictly inside it — the condition under which the
/// segment could have been rerouted by the partial union.
fn collect_ring_borders<T: OverlayFloat>(ring: &LineString<T>, overlap_env: Rect<T>, out: &mut Vec<Line<T>>) {
    for line in ring.lines() {
        if strictly_inside(overlap_env, line.start) != strictly_inside(overlap_env, line.end) {
            out.push(normalize_line(line));
        }
    }
}

fn strictly_inside<T: OverlayFloat>(rect: Rect<T>, c: Coord<T>) -> bool {
    c.x > rect.min().x && c.x < rect.max().x && c.y > rect.min().y && c.y < rect.max().y
}

fn normalize_line<T: OverlayFloat>(line: Line<T>) -> Line<T> {
    if lex_cmp(&line.start, &line.end) == std::cmp::Ordering::Greater {
        Line::new(line.end, line.start)
    } else {
        line
    }
}

fn segment_multisets_equal<T: OverlayFloat>(a: &[Line<T>], b: &[Line<T>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut remaining: Vec<&Line<T>> = b.iter().collect();
    for seg in a {
        match remaining.iter().position(|&&cand| cand == *seg) {
            Some(pos) => {
                remaining.remove(pos);
            }
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn disjoint_polygons_combine_without_running_overlay() {
        let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)].into();
        let b: Geometry<f64> = polygon![(x: 2.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 3.0), (x: 2.0, y: 3.0)].into();
        let result = overlap_union(&a, &b).unwrap();
        assert!(matches!(result, Geometry::MultiPolygon(mp) if mp.0.len() == 2));
    }

    #[test]
    fn overlapping_polygons_merge_into_one_shape() {
        let a: Geometry<f64> = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)].into();
        let b: Geometry<f64> = polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)].into();
        let result = overlap_union(&a, &b).unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
    }
}
