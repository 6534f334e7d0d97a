use std::collections::{BTreeMap, HashSet};

use geo_types::{Coord, LineString, Polygon, Rect};

use crate::error::{OverlayResult, TopologyError};
use crate::graph::{DirectedEdgeId, EdgeRing, PlanarGraph};
use crate::num::OverlayFloat;
use crate::point_locator::point_in_ring;

/// Ring assembly (spec §4.4): turns the directed edges marked `inResult` by
/// `select::mark_result_edges` into `Polygon`s.
pub fn build_polygons<T: OverlayFloat>(graph: &PlanarGraph<T>) -> OverlayResult<Vec<Polygon<T>>, T> {
    graph.link_result_directed_edges();

    let maximal_rings = build_maximal_rings(graph);
    for (ring_index, members) in maximal_rings.iter().enumerate() {
        for &de in members {
            graph.directed_edge(de).set_edge_ring(ring_index);
        }
    }

    let mut minimal_rings: Vec<EdgeRing<T>> = Vec::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (ring_index, members) in maximal_rings.iter().enumerate() {
        let group = split_into_minimal_rings(graph, ring_index, members, &mut minimal_rings);
        groups.push(group);
    }

    assemble(minimal_rings, groups)
}

/// Step 1-2: follow `next` from every unvisited result directed edge to
/// trace out maximal rings (nodes may be visited more than once).
fn build_maximal_rings<T: OverlayFloat>(graph: &PlanarGraph<T>) -> Vec<Vec<DirectedEdgeId>> {
    let mut visited = HashSet::new();
    let mut rings = Vec::new();
    for de_id in 0..graph.directed_edge_count() {
        if visited.contains(&de_id) || !graph.directed_edge(de_id).is_in_result() {
            continue;
        }
        let mut ring = Vec::new();
        let mut current = de_id;
        loop {
            if !visited.insert(current) {
                break;
            }
            ring.push(current);
            match graph.directed_edge(current).next() {
                Some(next) if next != de_id => current = next,
                Some(_) => break,
                None => break,
            }
        }
        if ring.len() >= 3 {
            rings.push(ring);
        }
    }
    rings
}

/// Step 3: re-links one maximal ring's directed edges with `nextMin` (degree
/// <=2 everywhere) and walks out every resulting minimal cycle.
fn split_into_minimal_rings<T: OverlayFloat>(
    graph: &PlanarGraph<T>,
    ring_index: usize,
    members: &[DirectedEdgeId],
    minimal_rings: &mut Vec<EdgeRing<T>>,
) -> Vec<usize> {
    graph.link_minimal_directed_edges(ring_index);
    let mut visited = HashSet::new();
    let mut indices = Vec::new();
    for &start in members {
        if visited.contains(&start) {
            continue;
        }
        let mut cycle = Vec::new();
        let mut current = start;
        loop {
            if !visited.insert(current) {
                break;
            }
            cycle.push(current);
            match graph.directed_edge(current).next_min() {
                Some(next) if next != start => current = next,
                Some(_) => break,
                None => break,
            }
        }
        if cycle.len() < 3 {
            continue;
        }
        let coords = ring_coords(graph, &cycle);
        let is_maximal = cycle.len() != members.len();
        let idx = minimal_rings.len();
        minimal_rings.push(EdgeRing::new(cycle, coords, is_maximal));
        indices.push(idx);
    }
    indices
}

fn ring_coords<T: OverlayFloat>(graph: &PlanarGraph<T>, cycle: &[DirectedEdgeId]) -> Vec<Coord<T>> {
    cycle
        .iter()
        .map(|&de_id| {
            let de = graph.directed_edge(de_id);
            de.orig_coord(graph.edge(de.edge()))
        })
        .collect()
}

/// Steps 4-7: classify each minimal-ring group as (at most one shell + its
/// holes) or a pool of free holes, place free holes in their innermost
/// enclosing shell, and emit one polygon per shell.
fn assemble<T: OverlayFloat>(
    minimal_rings: Vec<EdgeRing<T>>,
    groups: Vec<Vec<usize>>,
) -> OverlayResult<Vec<Polygon<T>>, T> {
    let mut holes_by_shell: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut shells: Vec<usize> = Vec::new();
    let mut free_holes: Vec<usize> = Vec::new();

    for group in &groups {
        match group.iter().copied().find(|&i| minimal_rings[i].is_shell) {
            Some(shell_idx) => {
                shells.push(shell_idx);
                let entry = holes_by_shell.entry(shell_idx).or_default();
                for &i in group {
                    if i != shell_idx {
                        entry.push(i);
                    }
                }
            }
            None => free_holes.extend(group.iter().copied()),
        }
    }

    for hole_idx in free_holes {
        let hole = &minimal_rings[hole_idx];
        let hole_env = hole.envelope();

        let mut best: Option<(usize, T)> = None;
        for &shell_idx in &shells {
            let shell = &minimal_rings[shell_idx];
            let shell_env = shell.envelope();
            if !env_contains(shell_env, hole_env) {
                continue;
            }
            // A vertex the hole and this shell candidate don't already
            // share (JTS `ptNotInList`), so a shell that merely touches the
            // hole at one coincidental vertex can't pass the containment
            // test without actually enclosing it.
            let representative = representative_point(&hole.coords, &shell.coords);
            let mut on_boundary = false;
            let inside = point_in_ring(&shell.coords, representative, &mut on_boundary);
            if !inside && !on_boundary {
                continue;
            }
            let area = env_area(shell_env);
            if best.map(|(_, best_area)| area < best_area).unwrap_or(true) {
                best = Some((shell_idx, area));
            }
        }

        match best {
            Some((shell_idx, _)) => holes_by_shell.entry(shell_idx).or_default().push(hole_idx),
            None => return Err(TopologyError::OrphanHole(hole.coords.0[0])),
        }
    }

    let mut polygons = Vec::new();
    for shell_idx in shells {
        let shell_ring = minimal_rings[shell_idx].coords.clone();
        let holes: Vec<LineString<T>> = holes_by_shell
            .get(&shell_idx)
            .into_iter()
            .flatten()
            .map(|&i| minimal_rings[i].coords.clone())
            .collect();
        polygons.push(Polygon::new(shell_ring, holes));
    }
    Ok(polygons)
}

/// The hole's first vertex that is not also a vertex of `shell_coords`
/// (JTS `ptNotInList`, spec §4.4 step 6). Falls back to the hole's own
/// first vertex if every one of its vertices happens to appear in the
/// shell — a degenerate case the containment test below will simply fail
/// to confirm.
fn representative_point<T: OverlayFloat>(hole_coords: &LineString<T>, shell_coords: &LineString<T>) -> Coord<T> {
    hole_coords
        .0
        .iter()
        .copied()
        .find(|c| !shell_coords.0.iter().any(|s| s == c))
        .unwrap_or(hole_coords.0[0])
}

fn env_contains<T: OverlayFloat>(outer: Rect<T>, inner: Rect<T>) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && outer.max().x >= inner.max().x
        && outer.max().y >= inner.max().y
}

fn env_area<T: OverlayFloat>(r: Rect<T>) -> T {
    (r.max().x - r.min().x) * (r.max().y - r.min().y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn representative_point_skips_a_vertex_shared_with_the_shell() {
        let hole = line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0), (x: 1.0, y: 1.0)];
        let shell = line_string![(x: 1.0, y: 1.0), (x: 5.0, y: 0.0), (x: 5.0, y: 5.0), (x: 1.0, y: 1.0)];
        let rep = representative_point(&hole, &shell);
        assert_ne!(rep, Coord { x: 1.0, y: 1.0 });
        assert!(hole.0.contains(&rep));
    }

    #[test]
    fn representative_point_falls_back_when_every_vertex_is_shared() {
        let hole = line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 1.0, y: 1.0)];
        let shell = hole.clone();
        let rep = representative_point(&hole, &shell);
        assert_eq!(rep, hole.0[0]);
    }
}
