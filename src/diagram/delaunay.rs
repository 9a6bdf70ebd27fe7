//! Delaunay neighbour sets via `delaunator`
//!
//! A site's Voronoi cell is bounded only by bisectors with its Delaunay
//! neighbours, so clipping against those is enough.

use std::collections::BTreeSet;

use delaunator::{triangulate, Point};
use glam::DVec2;

/// Sorted Delaunay neighbours of every site
///
/// Collinear input has no triangles; every other site is then treated as a
/// neighbour, which still yields the exact (strip-shaped) cells.
pub(crate) fn neighbor_sets(positions: &[DVec2]) -> Vec<Vec<usize>> {
    let n = positions.len();
    let points: Vec<Point> = positions
        .iter()
        .map(|p| Point { x: p.x, y: p.y })
        .collect();
    let triangulation = triangulate(&points);

    if triangulation.triangles.is_empty() {
        return (0..n)
            .map(|i| (0..n).filter(|&j| j != i).collect())
            .collect();
    }

    let mut sets = vec![BTreeSet::new(); n];
    for triangle in triangulation.triangles.chunks_exact(3) {
        let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
        for (p, q) in [(a, b), (b, c), (c, a)] {
            if p < n && q < n && p != q {
                sets[p].insert(q);
                sets[q].insert(p);
            }
        }
    }
    sets.into_iter().map(|s| s.into_iter().collect()).collect()
}
