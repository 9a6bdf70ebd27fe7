//! Voronoi diagram model and the engine that computes it
//!
//! The engine produces tagged polygons per site; [`Diagram::from_polygons`]
//! turns them into the typed cell / edge / half-edge graph the renderers walk.

mod clip;
mod delaunay;
mod engine;

pub use engine::{DelaunayEngine, DiagramEngine};

use std::collections::HashMap;

use glam::DVec2;

pub(crate) use clip::{ClipPolygon, EdgeOrigin};

/// Undirected diagram edge
///
/// `left_site` is always present. `right_site` is `None` when the edge lies on
/// the bounding box, i.e. there is no neighbouring site on the other side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the site on one side
    pub left_site: usize,
    /// Index of the site on the other side, if any
    pub right_site: Option<usize>,
    /// First endpoint, in the direction of the first cell that reported the edge
    pub va: DVec2,
    /// Second endpoint
    pub vb: DVec2,
}

impl Edge {
    /// The edge lies on the bounding box
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.right_site.is_none()
    }
}

/// Directed side of a cell's boundary polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    start: DVec2,
    end: DVec2,
    edge: usize,
}

impl HalfEdge {
    pub fn new(start: DVec2, end: DVec2, edge: usize) -> Self {
        Self { start, end, edge }
    }

    #[inline]
    pub fn start_point(&self) -> DVec2 {
        self.start
    }

    #[inline]
    pub fn end_point(&self) -> DVec2 {
        self.end
    }

    /// Index of the parent edge in [`Diagram::edges`]
    #[inline]
    pub fn edge_index(&self) -> usize {
        self.edge
    }
}

/// One Voronoi region: the site it belongs to and its boundary
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Index of the cell's site
    pub site: usize,
    /// Boundary in traversal order
    pub half_edges: Vec<HalfEdge>,
}

impl Cell {
    /// Cells with fewer than three half-edges are slivers, not regions
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.half_edges.len() <= 2
    }

    /// Polygon vertices (start points of the half-edges)
    pub fn vertices(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.half_edges.iter().map(HalfEdge::start_point)
    }

    /// Signed shoelace area of the boundary polygon
    pub fn signed_area(&self) -> f64 {
        let n = self.half_edges.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for half_edge in &self.half_edges {
            let a = half_edge.start_point();
            let b = half_edge.end_point();
            twice_area += a.x * b.y - b.x * a.y;
        }
        twice_area * 0.5
    }
}

/// Output of a diagram engine: one cell per site plus the shared edge list
///
/// `cells[i].site == i` for every cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub cells: Vec<Cell>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Build the typed graph from one tagged polygon per site
    ///
    /// Polygon edges clipped by the same pair of sites share one [`Edge`];
    /// polygon edges on the bounding box each get their own boundary edge.
    pub(crate) fn from_polygons(polygons: Vec<ClipPolygon>) -> Self {
        let mut edges: Vec<Edge> = Vec::new();
        let mut shared: HashMap<(usize, usize), usize> = HashMap::new();

        let cells = polygons
            .into_iter()
            .enumerate()
            .map(|(site, polygon)| {
                let n = polygon.len();
                let half_edges = (0..n)
                    .map(|i| {
                        let (start, origin) = polygon.vertex(i);
                        let (end, _) = polygon.vertex((i + 1) % n);

                        let edge = match origin {
                            EdgeOrigin::Neighbor(other) => {
                                let key = (site.min(other), site.max(other));
                                *shared.entry(key).or_insert_with(|| {
                                    edges.push(Edge {
                                        left_site: key.0,
                                        right_site: Some(key.1),
                                        va: start,
                                        vb: end,
                                    });
                                    edges.len() - 1
                                })
                            }
                            EdgeOrigin::Boundary(_) => {
                                edges.push(Edge {
                                    left_site: site,
                                    right_site: None,
                                    va: start,
                                    vb: end,
                                });
                                edges.len() - 1
                            }
                        };

                        HalfEdge::new(start, end, edge)
                    })
                    .collect();

                Cell { site, half_edges }
            })
            .collect();

        Self { cells, edges }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Parent edge of a half-edge
    #[inline]
    pub fn edge_of(&self, half_edge: &HalfEdge) -> &Edge {
        &self.edges[half_edge.edge_index()]
    }

    /// Sites sharing an edge with the given site, sorted
    pub fn neighbors_of(&self, site: usize) -> Vec<usize> {
        let Some(cell) = self.cells.get(site) else {
            return Vec::new();
        };
        let mut neighbors: Vec<usize> = cell
            .half_edges
            .iter()
            .filter_map(|h| {
                let edge = self.edge_of(h);
                let other = edge.right_site?;
                Some(if edge.left_site == site { other } else { edge.left_site })
            })
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::clip::BoxSide;
    use super::*;

    fn square_polygon(left: f64, right: f64, neighbor_on_right: Option<usize>) -> ClipPolygon {
        let right_origin = neighbor_on_right
            .map(EdgeOrigin::Neighbor)
            .unwrap_or(EdgeOrigin::Boundary(BoxSide::Right));
        let left_origin = if neighbor_on_right.is_some() {
            EdgeOrigin::Boundary(BoxSide::Left)
        } else {
            EdgeOrigin::Neighbor(0)
        };
        ClipPolygon::from_vertices(vec![
            (DVec2::new(left, 0.0), EdgeOrigin::Boundary(BoxSide::Top)),
            (DVec2::new(right, 0.0), right_origin),
            (DVec2::new(right, 1.0), EdgeOrigin::Boundary(BoxSide::Bottom)),
            (DVec2::new(left, 1.0), left_origin),
        ])
    }

    #[test]
    fn test_shared_edge_is_deduplicated() {
        // Two unit squares side by side, split at x = 1
        let diagram = Diagram::from_polygons(vec![
            square_polygon(0.0, 1.0, Some(1)),
            square_polygon(1.0, 2.0, None),
        ]);

        assert_eq!(diagram.cell_count(), 2);
        // 3 boundary edges per cell + 1 shared
        assert_eq!(diagram.edges.len(), 7);

        let shared: Vec<&Edge> = diagram.edges.iter().filter(|e| !e.is_boundary()).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].left_site, 0);
        assert_eq!(shared[0].right_site, Some(1));

        let from_left = diagram.cells[0].half_edges[1].edge_index();
        let from_right = diagram.cells[1].half_edges[3].edge_index();
        assert_eq!(from_left, from_right);

        assert_eq!(diagram.neighbors_of(0), vec![1]);
        assert_eq!(diagram.neighbors_of(1), vec![0]);
        assert!(diagram.neighbors_of(5).is_empty());
    }

    #[test]
    fn test_half_edges_chain_and_area() {
        let diagram = Diagram::from_polygons(vec![square_polygon(0.0, 1.0, None)]);
        let cell = &diagram.cells[0];

        assert!(!cell.is_degenerate());
        for i in 0..cell.half_edges.len() {
            let next = (i + 1) % cell.half_edges.len();
            assert_eq!(cell.half_edges[i].end_point(), cell.half_edges[next].start_point());
        }
        assert!((cell.signed_area().abs() - 1.0).abs() < 1e-12);
    }
}
