//! Diagram engines

use tracing::debug;

use super::clip::ClipPolygon;
use super::delaunay::neighbor_sets;
use super::Diagram;
use glam::DVec2;

use crate::bbox::BoundingBox;
use crate::error::{OverlayError, Result};
use crate::site::Site;

/// Computes a Voronoi diagram of sites clipped to a box
///
/// Implementations must return exactly one cell per site, with
/// `cells[i].site == i`.
pub trait DiagramEngine {
    /// Tessellate `sites` inside `bbox`
    ///
    /// # Errors
    ///
    /// Degenerate input the engine can't handle (e.g. coincident sites)
    /// is reported as an error rather than a partial diagram.
    fn compute(&self, sites: &[Site], bbox: &BoundingBox) -> Result<Diagram>;
}

impl<E: DiagramEngine + ?Sized> DiagramEngine for &E {
    fn compute(&self, sites: &[Site], bbox: &BoundingBox) -> Result<Diagram> {
        (**self).compute(sites, bbox)
    }
}

/// Default engine: Delaunay neighbours plus bisector clipping of the box
///
/// # Algorithm
///
/// 1. Reject coincident or non-finite sites
/// 2. Triangulate with `delaunator` to get each site's neighbours
/// 3. Clip the bounding box by the bisector with each neighbour
/// 4. Link the resulting polygons into shared edges
///
/// # Example
///
/// ```
/// use empire_voronoi::{BoundingBox, DelaunayEngine, DiagramEngine, Owner, Site};
///
/// let sites = vec![
///     Site::new(0.0, 0.0, Owner::Unowned),
///     Site::new(10.0, 0.0, Owner::Unowned),
///     Site::new(5.0, 8.0, Owner::Unowned),
/// ];
/// let bbox = BoundingBox::from_sites(&sites);
/// let diagram = DelaunayEngine.compute(&sites, &bbox).unwrap();
/// assert_eq!(diagram.cells.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayEngine;

impl DiagramEngine for DelaunayEngine {
    fn compute(&self, sites: &[Site], bbox: &BoundingBox) -> Result<Diagram> {
        if !bbox.is_finite() {
            return Err(OverlayError::DiagramFailed(format!(
                "bounding box is not finite: {:?}",
                bbox
            )));
        }
        check_sites(sites)?;

        let positions: Vec<_> = sites.iter().map(|s| s.position).collect();
        let neighbors = neighbor_sets(&positions);
        check_neighbors(&neighbors)?;
        let base = ClipPolygon::from_box(bbox);

        let polygons: Vec<ClipPolygon> = positions
            .iter()
            .zip(&neighbors)
            .map(|(&site, site_neighbors)| {
                let mut polygon = base.clone();
                for &j in site_neighbors {
                    polygon = polygon.clip_toward(site, positions[j], j);
                    if polygon.is_empty() {
                        break;
                    }
                }
                polygon
            })
            .collect();

        let diagram = Diagram::from_polygons(polygons);
        debug!(
            sites = sites.len(),
            edges = diagram.edges.len(),
            "computed voronoi diagram"
        );
        Ok(diagram)
    }
}

/// Every position finite and no two positions identical
fn check_sites(sites: &[Site]) -> Result<()> {
    if let Some(i) = sites.iter().position(|s| !s.position.is_finite()) {
        return Err(OverlayError::DiagramFailed(format!(
            "site {} has a non-finite position",
            i
        )));
    }

    let mut order: Vec<usize> = (0..sites.len()).collect();
    // Adding 0.0 turns -0.0 into 0.0 so equal positions sort next to each other
    let key = |i: usize| sites[i].position + DVec2::ZERO;
    order.sort_by(|&a, &b| {
        let (pa, pb) = (key(a), key(b));
        pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
    });

    for pair in order.windows(2) {
        if sites[pair[0]].position == sites[pair[1]].position {
            return Err(OverlayError::CoincidentSites {
                first: pair[0].min(pair[1]),
                second: pair[0].max(pair[1]),
            });
        }
    }
    Ok(())
}

/// Every site has a neighbour once there are two or more sites
fn check_neighbors(neighbors: &[Vec<usize>]) -> Result<()> {
    if neighbors.len() < 2 {
        return Ok(());
    }
    match neighbors.iter().position(Vec::is_empty) {
        Some(i) => Err(OverlayError::DiagramFailed(format!(
            "site {} has no delaunay neighbours",
            i
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Owner;

    fn grid_sites(cols: usize, rows: usize, spacing: f64) -> Vec<Site> {
        let mut sites = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                // Small jitter keeps the grid off exact cocircular configurations
                let jitter = 0.01 * ((r * cols + c) % 3) as f64;
                sites.push(Site::new(c as f64 * spacing + jitter, r as f64 * spacing, Owner::Unowned));
            }
        }
        sites
    }

    #[test]
    fn test_one_cell_per_site() {
        let sites = grid_sites(4, 3, 10.0);
        let bbox = BoundingBox::from_sites(&sites);
        let diagram = DelaunayEngine.compute(&sites, &bbox).unwrap();

        assert_eq!(diagram.cells.len(), sites.len());
        for (i, cell) in diagram.cells.iter().enumerate() {
            assert_eq!(cell.site, i);
            assert!(cell.half_edges.len() >= 3);
        }
    }

    #[test]
    fn test_cells_tile_the_box() {
        let sites = grid_sites(4, 4, 7.0);
        let bbox = BoundingBox::from_sites(&sites);
        let diagram = DelaunayEngine.compute(&sites, &bbox).unwrap();

        let total: f64 = diagram.cells.iter().map(|c| c.signed_area().abs()).sum();
        let expected = bbox.width() * bbox.height();
        assert!((total - expected).abs() < 1e-6 * expected, "{} vs {}", total, expected);
    }

    #[test]
    fn test_cell_vertices_nearest_to_own_site() {
        let sites = grid_sites(3, 3, 10.0);
        let bbox = BoundingBox::from_sites(&sites);
        let diagram = DelaunayEngine.compute(&sites, &bbox).unwrap();

        for cell in &diagram.cells {
            let own = sites[cell.site].position;
            for v in cell.vertices() {
                let clamped = v.clamp(
                    DVec2::new(bbox.left, bbox.top),
                    DVec2::new(bbox.right, bbox.bottom),
                );
                assert!(clamped.distance(v) < 1e-9);
                let own_d = own.distance(v);
                for other in &sites {
                    assert!(own_d <= other.position.distance(v) + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_shared_edges_reference_both_sites() {
        let sites = grid_sites(3, 3, 10.0);
        let bbox = BoundingBox::from_sites(&sites);
        let diagram = DelaunayEngine.compute(&sites, &bbox).unwrap();

        for cell in &diagram.cells {
            for h in &cell.half_edges {
                let edge = diagram.edge_of(h);
                match edge.right_site {
                    Some(right) => assert!(edge.left_site == cell.site || right == cell.site),
                    None => assert_eq!(edge.left_site, cell.site),
                }
            }
        }
        // Interior site of a 3x3 grid borders its four axis neighbours
        let center_neighbors = diagram.neighbors_of(4);
        for n in [1, 3, 5, 7] {
            assert!(center_neighbors.contains(&n), "{:?}", center_neighbors);
        }
    }

    #[test]
    fn test_collinear_sites_make_strips() {
        let sites: Vec<Site> = (0..6)
            .map(|i| Site::new(i as f64 * 3.0, i as f64 * 2.0, Owner::Unowned))
            .collect();
        let bbox = BoundingBox::from_sites(&sites);
        let diagram = DelaunayEngine.compute(&sites, &bbox).unwrap();

        assert_eq!(diagram.cells.len(), 6);
        let total: f64 = diagram.cells.iter().map(|c| c.signed_area().abs()).sum();
        assert!((total - bbox.width() * bbox.height()).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_sites_rejected() {
        let mut sites = grid_sites(3, 3, 10.0);
        sites.push(Site::new(sites[2].x(), sites[2].y(), Owner::account("X")));
        let bbox = BoundingBox::from_sites(&sites);

        let err = DelaunayEngine.compute(&sites, &bbox).unwrap_err();
        assert_eq!(err, OverlayError::CoincidentSites { first: 2, second: 9 });
    }

    #[test]
    fn test_signed_zero_duplicates_rejected() {
        let sites: Vec<Site> = [(-0.0, 5.0), (-0.0, 6.0), (0.0, 5.0), (10.0, 0.0), (10.0, 10.0), (5.0, 2.0), (3.0, 9.0)]
            .iter()
            .map(|&(x, y)| Site::new(x, y, Owner::Unowned))
            .collect();
        let bbox = BoundingBox::from_sites(&sites);

        let err = DelaunayEngine.compute(&sites, &bbox).unwrap_err();
        assert_eq!(err, OverlayError::CoincidentSites { first: 0, second: 2 });
    }

    #[test]
    fn test_site_without_neighbours_rejected() {
        assert!(check_neighbors(&[vec![1], vec![0]]).is_ok());
        assert!(check_neighbors(&[vec![]]).is_ok());
        assert!(matches!(
            check_neighbors(&[vec![1], vec![0], vec![]]),
            Err(OverlayError::DiagramFailed(_))
        ));
    }

    #[test]
    fn test_non_finite_box_rejected() {
        let sites = grid_sites(3, 3, 10.0);
        let result = DelaunayEngine.compute(&sites, &BoundingBox::from_sites(&[]));
        assert!(matches!(result, Err(OverlayError::DiagramFailed(_))));
    }
}
