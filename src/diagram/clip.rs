//! Half-plane clipping of cell polygons
//!
//! Each cell starts as the bounding box and is cut down by the perpendicular
//! bisector between its site and every neighbour. Every polygon edge keeps
//! track of what produced it, so the diagram knows which site lies across.

use glam::DVec2;

use crate::bbox::BoundingBox;

/// Points closer than this to a bisector count as lying on it
const EPS_DIST: f64 = 1.0e-9;

/// Edges shorter than this are dropped after clipping
const EPS_LEN: f64 = 1.0e-9;

/// Side of the bounding box an edge lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoxSide {
    Top,
    Right,
    Bottom,
    Left,
}

/// What produced a polygon edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeOrigin {
    /// Bisector with the given neighbour site
    Neighbor(usize),
    /// Bounding box side
    Boundary(BoxSide),
}

/// Convex polygon whose vertex `i` carries the origin of the edge `i -> i + 1`
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClipPolygon {
    vertices: Vec<(DVec2, EdgeOrigin)>,
}

impl ClipPolygon {
    pub(crate) fn from_vertices(vertices: Vec<(DVec2, EdgeOrigin)>) -> Self {
        Self { vertices }
    }

    /// The bounding box as a polygon, corners in [`BoundingBox::corners`] order
    pub(crate) fn from_box(bbox: &BoundingBox) -> Self {
        let [lt, rt, rb, lb] = bbox.corners();
        Self::from_vertices(vec![
            (lt, EdgeOrigin::Boundary(BoxSide::Top)),
            (rt, EdgeOrigin::Boundary(BoxSide::Right)),
            (rb, EdgeOrigin::Boundary(BoxSide::Bottom)),
            (lb, EdgeOrigin::Boundary(BoxSide::Left)),
        ])
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub(crate) fn vertex(&self, i: usize) -> (DVec2, EdgeOrigin) {
        self.vertices[i]
    }

    /// Keep the part of the polygon closer to `site` than to `neighbor`
    pub(crate) fn clip_toward(&self, site: DVec2, neighbor: DVec2, neighbor_index: usize) -> Self {
        if self.vertices.is_empty() {
            return Self::default();
        }

        let mid = (site + neighbor) * 0.5;
        let dir = (neighbor - site).normalize_or_zero();
        let distance = |p: DVec2| (p - mid).dot(dir);

        let n = self.vertices.len();
        let mut out = Vec::with_capacity(n + 1);

        for i in 0..n {
            let (a, origin) = self.vertices[i];
            let (b, _) = self.vertices[(i + 1) % n];
            let da = distance(a);
            let db = distance(b);
            let a_inside = da <= EPS_DIST;
            let b_inside = db <= EPS_DIST;

            match (a_inside, b_inside) {
                (true, true) => out.push((a, origin)),
                (true, false) => {
                    out.push((a, origin));
                    // Leaving the half-plane: the bisector runs from here to the re-entry point
                    out.push((intersect(a, b, da, db), EdgeOrigin::Neighbor(neighbor_index)));
                }
                (false, true) => out.push((intersect(a, b, da, db), origin)),
                (false, false) => {}
            }
        }

        let mut clipped = Self::from_vertices(out);
        clipped.drop_short_edges();
        clipped
    }

    /// Remove vertices whose outgoing edge has (near) zero length
    fn drop_short_edges(&mut self) {
        let mut i = 0;
        while self.vertices.len() > 1 && i < self.vertices.len() {
            let next = (i + 1) % self.vertices.len();
            if self.vertices[i].0.distance(self.vertices[next].0) < EPS_LEN {
                self.vertices.remove(i);
            } else {
                i += 1;
            }
        }
        if self.vertices.len() == 1 {
            self.vertices.clear();
        }
    }
}

/// Point where segment `a -> b` crosses the bisector, given signed distances
fn intersect(a: DVec2, b: DVec2, da: f64, db: f64) -> DVec2 {
    let denom = da - db;
    if denom.abs() < f64::EPSILON {
        return a;
    }
    let t = (da / denom).clamp(0.0, 1.0);
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_box_polygon_origins() {
        let poly = ClipPolygon::from_box(&unit_box());
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.vertex(0), (DVec2::new(0.0, 0.0), EdgeOrigin::Boundary(BoxSide::Top)));
        assert_eq!(poly.vertex(3).1, EdgeOrigin::Boundary(BoxSide::Left));
    }

    #[test]
    fn test_clip_halves_box() {
        let poly = ClipPolygon::from_box(&unit_box());
        let clipped = poly.clip_toward(DVec2::new(0.25, 0.5), DVec2::new(0.75, 0.5), 9);

        assert_eq!(clipped.len(), 4);
        let origins: Vec<EdgeOrigin> = (0..clipped.len()).map(|i| clipped.vertex(i).1).collect();
        assert!(origins.contains(&EdgeOrigin::Neighbor(9)));
        assert!(!origins.contains(&EdgeOrigin::Boundary(BoxSide::Right)));

        for i in 0..clipped.len() {
            assert!(clipped.vertex(i).0.x <= 0.5 + 1e-12);
        }
    }

    #[test]
    fn test_clip_with_bisector_through_corner() {
        // Bisector of (0,0)-(1,1) passes through the corners (1,0) and (0,1)
        let poly = ClipPolygon::from_box(&unit_box());
        let clipped = poly.clip_toward(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0), 1);

        assert_eq!(clipped.len(), 3);
        let neighbor_edges = (0..clipped.len())
            .filter(|&i| clipped.vertex(i).1 == EdgeOrigin::Neighbor(1))
            .count();
        assert_eq!(neighbor_edges, 1);
    }

    #[test]
    fn test_clip_away_everything() {
        // Site outside the box on the far side of the bisector
        let poly = ClipPolygon::from_box(&unit_box());
        let clipped = poly.clip_toward(DVec2::new(5.0, 0.5), DVec2::new(4.0, 0.5), 0);
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_intersect_midpoint() {
        let p = intersect(DVec2::new(0.0, 0.0), DVec2::new(2.0, 0.0), -1.0, 1.0);
        assert_eq!(p, DVec2::new(1.0, 0.0));
    }
}
