//! Spatial indexing for territory lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// KD-tree over object positions
///
/// The territory containing a point is the Voronoi cell of the nearest
/// object, so a nearest-neighbour query answers "whose territory is this".
/// Built on world coordinates; viewports must preserve nearest neighbours.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct TerritoryIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl TerritoryIndex {
    /// Build the index, `None` for an empty list or any non-finite position
    ///
    /// # Example
    ///
    /// ```
    /// use empire_voronoi::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let positions = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
    /// let index = TerritoryIndex::new(&positions).unwrap();
    /// assert_eq!(index.find_nearest(DVec2::new(8.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(positions: &[DVec2]) -> Option<Self> {
        if positions.is_empty() || positions.iter().any(|p| !p.is_finite()) {
            return None;
        }
        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();

        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        })
    }

    /// Index (into the build slice) of the position nearest to `point`
    pub fn find_nearest(&self, point: DVec2) -> usize {
        let result = self.tree.nearest_one::<SquaredEuclidean>(&[point.x, point.y]);
        result.item
    }
}
