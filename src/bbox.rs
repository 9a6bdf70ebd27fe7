//! Bounding box of the projected sites

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::site::Site;

/// Axis-aligned box the diagram is clipped to
///
/// `top` holds the smallest y and `bottom` the largest, which is the order the
/// diagram engine expects for canvas coordinates (y grows downwards).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Minimal box enclosing every site
    ///
    /// The y extremes are cross-assigned: `top` receives the minimum y and
    /// `bottom` the maximum y.
    ///
    /// An empty slice yields `+inf` for `left`/`top` and `-inf` for
    /// `right`/`bottom`; check [`BoundingBox::is_finite`] before use.
    ///
    /// # Example
    ///
    /// ```
    /// use empire_voronoi::{BoundingBox, Owner, Site};
    ///
    /// let sites = vec![
    ///     Site::new(0.0, 10.0, Owner::Unowned),
    ///     Site::new(5.0, -2.0, Owner::Unowned),
    /// ];
    /// let bbox = BoundingBox::from_sites(&sites);
    /// assert_eq!((bbox.left, bbox.right), (0.0, 5.0));
    /// assert_eq!((bbox.top, bbox.bottom), (-2.0, 10.0));
    ///
    /// assert!(!BoundingBox::from_sites(&[]).is_finite());
    /// ```
    ///
    /// A site with a non-finite coordinate makes every bound NaN.
    pub fn from_sites(sites: &[Site]) -> Self {
        if sites.iter().any(|s| !s.position.is_finite()) {
            return Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        }

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for site in sites {
            min_x = min_x.min(site.position.x);
            max_x = max_x.max(site.position.x);
            min_y = min_y.min(site.position.y);
            max_y = max_y.max(site.position.y);
        }

        Self {
            left: min_x,
            right: max_x,
            top: min_y,
            bottom: max_y,
        }
    }

    /// All four bounds are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.right.is_finite()
            && self.top.is_finite()
            && self.bottom.is_finite()
    }

    /// Finite and with positive width and height
    pub fn is_renderable(&self) -> bool {
        self.is_finite() && self.left < self.right && self.top < self.bottom
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Corners in traversal order: left/top, right/top, right/bottom, left/bottom
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.left, self.top),
            DVec2::new(self.right, self.top),
            DVec2::new(self.right, self.bottom),
            DVec2::new(self.left, self.bottom),
        ]
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}
