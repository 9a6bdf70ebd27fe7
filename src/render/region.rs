//! Filling of ownership regions

use glam::DVec2;

use super::{Canvas, RegionColor};
use crate::diagram::Cell;
use crate::site::Site;

/// Default weight of the site when shrinking region vertices
pub const DEFAULT_REGION_SHIFT: f64 = 0.1;

/// Pull a vertex toward a site
///
/// Weighted average `(vertex + site * shift) / (1 + shift)`: with the default
/// weight of `0.1` every vertex moves 1/11th of the way to the site, leaving
/// a gap between neighbouring fills where the border stroke shows through.
///
/// # Example
///
/// ```
/// use empire_voronoi::shift_toward;
/// use glam::DVec2;
///
/// let p = shift_toward(DVec2::new(10.0, 10.0), DVec2::ZERO, 0.1);
/// assert!((p.x - 10.0 / 1.1).abs() < 1e-12);
/// ```
#[inline]
pub fn shift_toward(vertex: DVec2, site: DVec2, shift: f64) -> DVec2 {
    (vertex + site * shift) / (1.0 + shift)
}

/// Fill a cell's polygon, shrunk toward its site
///
/// The polygon runs through the shifted start point of every half-edge and
/// is closed before filling. Cells with two half-edges or fewer are skipped;
/// returns whether a fill was issued.
pub fn fill_cell_region<C>(
    canvas: &mut C,
    cell: &Cell,
    site: &Site,
    color: RegionColor,
    shift: f64,
) -> bool
where
    C: Canvas + ?Sized,
{
    if cell.is_degenerate() {
        return false;
    }

    canvas.begin_path();
    canvas.move_to(shift_toward(cell.half_edges[0].start_point(), site.position, shift));
    for half_edge in &cell.half_edges {
        canvas.line_to(shift_toward(half_edge.start_point(), site.position, shift));
    }
    canvas.close_path();
    canvas.fill(color);
    true
}
