//! Stroking of inter-owner borders

use super::{Canvas, StrokeStyle};
use crate::diagram::{Cell, Diagram};
use crate::site::Site;

/// Stroke the sides of a cell that separate different owners
///
/// The whole boundary goes into one path: sides between two sites of the
/// same owner become pen moves, every other side (including the ones on the
/// bounding box, where there is no site across) becomes a line. The path is
/// stroked once at the end.
///
/// Cells with two half-edges or fewer are skipped. Returns the number of line
/// segments added to the path.
pub fn draw_cell_borders<C>(
    canvas: &mut C,
    diagram: &Diagram,
    sites: &[Site],
    cell: &Cell,
    style: &StrokeStyle,
) -> usize
where
    C: Canvas + ?Sized,
{
    if cell.is_degenerate() {
        return 0;
    }

    canvas.begin_path();
    canvas.move_to(cell.half_edges[0].start_point());

    let mut segments = 0;
    for half_edge in &cell.half_edges {
        let edge = diagram.edge_of(half_edge);
        let left_owner = &sites[edge.left_site].owner;
        let right_owner = edge.right_site.map(|r| &sites[r].owner);

        if right_owner == Some(left_owner) {
            canvas.move_to(half_edge.end_point());
        } else {
            canvas.line_to(half_edge.end_point());
            segments += 1;
        }
    }

    canvas.stroke(style);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Edge, HalfEdge};
    use crate::render::{DrawCommand, RecordingCanvas};
    use crate::site::Owner;
    use glam::DVec2;

    const STYLE: StrokeStyle = StrokeStyle {
        width: 4.0,
        color: [1.0, 1.0, 1.0, 0.3],
    };

    fn sites() -> Vec<Site> {
        vec![
            Site::new(0.0, 0.0, Owner::account("A")),
            Site::new(10.0, 0.0, Owner::account("A")),
            Site::new(0.0, 10.0, Owner::account("B")),
            Site::new(10.0, 10.0, Owner::Unowned),
            Site::new(-10.0, 0.0, Owner::Unowned),
        ]
    }

    fn edge(left: usize, right: Option<usize>) -> Edge {
        Edge {
            left_site: left,
            right_site: right,
            va: DVec2::ZERO,
            vb: DVec2::ZERO,
        }
    }

    /// Triangle cell for site 0 whose three sides use the given edges
    fn triangle(edges: Vec<Edge>) -> (Diagram, Cell) {
        let points = [DVec2::new(0.0, 0.0), DVec2::new(5.0, 0.0), DVec2::new(0.0, 5.0)];
        let half_edges = (0..3)
            .map(|i| HalfEdge::new(points[i], points[(i + 1) % 3], i))
            .collect();
        let cell = Cell { site: 0, half_edges };
        (Diagram { cells: vec![cell.clone()], edges }, cell)
    }

    #[test]
    fn test_same_owner_moves_different_owner_draws() {
        // A/A, A/B, boundary
        let (diagram, cell) = triangle(vec![edge(0, Some(1)), edge(0, Some(2)), edge(0, None)]);
        let mut canvas = RecordingCanvas::new();

        let segments = draw_cell_borders(&mut canvas, &diagram, &sites(), &cell, &STYLE);

        assert_eq!(segments, 2);
        assert_eq!(
            canvas.commands,
            vec![
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(DVec2::new(0.0, 0.0)),
                DrawCommand::MoveTo(DVec2::new(5.0, 0.0)),
                DrawCommand::LineTo(DVec2::new(0.0, 5.0)),
                DrawCommand::LineTo(DVec2::new(0.0, 0.0)),
                DrawCommand::Stroke(STYLE),
            ]
        );
    }

    #[test]
    fn test_exactly_one_segment_for_single_foreign_side() {
        // A/A, A/B, A/A
        let (diagram, cell) = triangle(vec![edge(0, Some(1)), edge(0, Some(2)), edge(1, Some(0))]);
        let mut canvas = RecordingCanvas::new();

        let segments = draw_cell_borders(&mut canvas, &diagram, &sites(), &cell, &STYLE);

        assert_eq!(segments, 1);
        assert_eq!(canvas.stroked_segments(), 1);
        assert_eq!(canvas.stroke_count(), 1);
    }

    #[test]
    fn test_boundary_edge_always_strokes() {
        let (diagram, cell) = triangle(vec![edge(0, None), edge(0, None), edge(0, None)]);
        let mut canvas = RecordingCanvas::new();

        assert_eq!(draw_cell_borders(&mut canvas, &diagram, &sites(), &cell, &STYLE), 3);
    }

    #[test]
    fn test_unowned_pair_counts_as_same_owner() {
        let (mut diagram, _) = triangle(vec![edge(3, Some(4)), edge(3, None), edge(3, Some(0))]);
        diagram.cells[0].site = 3;
        let cell = diagram.cells[0].clone();
        let mut canvas = RecordingCanvas::new();

        // Unowned/unowned moves; boundary draws; unowned/A draws
        assert_eq!(draw_cell_borders(&mut canvas, &diagram, &sites(), &cell, &STYLE), 2);
    }

    #[test]
    fn test_degenerate_cell_skipped() {
        let cell = Cell {
            site: 0,
            half_edges: vec![
                HalfEdge::new(DVec2::ZERO, DVec2::X, 0),
                HalfEdge::new(DVec2::X, DVec2::ZERO, 0),
            ],
        };
        let diagram = Diagram {
            cells: vec![cell.clone()],
            edges: vec![edge(0, None)],
        };
        let mut canvas = RecordingCanvas::new();

        assert_eq!(draw_cell_borders(&mut canvas, &diagram, &sites(), &cell, &STYLE), 0);
        assert!(canvas.is_empty());
    }
}
