//! Rendering of faction borders and ownership regions
//!
//! Renderers issue path commands against the [`Canvas`] trait, which mirrors
//! the subset of an HTML canvas 2D context they need. [`RecordingCanvas`]
//! keeps the commands in memory.

mod border;
mod colors;
mod region;

pub use border::draw_cell_borders;
pub use colors::{pick_colors, rgba, to_css, ColorMapper, Palette, RegionColor};
pub use region::{fill_cell_region, shift_toward, DEFAULT_REGION_SHIFT};

use glam::DVec2;
use tracing::debug;

use crate::diagram::Diagram;
use crate::ownership::{Alliance, OwnershipRelation};
use crate::site::Site;

/// Line width and color for a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: RegionColor,
}

/// 2D drawing surface
pub trait Canvas {
    /// Start a new path, discarding any pending one
    fn begin_path(&mut self);
    /// Move the pen without drawing
    fn move_to(&mut self, point: DVec2);
    /// Add a line segment from the pen to `point`
    fn line_to(&mut self, point: DVec2);
    fn close_path(&mut self);
    /// Stroke the pending path's line segments
    fn stroke(&mut self, style: &StrokeStyle);
    /// Fill the pending path
    fn fill(&mut self, color: RegionColor);
}

/// A recorded canvas call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    BeginPath,
    MoveTo(DVec2),
    LineTo(DVec2),
    ClosePath,
    Stroke(StrokeStyle),
    Fill(RegionColor),
}

/// Canvas that records every call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of stroke calls
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke(_)))
            .count()
    }

    /// Colors of every fill call, in order
    pub fn fill_colors(&self) -> Vec<RegionColor> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Line segments that ended up in stroked paths
    ///
    /// Segments of a path count once that path is stroked; paths that are
    /// only filled or never finished are ignored.
    pub fn stroked_segments(&self) -> usize {
        let mut pending = 0;
        let mut stroked = 0;
        for command in &self.commands {
            match command {
                DrawCommand::BeginPath => pending = 0,
                DrawCommand::LineTo(_) => pending += 1,
                DrawCommand::Stroke(_) => stroked += pending,
                _ => {}
            }
        }
        stroked
    }
}

impl Canvas for RecordingCanvas {
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: DVec2) {
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke(*style));
    }

    fn fill(&mut self, color: RegionColor) {
        self.commands.push(DrawCommand::Fill(color));
    }
}

/// Which layers to draw and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub show_borders: bool,
    pub fill_regions: bool,
    pub border_width: f64,
    /// Weight pulling region vertices toward their site
    pub region_shift: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_borders: true,
            fill_regions: true,
            border_width: 4.0,
            region_shift: DEFAULT_REGION_SHIFT,
        }
    }
}

/// Counters for one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Cells that reached the renderers
    pub cells_drawn: usize,
    /// Owned cells skipped for having two half-edges or fewer
    pub degenerate_cells: usize,
    /// Cells skipped because nobody owns their site
    pub unowned_cells: usize,
    /// Stroke calls issued for borders
    pub border_paths: usize,
    /// Line segments inside those border paths
    pub border_segments: usize,
    /// Fill calls issued for regions
    pub regions_filled: usize,
}

/// Draw borders and regions of every owned, non-degenerate cell
///
/// For each cell the border path is stroked before its region is filled.
pub fn render_diagram<C, M>(
    canvas: &mut C,
    diagram: &Diagram,
    sites: &[Site],
    alliance: &Alliance,
    colors: &M,
    options: &RenderOptions,
) -> RenderStats
where
    C: Canvas + ?Sized,
    M: ColorMapper + ?Sized,
{
    let mut stats = RenderStats::default();
    let border_style = StrokeStyle {
        width: options.border_width,
        color: colors.border_color(),
    };

    for cell in &diagram.cells {
        let site = &sites[cell.site];
        let relation = alliance.relation(&site.owner);
        if relation == OwnershipRelation::Unowned {
            stats.unowned_cells += 1;
            continue;
        }
        if cell.is_degenerate() {
            stats.degenerate_cells += 1;
            continue;
        }

        stats.cells_drawn += 1;

        if options.show_borders {
            stats.border_segments += draw_cell_borders(canvas, diagram, sites, cell, &border_style);
            stats.border_paths += 1;
        }

        if options.fill_regions {
            if let Some(color) = colors.fill_color(relation) {
                fill_cell_region(canvas, cell, site, color, options.region_shift);
                stats.regions_filled += 1;
            }
        }
    }

    if stats.degenerate_cells > 0 {
        debug!(count = stats.degenerate_cells, "skipped degenerate cells");
    }
    stats
}
