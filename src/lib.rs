//! Voronoi territory overlay for space strategy maps
//!
//! Every owned map object claims the part of the map closer to it than to any
//! other object. This crate computes that tessellation for the visible
//! objects each frame, strokes the borders between different empires and
//! fills each territory with a color that depends on how its owner relates to
//! the viewer (own, ally or other).
//!
//! # Quick Start
//!
//! ```rust
//! use empire_voronoi::*;
//!
//! let owners = [AccountId::new("A"), AccountId::new("B"), AccountId::new("C")];
//! let host = ScatteredHost::new(AccountId::new("A"), &owners, 80, 1000.0, 6, 42);
//!
//! let config = OverlayConfigBuilder::new()
//!     .border_width(3.0).unwrap()
//!     .build().unwrap();
//!
//! let mut overlay = TerritoryOverlay::from_host(config, &host);
//! overlay.activate();
//! overlay.refresh(&host);
//!
//! let mut canvas = RecordingCanvas::new();
//! if let FrameReport::Drawn(stats) = overlay.draw_frame(&IdentityViewport, &mut canvas).unwrap() {
//!     println!("{} territories, {} border segments", stats.cells_drawn, stats.border_segments);
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): "whose territory is this" lookups using a KD-tree
//! - `serde`: Enables serialization support for configuration and map data

// Modules
pub mod error;
pub mod config;
pub mod site;
pub mod bbox;
pub mod host;
pub mod diagram;
pub mod ownership;
pub mod render;
pub mod overlay;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{OverlayError, Result};
pub use config::{OverlayConfig, OverlayConfigBuilder, DEFAULT_MIN_SITES};
pub use site::{project_sites, AccountId, Owner, Site, NULL_ADDRESS};
pub use bbox::BoundingBox;
pub use host::{
    CameraViewport, GameHost, IdentityViewport, MapObject, ObjectFilter, ObjectKind,
    ScatteredHost, StaticHost, Viewport,
};
pub use diagram::{Cell, DelaunayEngine, Diagram, DiagramEngine, Edge, HalfEdge};
pub use ownership::{Alliance, OwnershipRelation};
pub use render::{
    draw_cell_borders, fill_cell_region, pick_colors, render_diagram, rgba, shift_toward, to_css,
    Canvas, ColorMapper, DrawCommand, Palette, RecordingCanvas, RegionColor, RenderOptions,
    RenderStats, StrokeStyle, DEFAULT_REGION_SHIFT,
};
pub use overlay::{FrameReport, PanelModel, RefreshTimer, SkipReason, TerritoryOverlay};

#[cfg(feature = "spatial-index")]
pub use spatial::TerritoryIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
