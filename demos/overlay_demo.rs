//! Run the territory overlay over a random map and print what each frame draws
//!
//! `RUST_LOG=debug cargo run --example overlay_demo` shows the pipeline logs.

use std::time::{Duration, Instant};

use empire_voronoi::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let owners: Vec<AccountId> = (1..=4)
        .map(|i| AccountId::new(format!("0x{:040x}", i)))
        .collect();
    let host = ScatteredHost::new(owners[0].clone(), &owners, 120, 2000.0, 5, 42);

    let config = OverlayConfigBuilder::new()
        .poll_period(Duration::from_millis(250))?
        .build()?;
    let mut overlay = TerritoryOverlay::from_host(config, &host);
    overlay.alliance_mut().add_ally(owners[1].as_str())?;

    let panel = overlay.activate();
    println!("Highlight: {}, allies: {}", panel.highlight, panel.allies.len());

    let viewport = CameraViewport {
        center: DVec2::ZERO,
        scale: 0.25,
        canvas_size: DVec2::new(1280.0, 960.0),
    };

    let mut timer = overlay.refresh_timer();
    let start = Instant::now();
    for frame in 0..4 {
        let now = start + Duration::from_millis(frame * 200);
        if timer.due(now) {
            overlay.refresh(&host);
        }

        let mut canvas = RecordingCanvas::new();
        match overlay.draw_frame(&viewport, &mut canvas)? {
            FrameReport::Drawn(stats) => println!(
                "Frame {}: {} territories, {} unowned, {} border segments, {} fills",
                frame, stats.cells_drawn, stats.unowned_cells, stats.border_segments, stats.regions_filled
            ),
            FrameReport::Skipped(reason) => println!("Frame {}: skipped ({:?})", frame, reason),
        }
    }

    println!("\nTerritories per owner:");
    for (owner, count) in overlay.territory_counts() {
        let relation = overlay.alliance().relation(&owner);
        let name = owner.account_id().map(AccountId::as_str).unwrap_or("unowned");
        println!("  {} ({:?}): {}", name, relation, count);
    }

    #[cfg(feature = "spatial-index")]
    {
        let pos = DVec2::new(100.0, -250.0);
        if let Some(owner) = overlay.owner_at(pos) {
            println!("\nTerritory at {:?} belongs to {:?}", pos, owner);
        }
    }

    overlay.deactivate();
    timer.reset();
    Ok(())
}
