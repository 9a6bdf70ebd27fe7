//! Render the territory overlay to an SVG file

use svg::node::element::path::{Command, Data, Position};
use svg::node::element::{Circle, Path};
use svg::{Document, Node};

use empire_voronoi::*;

const SIZE: f64 = 1024.0;

/// Canvas that turns every stroke or fill into an SVG path
struct SvgCanvas {
    document: Document,
    commands: Vec<Command>,
}

impl SvgCanvas {
    fn new() -> Self {
        Self {
            document: Document::new()
                .set("viewBox", (0.0, 0.0, SIZE, SIZE))
                .set("style", "background: #101820"),
            commands: Vec::new(),
        }
    }

    fn point(p: DVec2) -> svg::node::element::path::Parameters {
        (p.x as f32, p.y as f32).into()
    }
}

impl Canvas for SvgCanvas {
    fn begin_path(&mut self) {
        self.commands.clear();
    }

    fn move_to(&mut self, point: DVec2) {
        self.commands.push(Command::Move(Position::Absolute, Self::point(point)));
    }

    fn line_to(&mut self, point: DVec2) {
        self.commands.push(Command::Line(Position::Absolute, Self::point(point)));
    }

    fn close_path(&mut self) {
        self.commands.push(Command::Close);
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let path = Path::new()
            .set("fill", "none")
            .set("stroke", to_css(style.color))
            .set("stroke-width", style.width)
            .set("d", Data::from(self.commands.clone()));
        self.document.append(path);
    }

    fn fill(&mut self, color: RegionColor) {
        let path = Path::new()
            .set("fill", to_css(color))
            .set("d", Data::from(self.commands.clone()));
        self.document.append(path);
    }
}

fn main() -> Result<()> {
    let owners: Vec<AccountId> = (1..=5)
        .map(|i| AccountId::new(format!("0x{:040x}", i)))
        .collect();
    let host = ScatteredHost::new(owners[0].clone(), &owners, 150, 1000.0, 8, 7);

    // Brighter than the in-game defaults so the file reads on its own
    let palette = Palette {
        own: rgba(242, 248, 253, 0.5),
        ally: rgba(81, 234, 255, 0.5),
        enemy: rgba(248, 92, 80, 0.5),
        border: rgba(242, 248, 253, 0.8),
    };
    let config = OverlayConfigBuilder::new()
        .palette(palette)
        .border_width(2.0)?
        .build()?;

    let mut overlay = TerritoryOverlay::from_host(config, &host);
    overlay.alliance_mut().add_ally(owners[1].as_str())?;
    overlay.activate();
    overlay.refresh(&host);

    let viewport = CameraViewport {
        center: DVec2::ZERO,
        scale: SIZE / 2000.0,
        canvas_size: DVec2::splat(SIZE),
    };

    let mut canvas = SvgCanvas::new();
    let report = overlay.draw_frame(&viewport, &mut canvas)?;
    if let Some(stats) = report.stats() {
        println!("Drew {} territories", stats.cells_drawn);
    }

    for object in overlay.objects() {
        let p = viewport.world_to_screen(object.coords);
        let circle = Circle::new()
            .set("cx", p.x)
            .set("cy", p.y)
            .set("r", 2 + object.level as u32 / 2)
            .set("fill", "#f2f8fd");
        canvas.document.append(circle);
    }

    match svg::save("territories.svg", &canvas.document) {
        Ok(()) => println!("Saved territories.svg"),
        Err(e) => eprintln!("Failed to save territories.svg: {}", e),
    }
    Ok(())
}
