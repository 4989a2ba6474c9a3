use garden_trails::sdk::directory::DirectoryGroup;
use garden_trails::sdk::feature::LonLat;
use garden_trails::sdk::routing::DirectionsPanel;
use garden_trails::sdk::session::{GardenPopup, Presenter, ViewportCommand};
use geojson::FeatureCollection;

/// Prints what the map page would display.
#[derive(Default)]
pub struct TerminalPresenter {
    /// Also print layer and camera updates.
    pub verbose: bool,
}

impl Presenter for TerminalPresenter {
    fn show_popup(&mut self, popup: &GardenPopup) {
        println!("📍 {} ({})", popup.title, popup.position);
        if let Some(link) = &popup.link {
            println!("   View Details: {}", link);
        }
    }

    fn close_popup(&mut self) {
        if self.verbose {
            println!("[popup closed]");
        }
    }

    fn highlight_station(&mut self, station: &FeatureCollection) {
        match station.features.first() {
            Some(feature) => {
                let name = feature
                    .property("name")
                    .or_else(|| feature.property("Name"))
                    .and_then(|v| v.as_str())
                    .unwrap_or("unnamed station");
                println!("🚉 Nearest station: {}", name);
            }
            None if self.verbose => println!("[station highlight cleared]"),
            None => {}
        }
    }

    fn draw_route(&mut self, route: &FeatureCollection) {
        if self.verbose {
            println!("[route layer: {} feature(s)]", route.features.len());
        }
    }

    fn show_directions(&mut self, panel: &DirectionsPanel) {
        println!("{}", panel.title);
        for (i, instruction) in panel.instructions.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, instruction);
        }
    }

    fn hide_directions(&mut self) {
        if self.verbose {
            println!("[directions hidden]");
        }
    }

    fn render_directory(&mut self, groups: &[DirectoryGroup]) {
        for group in groups {
            println!("{} ({})", group.key, group.members.len());
            for title in group.titles() {
                println!("  - {}", title);
            }
        }
    }

    fn set_directory_open(&mut self, open: bool) {
        if self.verbose {
            println!("[directory {}]", if open { "open" } else { "closed" });
        }
    }

    fn show_notice(&mut self, text: &str) {
        eprintln!("⚠️  {}", text);
    }

    fn move_viewport(&mut self, command: &ViewportCommand) {
        if !self.verbose {
            return;
        }
        match command {
            ViewportCommand::FlyTo { center, zoom, .. } => {
                println!("[fly to {} zoom {}]", center, zoom)
            }
            ViewportCommand::FitBounds { bounds, padding } => println!(
                "[fit {} .. {} padding {}]",
                bounds.south_west, bounds.north_east, padding
            ),
        }
    }

    fn place_user_marker(&mut self, position: Option<LonLat>) {
        if let Some(p) = position {
            println!("🟢 Start location: {}", p);
        }
    }

    fn clear_location_input(&mut self) {}
}
