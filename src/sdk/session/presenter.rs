use crate::sdk::directory::DirectoryGroup;
use crate::sdk::feature::LonLat;
use crate::sdk::routing::{Bounds, DirectionsPanel};
use geojson::FeatureCollection;

/// Popup shown over a selected garden.
#[derive(Debug, Clone, PartialEq)]
pub struct GardenPopup {
    pub position: LonLat,
    pub title: String,
    pub link: Option<String>,
}

/// Animated camera move. `speed` and `curve` are cosmetic and may be ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportCommand {
    FlyTo {
        center: LonLat,
        zoom: f64,
        speed: Option<f64>,
        curve: Option<f64>,
    },
    FitBounds {
        bounds: Bounds,
        padding: u32,
    },
}

/// Everything the garden map draws or shows. The session only ever talks to
/// the page through this trait.
pub trait Presenter {
    fn show_popup(&mut self, popup: &GardenPopup);

    fn close_popup(&mut self);

    /// Replaces the nearest-station layer; an empty collection clears it.
    fn highlight_station(&mut self, station: &FeatureCollection);

    /// Replaces the route line layer; an empty collection clears it.
    fn draw_route(&mut self, route: &FeatureCollection);

    fn show_directions(&mut self, panel: &DirectionsPanel);

    fn hide_directions(&mut self);

    fn render_directory(&mut self, groups: &[DirectoryGroup]);

    fn set_directory_open(&mut self, open: bool);

    /// Blocking user-facing message.
    fn show_notice(&mut self, text: &str);

    fn move_viewport(&mut self, command: &ViewportCommand);

    /// Moves the start-location marker, or removes it with `None`.
    fn place_user_marker(&mut self, position: Option<LonLat>);

    fn clear_location_input(&mut self);
}
