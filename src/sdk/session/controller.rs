use super::presenter::{GardenPopup, Presenter, ViewportCommand};
use super::state::{Phase, RouteRequest, SelectionState};
use crate::sdk::config::MapSettings;
use crate::sdk::directory::{build_directory, DirectoryGroup};
use crate::sdk::feature::{single_feature_collection, LonLat, PointFeature};
use crate::sdk::routing::route::empty_route_collection;
use crate::sdk::routing::{nearest_station, Bounds, DirectionsPanel, MapServices, Route};
use geojson::FeatureCollection;

pub const EMPTY_LOCATION_NOTICE: &str = "Please enter a location.";
pub const LOCATION_NOT_FOUND_NOTICE: &str = "Location not found.";

/// Owns the garden map's selection state and funnels every user action
/// through a named transition.
pub struct GardenSession<P: Presenter> {
    presenter: P,
    settings: MapSettings,
    state: SelectionState,
    directory: Vec<DirectoryGroup>,
}

impl<P: Presenter> GardenSession<P> {
    pub fn new(presenter: P, settings: MapSettings) -> Self {
        Self {
            presenter,
            settings,
            state: SelectionState::default(),
            directory: Vec::new(),
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn directory(&self) -> &[DirectoryGroup] {
        &self.directory
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Geocodes `query` and makes it the start point for routing.
    ///
    /// Failures leave the previous start point in place and tell the user.
    pub fn set_location<S: MapServices>(&mut self, services: &S, query: &str) -> Option<LonLat> {
        let query = query.trim();
        if query.is_empty() {
            self.presenter.show_notice(EMPTY_LOCATION_NOTICE);
            return None;
        }

        let location = match services.geocode(query) {
            Ok(Some(location)) => location,
            Ok(None) => {
                log::warn!("Geocoding returned no results for \"{}\"", query);
                self.presenter.show_notice(LOCATION_NOT_FOUND_NOTICE);
                return None;
            }
            Err(e) => {
                log::error!("Geocoding error for \"{}\": {}", query, e);
                self.presenter.show_notice(LOCATION_NOT_FOUND_NOTICE);
                return None;
            }
        };

        log::info!("Start location set to {} ({})", query, location);
        self.state.set_reference_location(Some(location));
        // any route drawn from the old start point is stale now
        self.clear_route_display(Phase::Idle);
        self.presenter.place_user_marker(Some(location));
        self.presenter.move_viewport(&ViewportCommand::FlyTo {
            center: location,
            zoom: self.settings.location_zoom,
            speed: None,
            curve: None,
        });
        Some(location)
    }

    /// Forgets the start point and puts the map back to its opening view.
    pub fn reset_location(&mut self) {
        log::info!("Resetting start location");
        self.state.set_reference_location(None);
        self.presenter.place_user_marker(None);
        self.presenter.clear_location_input();
        self.clear_selection();
        self.presenter.close_popup();
        self.presenter.move_viewport(&ViewportCommand::FlyTo {
            center: self.settings.default_center,
            zoom: self.settings.default_zoom,
            speed: None,
            curve: None,
        });
    }

    /// Popup closed or a click that hit no garden.
    pub fn dismiss_selection(&mut self) {
        log::debug!("Selection dismissed");
        self.clear_selection();
        self.presenter.close_popup();
        self.presenter.move_viewport(&ViewportCommand::FlyTo {
            center: self.settings.default_center,
            zoom: self.settings.default_zoom,
            speed: Some(self.settings.popup_close_speed),
            curve: Some(self.settings.popup_close_curve),
        });
    }

    /// Handles a garden pick up to the point where directions are needed.
    ///
    /// Returns the directions request to resolve when a start location is set.
    /// Hand the outcome to [`GardenSession::complete_route`].
    pub fn begin_selection(
        &mut self,
        garden: &PointFeature,
        stations: &[PointFeature],
    ) -> Option<RouteRequest> {
        let Some(destination) = garden.coordinates else {
            log::warn!(
                "Ignoring selection of \"{}\" without a position",
                garden.title().unwrap_or_default()
            );
            return None;
        };
        let title = garden.title().unwrap_or_default();

        let station = nearest_station(destination, stations).cloned();
        match &station {
            Some(s) => log::debug!("Nearest station to {}: {:?}", title, s.coordinates),
            None => log::debug!("No station candidates for {}", title),
        }
        self.presenter
            .highlight_station(&single_feature_collection(station.as_ref()));
        self.state.set_highlighted_station(station);

        self.presenter.show_popup(&GardenPopup {
            position: destination,
            title: title.to_string(),
            link: garden.link().map(str::to_string),
        });

        match self.state.reference_location() {
            Some(origin) => {
                let request = self.state.issue_request(origin, destination, title);
                log::info!("Requesting directions #{} to {}", request.seq, title);
                Some(request)
            }
            None => {
                self.clear_route_display(Phase::Zoomed);
                self.presenter.move_viewport(&ViewportCommand::FlyTo {
                    center: destination,
                    zoom: self.settings.garden_zoom,
                    speed: Some(self.settings.garden_fly_speed),
                    curve: None,
                });
                None
            }
        }
    }

    /// Applies a directions result. Returns false when the request has been
    /// superseded and the result was dropped.
    pub fn complete_route(&mut self, request: &RouteRequest, route: Option<Route>) -> bool {
        if !self.state.accept(request.seq) {
            log::debug!("Discarding stale directions #{}", request.seq);
            return false;
        }

        let Some(route) = route else {
            self.clear_route_display(Phase::Idle);
            return true;
        };

        let route_layer = FeatureCollection {
            bbox: None,
            features: vec![route.to_feature()],
            foreign_members: None,
        };
        self.presenter.draw_route(&route_layer);
        self.presenter
            .show_directions(&DirectionsPanel::for_route(&request.garden_title, &route));
        self.presenter.move_viewport(&ViewportCommand::FitBounds {
            bounds: Bounds::covering(request.from, request.to),
            padding: self.settings.route_padding,
        });
        log::info!(
            "Route #{} to {}: {:.1} km, {} steps",
            request.seq,
            request.garden_title,
            route.distance_km(),
            route.steps.len()
        );
        self.state.set_routed(route);
        true
    }

    /// Selects a garden and resolves its directions on the calling thread.
    pub fn select_garden<S: MapServices>(
        &mut self,
        services: &S,
        garden: &PointFeature,
        stations: &[PointFeature],
    ) {
        if let Some(request) = self.begin_selection(garden, stations) {
            let route = resolve_route(services, &request);
            self.complete_route(&request, route);
        }
    }

    /// A pick from the directory list also closes the directory panel.
    pub fn select_from_directory<S: MapServices>(
        &mut self,
        services: &S,
        garden: &PointFeature,
        stations: &[PointFeature],
    ) {
        self.presenter.set_directory_open(false);
        self.select_garden(services, garden, stations);
    }

    pub fn open_directory(&mut self) {
        self.presenter.set_directory_open(true);
    }

    pub fn close_directory(&mut self) {
        self.presenter.set_directory_open(false);
    }

    /// The directions widget's close button; the route line stays drawn.
    pub fn close_directions(&mut self) {
        self.presenter.hide_directions();
    }

    /// Rebuilds the directory from the full garden layer. An empty layer
    /// (tiles still loading) keeps the current listing.
    pub fn refresh_directory(&mut self, gardens: &[PointFeature]) -> &[DirectoryGroup] {
        if !gardens.is_empty() {
            self.directory = build_directory(gardens);
            self.presenter.render_directory(&self.directory);
        }
        &self.directory
    }

    fn clear_selection(&mut self) {
        self.clear_route_display(Phase::Idle);
        self.state.set_highlighted_station(None);
        self.presenter
            .highlight_station(&single_feature_collection(None));
    }

    fn clear_route_display(&mut self, phase: Phase) {
        self.state.clear_route(phase);
        self.presenter.draw_route(&empty_route_collection());
        self.presenter.hide_directions();
    }
}

/// Calls the directions service, folding failures and empty answers into
/// `None`. Routing failures are never shown to the user.
pub fn resolve_route<S: MapServices>(services: &S, request: &RouteRequest) -> Option<Route> {
    match services.directions(request.from, request.to) {
        Ok(Some(route)) => Some(route),
        Ok(None) => {
            log::warn!("No route found for request #{}", request.seq);
            None
        }
        Err(e) => {
            log::error!("Routing error for request #{}: {}", request.seq, e);
            None
        }
    }
}
