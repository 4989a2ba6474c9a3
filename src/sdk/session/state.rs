use crate::sdk::feature::{LonLat, PointFeature};
use crate::sdk::routing::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Garden shown without a start location, so no route.
    Zoomed,
    Routing,
    Routed,
}

/// Directions wanted for the current selection. Only the most recently issued
/// request may be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub seq: u64,
    pub from: LonLat,
    pub to: LonLat,
    pub garden_title: String,
}

#[derive(Debug, Clone)]
pub struct SelectionState {
    reference_location: Option<LonLat>,
    active_route: Option<Route>,
    highlighted_station: Option<PointFeature>,
    phase: Phase,
    next_seq: u64,
    pending: Option<u64>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            reference_location: None,
            active_route: None,
            highlighted_station: None,
            phase: Phase::Idle,
            next_seq: 1,
            pending: None,
        }
    }
}

impl SelectionState {
    pub fn reference_location(&self) -> Option<LonLat> {
        self.reference_location
    }

    pub fn active_route(&self) -> Option<&Route> {
        self.active_route.as_ref()
    }

    pub fn highlighted_station(&self) -> Option<&PointFeature> {
        self.highlighted_station.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending
    }

    pub(crate) fn set_reference_location(&mut self, location: Option<LonLat>) {
        self.reference_location = location;
    }

    pub(crate) fn set_highlighted_station(&mut self, station: Option<PointFeature>) {
        self.highlighted_station = station;
    }

    /// Drops the route and forgets any outstanding request.
    pub(crate) fn clear_route(&mut self, phase: Phase) {
        self.active_route = None;
        self.pending = None;
        self.phase = phase;
    }

    pub(crate) fn issue_request(&mut self, from: LonLat, to: LonLat, garden_title: &str) -> RouteRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(seq);
        self.active_route = None;
        self.phase = Phase::Routing;
        RouteRequest {
            seq,
            from,
            to,
            garden_title: garden_title.to_string(),
        }
    }

    /// Claims the outstanding slot for `seq`. False when a later selection,
    /// reset or location change has superseded it.
    pub(crate) fn accept(&mut self, seq: u64) -> bool {
        if self.pending == Some(seq) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_routed(&mut self, route: Route) {
        self.active_route = Some(route);
        self.phase = Phase::Routed;
    }
}
