use crate::sdk::feature::LonLat;
use geojson::{Feature, FeatureCollection, Geometry};

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
}

impl RouteStep {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
        }
    }
}

/// A driving route as returned by the directions service.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub geometry: Geometry,
    pub steps: Vec<RouteStep>,
    pub distance_m: f64,
    pub duration_s: f64,
}

impl Route {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_s / 60.0
    }

    /// Data for the route line layer.
    pub fn to_feature(&self) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(self.geometry.clone()),
            id: None,
            properties: None,
            foreign_members: None,
        }
    }
}

/// The collection the route layer is reset to when nothing is routed.
pub fn empty_route_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// Directions widget contents: a heading and the ordered turn instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsPanel {
    pub title: String,
    pub instructions: Vec<String>,
}

impl DirectionsPanel {
    pub fn for_route(destination_title: &str, route: &Route) -> Self {
        Self {
            title: format!("Directions to {}", destination_title),
            instructions: route.steps.iter().map(|s| s.instruction.clone()).collect(),
        }
    }
}

/// South-west / north-east corners of an area to frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LonLat,
    pub north_east: LonLat,
}

impl Bounds {
    pub fn from_point(point: LonLat) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(mut self, point: LonLat) -> Self {
        self.south_west.lon = self.south_west.lon.min(point.lon);
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.north_east.lon = self.north_east.lon.max(point.lon);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self
    }

    pub fn covering(a: LonLat, b: LonLat) -> Self {
        Self::from_point(a).extend(b)
    }

    pub fn contains(&self, point: LonLat) -> bool {
        (self.south_west.lon..=self.north_east.lon).contains(&point.lon)
            && (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value;

    fn three_step_route() -> Route {
        Route {
            geometry: Geometry::new(Value::LineString(vec![vec![-4.2, 55.8], vec![-4.0, 56.0]])),
            steps: vec![
                RouteStep::new("Head north on Buchanan Street"),
                RouteStep::new("Turn right onto the M80"),
                RouteStep::new("You have arrived at your destination"),
            ],
            distance_m: 42_500.0,
            duration_s: 2_700.0,
        }
    }

    #[test]
    fn panel_keeps_step_order_and_names_destination() {
        let panel = DirectionsPanel::for_route("Cambo Gardens", &three_step_route());
        assert_eq!(panel.title, "Directions to Cambo Gardens");
        assert_eq!(panel.instructions.len(), 3);
        assert_eq!(panel.instructions[0], "Head north on Buchanan Street");
        assert_eq!(panel.instructions[2], "You have arrived at your destination");
    }

    #[test]
    fn bounds_cover_both_ends_in_any_order() {
        let a = LonLat::new(-4.25, 55.86);
        let b = LonLat::new(-3.19, 56.95);
        let bounds = Bounds::covering(b, a);
        assert_eq!(bounds.south_west, LonLat::new(-4.25, 55.86));
        assert_eq!(bounds.north_east, LonLat::new(-3.19, 56.95));
        assert!(bounds.contains(a) && bounds.contains(b));
    }

    #[test]
    fn unit_conversions() {
        let route = three_step_route();
        assert_eq!(route.distance_km(), 42.5);
        assert_eq!(route.duration_minutes(), 45.0);
    }
}
