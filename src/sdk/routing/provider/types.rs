use geojson::Geometry;
use serde::Deserialize;

// --- Data Structures for parsing Mapbox responses ---

#[derive(Deserialize, Debug)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

#[derive(Deserialize, Debug)]
pub struct GeocodeFeature {
    /// `[lon, lat]` of the match.
    pub center: [f64; 2],
    #[serde(default)]
    pub place_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsRoute {
    pub geometry: Geometry,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

#[derive(Deserialize, Debug)]
pub struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<LegStep>,
}

#[derive(Deserialize, Debug)]
pub struct LegStep {
    pub maneuver: Maneuver,
}

#[derive(Deserialize, Debug)]
pub struct Maneuver {
    pub instruction: String,
}
