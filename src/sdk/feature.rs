use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path};
use thiserror::Error;

pub const TITLE_PROPERTY: &str = "DES_TITLE";
pub const CATEGORY_PROPERTY: &str = "LOCAL_AUTH";
pub const LINK_PROPERTY: &str = "LINK";

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Failed to read feature file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Expected a Feature or FeatureCollection")]
    UnsupportedRoot,
}

/// Longitude/latitude pair in degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for LonLat {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lon, self.lat)
    }
}

/// A point as the rendering layer hands it out: optional position plus attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointFeature {
    pub coordinates: Option<LonLat>,
    pub properties: JsonObject,
}

impl PointFeature {
    pub fn new(coordinates: Option<LonLat>, properties: JsonObject) -> Self {
        Self {
            coordinates,
            properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|v| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.property(TITLE_PROPERTY)
    }

    /// Local authority the garden belongs to, if tagged with a non-empty one.
    pub fn category(&self) -> Option<&str> {
        self.property(CATEGORY_PROPERTY).filter(|c| !c.is_empty())
    }

    pub fn link(&self) -> Option<&str> {
        self.property(LINK_PROPERTY)
    }

    pub fn to_geojson(&self) -> Feature {
        Feature {
            bbox: None,
            geometry: self
                .coordinates
                .map(|c| Geometry::new(Value::Point(vec![c.lon, c.lat]))),
            id: None,
            properties: Some(self.properties.clone()),
            foreign_members: None,
        }
    }
}

impl From<Feature> for PointFeature {
    fn from(feature: Feature) -> Self {
        let coordinates = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Point(position)) if position.len() >= 2 => {
                Some(LonLat::new(position[0], position[1]))
            }
            _ => None,
        };
        Self {
            coordinates,
            properties: feature.properties.unwrap_or_default(),
        }
    }
}

/// Wraps zero or one feature in a collection, the shape highlight layers expect.
pub fn single_feature_collection(feature: Option<&PointFeature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: feature.map(PointFeature::to_geojson).into_iter().collect(),
        foreign_members: None,
    }
}

/// Flattens a GeoJSON document into its features.
pub fn parse_geojson_features(text: &str) -> Result<Vec<Feature>, FeatureError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(feature) => Ok(vec![feature]),
        GeoJson::Geometry(_) => Err(FeatureError::UnsupportedRoot),
    }
}

pub fn parse_features(text: &str) -> Result<Vec<PointFeature>, FeatureError> {
    Ok(parse_geojson_features(text)?
        .into_iter()
        .map(PointFeature::from)
        .collect())
}

/// Reads a layer snapshot exported from the map style.
pub fn read_geojson_features<P: AsRef<Path>>(path: P) -> Result<Vec<Feature>, FeatureError> {
    let data = fs::read_to_string(path.as_ref())?;
    let features = parse_geojson_features(&data)?;
    log::debug!(
        "Loaded {} features from {}",
        features.len(),
        path.as_ref().display()
    );
    Ok(features)
}

pub fn load_features<P: AsRef<Path>>(path: P) -> Result<Vec<PointFeature>, FeatureError> {
    Ok(read_geojson_features(path)?
        .into_iter()
        .map(PointFeature::from)
        .collect())
}
