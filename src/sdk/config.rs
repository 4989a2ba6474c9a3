use crate::sdk::feature::LonLat;
use crate::sdk::util::rate_limit::DEFAULT_REQUESTS_PER_MINUTE;
use std::env;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";
pub const DEFAULT_PROFILE: &str = "mapbox/driving";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("MAPBOX_ACCESS_TOKEN is not set")]
    MissingToken,

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Credentials and endpoints for the hosted geocoding and directions APIs.
#[derive(Debug, Clone)]
pub struct MapboxConfig {
    pub access_token: String,
    pub base_url: String,
    pub profile: String,
    pub requests_per_minute: u32,
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let access_token = env::var("MAPBOX_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(access_token);
        if let Ok(base_url) = env::var("MAPBOX_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(profile) = env::var("MAPBOX_PROFILE") {
            config.profile = profile;
        }
        if let Ok(raw) = env::var("MAPBOX_REQUESTS_PER_MINUTE") {
            config.requests_per_minute = parse_rate(&raw)?;
        }
        Ok(config)
    }
}

fn parse_rate(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            name: "MAPBOX_REQUESTS_PER_MINUTE",
            value: raw.to_string(),
        }),
    }
}

/// Camera settings the garden map returns to and animates with.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub default_center: LonLat,
    pub default_zoom: f64,
    /// Zoom used when a garden is picked without a start location.
    pub garden_zoom: f64,
    pub garden_fly_speed: f64,
    /// Zoom used after a start location has been geocoded.
    pub location_zoom: f64,
    pub route_padding: u32,
    pub popup_close_speed: f64,
    pub popup_close_curve: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            // Central Scotland
            default_center: LonLat::new(-4.1826, 56.8169),
            default_zoom: 5.5,
            garden_zoom: 9.0,
            garden_fly_speed: 1.2,
            location_zoom: 8.0,
            route_padding: 80,
            popup_close_speed: 3.0,
            popup_close_curve: 1.4,
        }
    }
}
