use super::types::{DirectionsResponse, GeocodeResponse};
use crate::sdk::config::MapboxConfig;
use crate::sdk::feature::LonLat;
use crate::sdk::routing::error::ServiceError;
use crate::sdk::routing::route::{Route, RouteStep};
use crate::sdk::routing::service::MapServices;
use crate::sdk::util::rate_limit::Limiter;
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

pub struct MapboxProvider {
    client: Client,
    access_token: String,
    base_url: String,
    profile: String,
    limiter: Limiter,
}

impl MapboxProvider {
    pub fn new(config: &MapboxConfig) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            base_url: config.base_url.clone(),
            profile: config.profile.clone(),
            limiter: Limiter::per_minute(config.requests_per_minute),
        })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ServiceError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| ServiceError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn geocode_url(&self, query: &str) -> Result<Url, ServiceError> {
        let file = format!("{}.json", query);
        self.endpoint(["geocoding", "v5", "mapbox.places", file.as_str()])
    }

    pub(crate) fn directions_url(&self, from: LonLat, to: LonLat) -> Result<Url, ServiceError> {
        let waypoints = format!("{},{};{},{}", from.lon, from.lat, to.lon, to.lat);
        let mut segments = vec!["directions", "v5"];
        segments.extend(self.profile.split('/').filter(|s| !s.is_empty()));
        segments.push(waypoints.as_str());

        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .append_pair("geometries", "geojson")
            .append_pair("steps", "true")
            .append_pair("overview", "full");
        Ok(url)
    }

    /// Sends a GET and returns the body, mapping non-success statuses to errors.
    fn fetch(&self, mut url: Url) -> Result<String, ServiceError> {
        self.limiter.wait();
        // logged before the token is attached
        let shown = url.to_string();
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);

        let response = match self.client.get(url).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send GET request. URL: {}\nError: {}", shown, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ServiceError::from_body(status, &text));
        }
        Ok(text)
    }
}

impl MapServices for MapboxProvider {
    fn geocode(&self, query: &str) -> Result<Option<LonLat>, ServiceError> {
        log::debug!("[PROVIDER] Calling remote geocode for query: \"{}\"", query);
        let url = self.geocode_url(query)?;
        let text = self.fetch(url)?;
        parse_geocode(&text)
    }

    fn directions(&self, from: LonLat, to: LonLat) -> Result<Option<Route>, ServiceError> {
        log::debug!(
            "[PROVIDER] Calling remote directions for {} -> {}",
            from,
            to
        );
        let url = self.directions_url(from, to)?;
        let text = self.fetch(url)?;
        parse_directions(&text)
    }
}

pub(crate) fn parse_geocode(text: &str) -> Result<Option<LonLat>, ServiceError> {
    let resp: GeocodeResponse = serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse GeocodeResponse. Error: {}. Body: {}", e, text);
        e
    })?;

    Ok(resp.features.first().map(|f| {
        if let Some(name) = &f.place_name {
            log::debug!("[PROVIDER] Best geocode match: {}", name);
        }
        LonLat::new(f.center[0], f.center[1])
    }))
}

pub(crate) fn parse_directions(text: &str) -> Result<Option<Route>, ServiceError> {
    let resp: DirectionsResponse = serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse DirectionsResponse. Error: {}. Body: {}", e, text);
        e
    })?;

    let Some(route) = resp.routes.into_iter().next() else {
        log::debug!(
            "[PROVIDER] Directions answered {} with no routes",
            resp.code.as_deref().unwrap_or("no code")
        );
        return Ok(None);
    };

    // Two waypoints give a single leg
    let steps = route
        .legs
        .into_iter()
        .next()
        .map(|leg| {
            leg.steps
                .into_iter()
                .map(|s| RouteStep::new(s.maneuver.instruction))
                .collect()
        })
        .unwrap_or_default();

    Ok(Some(Route {
        geometry: route.geometry,
        steps,
        distance_m: route.distance,
        duration_s: route.duration,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> MapboxProvider {
        let mut config = MapboxConfig::new("pk.secret");
        config.base_url = base_url.to_string();
        MapboxProvider::new(&config).unwrap()
    }

    #[test]
    fn geocode_url_escapes_the_query() {
        let url = provider("https://api.mapbox.com").geocode_url("St Andrews?").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/St%20Andrews%3F.json"
        );
    }

    #[test]
    fn directions_url_carries_profile_waypoints_and_options() {
        let url = provider("http://localhost:8080/")
            .directions_url(LonLat::new(-4.25, 55.86), LonLat::new(-4.0, 56.0))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/directions/v5/mapbox/driving/-4.25,55.86;-4,56?geometries=geojson&steps=true&overview=full"
        );
    }

    #[test]
    fn bad_base_url_is_reported() {
        let err = provider("not a url").geocode_url("x").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidUrl(_)));
    }

    #[test]
    fn first_geocode_feature_wins() {
        let body = r#"{"features": [
            {"center": [-3.9397, 56.1165], "place_name": "Stirling, Scotland"},
            {"center": [0.0, 0.0]}
        ]}"#;
        assert_eq!(parse_geocode(body).unwrap(), Some(LonLat::new(-3.9397, 56.1165)));
    }

    #[test]
    fn empty_geocode_is_none_not_error() {
        assert_eq!(parse_geocode(r#"{"type": "FeatureCollection", "features": []}"#).unwrap(), None);
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(parse_geocode("<html>"), Err(ServiceError::Parse(_))));
    }

    #[test]
    fn directions_steps_come_from_first_leg() {
        let body = r#"{"code": "Ok", "routes": [{
            "geometry": {"type": "LineString", "coordinates": [[-4.25, 55.86], [-4.0, 56.0]]},
            "distance": 31000.5, "duration": 1900.0,
            "legs": [{"steps": [
                {"maneuver": {"instruction": "Drive north"}},
                {"maneuver": {"instruction": "Turn left"}},
                {"maneuver": {"instruction": "Arrive"}}
            ]}]
        }]}"#;
        let route = parse_directions(body).unwrap().unwrap();
        let steps: Vec<_> = route.steps.iter().map(|s| s.instruction.as_str()).collect();
        assert_eq!(steps, ["Drive north", "Turn left", "Arrive"]);
        assert_eq!(route.distance_m, 31000.5);
    }

    #[test]
    fn no_route_is_none() {
        let body = r#"{"code": "NoRoute", "routes": []}"#;
        assert!(parse_directions(body).unwrap().is_none());
    }
}
