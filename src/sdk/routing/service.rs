use super::error::ServiceError;
use super::route::Route;
use crate::sdk::feature::LonLat;

/// The hosted geocoding and directions services the garden map leans on.
///
/// `Ok(None)` means the service answered but had nothing usable; `Err` means
/// the request itself failed.
pub trait MapServices {
    /// Resolves free text to the best matching position.
    fn geocode(&self, query: &str) -> Result<Option<LonLat>, ServiceError>;

    /// Gets a driving route with turn-by-turn steps between two points.
    fn directions(&self, from: LonLat, to: LonLat) -> Result<Option<Route>, ServiceError>;
}
