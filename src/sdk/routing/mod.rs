pub mod error;
pub mod nearest;
pub mod provider;
pub mod route;
pub mod service;

pub use error::ServiceError;
pub use nearest::{haversine_km, nearest_station, nearest_station_with_distance};
pub use provider::MapboxProvider;
pub use route::{Bounds, DirectionsPanel, Route, RouteStep};
pub use service::MapServices;
