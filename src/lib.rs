pub mod sdk;

pub use sdk::config::{MapSettings, MapboxConfig};
pub use sdk::directory::{build_directory, DirectoryGroup};
pub use sdk::feature::{load_features, LonLat, PointFeature};
pub use sdk::routing::{nearest_station, MapServices, MapboxProvider, Route, ServiceError};
pub use sdk::session::{GardenSession, Presenter};
