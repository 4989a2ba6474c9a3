pub mod controller;
pub mod presenter;
pub mod state;

pub use controller::{resolve_route, GardenSession};
pub use presenter::{GardenPopup, Presenter, ViewportCommand};
pub use state::{Phase, RouteRequest, SelectionState};
