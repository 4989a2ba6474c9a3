pub mod config;
pub mod directory;
pub mod explorer;
pub mod feature;
pub mod routing;
pub mod session;
pub mod util;
