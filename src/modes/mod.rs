pub mod config;
pub mod play;

pub use config::{AppConfig, DriverConfig};
pub use play::PlayMode;
