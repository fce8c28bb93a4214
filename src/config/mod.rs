//! Configuration management

mod migration;
mod settings;

pub use migration::import_options_ini;
pub use settings::{AppConfig, DisplayConfig, CONFIG_VERSION};
