pub mod config;
pub mod error;
pub mod paths;

pub use config::{
    AnnictConfig, Config, EpgStationConfig, FileConfig, LoggingConfig, ReserveOptions,
    DEFAULT_ANNICT_ENDPOINT, DEFAULT_RECORDED_FORMAT,
};
pub use error::ConfigError;
pub use paths::PathManager;
