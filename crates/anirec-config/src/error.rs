use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Every required value that was found neither in the environment nor in the config file
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}
