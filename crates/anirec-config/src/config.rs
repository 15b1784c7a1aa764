use anirec_models::{AnimeType, WatchStatus};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::ConfigError;
use crate::paths::PathManager;

pub const DEFAULT_ANNICT_ENDPOINT: &str = "https://api.annict.com/graphql";
pub const DEFAULT_RECORDED_FORMAT: &str = "TS";

/// Validated runtime configuration. Every required value is present once this exists.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub annict: AnnictConfig,
    pub epgstation: EpgStationConfig,
    pub reserve: ReserveOptions,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnictConfig {
    pub token: String,
    /// Annict user names whose lists are read
    pub users: Vec<String>,
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpgStationConfig {
    pub url: String,
    /// Parent recording directory as named in EPGStation's config
    pub parent_directory: String,
    pub recorded_format: String,
}

/// Which entries turn into recording rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReserveOptions {
    #[serde(default = "default_reserve_statuses")]
    pub statuses: Vec<WatchStatus>,
    #[serde(default = "default_media_types")]
    pub media_types: Vec<AnimeType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to a file, `file` or the default log file
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Log file to write, if any. An explicit `file` turns file logging on by itself.
    pub fn log_file(&self, path_manager: &PathManager) -> Option<PathBuf> {
        match &self.file {
            Some(file) => Some(file.clone()),
            None if self.enabled => Some(path_manager.default_log_file()),
            None => None,
        }
    }
}

fn default_reserve_statuses() -> Vec<WatchStatus> {
    vec![WatchStatus::Want, WatchStatus::Watching]
}

fn default_media_types() -> Vec<AnimeType> {
    vec![AnimeType::Tv, AnimeType::Movie]
}

impl Default for ReserveOptions {
    fn default() -> Self {
        Self {
            statuses: default_reserve_statuses(),
            media_types: default_media_types(),
        }
    }
}

/// On-disk layout of `config.toml`. Everything is optional here; the environment fills the gaps.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub annict: FileAnnict,
    #[serde(default)]
    pub epgstation: FileEpgStation,
    #[serde(default)]
    pub reserve: Option<ReserveOptions>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileAnnict {
    pub token: Option<String>,
    pub users: Option<Vec<String>>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileEpgStation {
    pub url: Option<String>,
    pub parent_directory: Option<String>,
    pub recorded_format: Option<String>,
}

impl FileConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`FileConfig::load_from_file`], but a missing file is an empty config
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The file `path_manager` points at. Only the default location may be absent.
    pub fn load_for(path_manager: &PathManager) -> Result<Self, ConfigError> {
        let path = path_manager.config_file();
        if path_manager.has_config_override() {
            Self::load_from_file(&path)
        } else {
            Self::load_optional(&path)
        }
    }
}

/// Values read from the process environment. Names match the variables
/// (`ANNICT_TOKEN` → `annict_token`).
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    annict_token: Option<String>,
    /// Comma-separated user names
    annict_user: Option<String>,
    annict_endpoint: Option<String>,
    epgstation_url: Option<String>,
    record_parent_dir: Option<String>,
    record_format: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load `.env`, the config file and the environment, then validate
    pub fn load(path_manager: &PathManager) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let file = FileConfig::load_for(path_manager)?;
        let env: EnvOverrides = envy::from_env()?;
        Self::resolve(file, env)
    }

    /// Build from an explicit file layer and environment pairs
    pub fn from_sources<I>(file: FileConfig, vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: EnvOverrides = envy::from_iter(vars)?;
        Self::resolve(file, env)
    }

    fn resolve(file: FileConfig, env: EnvOverrides) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let token = non_empty(env.annict_token).or_else(|| non_empty(file.annict.token));
        if token.is_none() {
            missing.push("ANNICT_TOKEN (annict.token)".to_string());
        }

        let users: Vec<String> = match non_empty(env.annict_user) {
            Some(list) => list
                .split(',')
                .map(|user| user.trim().to_string())
                .filter(|user| !user.is_empty())
                .collect(),
            None => file
                .annict
                .users
                .unwrap_or_default()
                .into_iter()
                .filter_map(|user| non_empty(Some(user)))
                .collect(),
        };
        if users.is_empty() {
            missing.push("ANNICT_USER (annict.users)".to_string());
        }

        let url = non_empty(env.epgstation_url).or_else(|| non_empty(file.epgstation.url));
        if url.is_none() {
            missing.push("EPGSTATION_URL (epgstation.url)".to_string());
        }

        let parent_directory = non_empty(env.record_parent_dir)
            .or_else(|| non_empty(file.epgstation.parent_directory));
        if parent_directory.is_none() {
            missing.push("RECORD_PARENT_DIR (epgstation.parent_directory)".to_string());
        }

        let (Some(token), Some(url), Some(parent_directory)) = (token, url, parent_directory) else {
            return Err(ConfigError::Missing(missing));
        };
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let reserve = file.reserve.unwrap_or_default();
        if reserve.statuses.is_empty() {
            return Err(ConfigError::Invalid {
                key: "reserve.statuses".to_string(),
                message: "at least one status is required".to_string(),
            });
        }
        if reserve.media_types.is_empty() {
            return Err(ConfigError::Invalid {
                key: "reserve.media_types".to_string(),
                message: "at least one media type is required".to_string(),
            });
        }

        Ok(Self {
            annict: AnnictConfig {
                token,
                users,
                endpoint: non_empty(env.annict_endpoint)
                    .or_else(|| non_empty(file.annict.endpoint))
                    .unwrap_or_else(|| DEFAULT_ANNICT_ENDPOINT.to_string()),
            },
            epgstation: EpgStationConfig {
                url,
                parent_directory,
                recorded_format: non_empty(env.record_format)
                    .or_else(|| non_empty(file.epgstation.recorded_format))
                    .unwrap_or_else(|| DEFAULT_RECORDED_FORMAT.to_string()),
            },
            reserve,
            logging: file.logging,
        })
    }
}
