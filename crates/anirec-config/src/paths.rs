use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "ANIREC_CONFIG";

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
    config_file_override: Option<PathBuf>,
}

impl PathManager {
    /// Platform paths (e.g. `~/.config/anirec` on Linux), `None` when no config directory is known
    pub fn new() -> Option<Self> {
        let base_dir = dirs::config_dir()?.join("anirec");
        Some(Self::from_base(base_dir))
    }

    pub fn from_base(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            log_dir: base_dir.join("logs"),
            config_dir: base_dir,
            config_file_override: std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
        }
    }

    /// Use `path` as the config file, as `ANIREC_CONFIG` does
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file_override = Some(path.into());
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_file_override
            .clone()
            .unwrap_or_else(|| self.config_dir.join("config.toml"))
    }

    /// True when the config file was named explicitly rather than defaulted
    pub fn has_config_override(&self) -> bool {
        self.config_file_override.is_some()
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("anirec.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory on platforms without a config dir
        Self::new().unwrap_or_else(|| Self::from_base(".anirec"))
    }
}
