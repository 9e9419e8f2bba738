pub mod config;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use config::{
    Config, ConfigStorage, DisplayConfig, FlashcardConfig, LoggingConfig, OpeningsConfig,
    TomlConfigStorage,
};

/// Directory layout used by chessli
///
/// XDG Base Directory Specification:
/// - Data: $XDG_DATA_HOME/chessli (default: ~/.local/share/chessli)
/// - Config: $XDG_CONFIG_HOME/chessli (default: ~/.config/chessli)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessliPaths {
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
    pub openings_dir: PathBuf,
}

impl ChessliPaths {
    /// Resolve the XDG locations without touching the filesystem
    pub fn resolve() -> Result<Self> {
        let home = env::var("HOME").context("HOME environment variable not set")?;
        let home_path = PathBuf::from(home);

        let data_dir = match env::var("XDG_DATA_HOME") {
            Ok(xdg_data) => PathBuf::from(xdg_data).join("chessli"),
            Err(_) => home_path.join(".local/share/chessli"),
        };

        let config_dir = match env::var("XDG_CONFIG_HOME") {
            Ok(xdg_config) => PathBuf::from(xdg_config).join("chessli"),
            Err(_) => home_path.join(".config/chessli"),
        };

        Ok(ChessliPaths::from_dirs(data_dir, config_dir))
    }

    pub fn from_dirs(data_dir: PathBuf, config_dir: PathBuf) -> Self {
        ChessliPaths {
            openings_dir: data_dir.join("openings"),
            data_dir,
            config_dir,
        }
    }

    /// Point the openings directory somewhere else
    pub fn with_openings_dir(mut self, openings_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = openings_dir {
            self.openings_dir = dir;
        }
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("chessli.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("logs").join("chessli.log")
    }

    /// Create the data, config and openings directories
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.config_dir, &self.openings_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {:?}", dir))?;
        }

        log::debug!("Data directory: {:?}", self.data_dir);
        log::debug!("Config directory: {:?}", self.config_dir);
        log::debug!("Openings directory: {:?}", self.openings_dir);
        Ok(())
    }
}
