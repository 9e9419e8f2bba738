use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::models::CardTemplate;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openings: OpeningsConfig,
    #[serde(default)]
    pub flashcards: FlashcardConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how openings are stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningsConfig {
    /// Override for the openings directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Half-moves recorded per opening, 0 keeps the whole game
    #[serde(default = "default_max_plies")]
    pub max_plies: usize,
}

impl Default for OpeningsConfig {
    fn default() -> Self {
        OpeningsConfig {
            dir: None,
            max_plies: default_max_plies(),
        }
    }
}

/// Flashcard tool and card header settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardConfig {
    #[serde(default = "default_flashcard_command")]
    pub command: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_tags")]
    pub tags: String,
    #[serde(default = "default_deck")]
    pub deck: String,
    #[serde(default)]
    pub markdown: bool,
}

impl Default for FlashcardConfig {
    fn default() -> Self {
        FlashcardConfig {
            command: default_flashcard_command(),
            model: default_model(),
            tags: default_tags(),
            deck: default_deck(),
            markdown: false,
        }
    }
}

impl FlashcardConfig {
    pub fn template(&self) -> CardTemplate {
        CardTemplate {
            model: self.model.clone(),
            tags: self.tags.clone(),
            deck: self.deck.clone(),
            markdown: self.markdown,
        }
    }
}

/// Terminal output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_muted_color")]
    pub muted_color: String,
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default = "default_title_color")]
    pub title_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            color: true,
            muted_color: default_muted_color(),
            highlight_color: default_highlight_color(),
            title_color: default_title_color(),
        }
    }
}

/// Log destinations and levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a rotated log file in the data directory
    #[serde(default = "default_true")]
    pub file: bool,
    #[serde(default = "default_file_level")]
    pub file_level: String,
    #[serde(default = "default_console_level")]
    pub console_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: true,
            file_level: default_file_level(),
            console_level: default_console_level(),
        }
    }
}

// Default value functions for serde
fn default_max_plies() -> usize {
    20
}

fn default_flashcard_command() -> String {
    "apy".to_string()
}

fn default_model() -> String {
    "Chessli Openings".to_string()
}

fn default_tags() -> String {
    "chess::openings".to_string()
}

fn default_deck() -> String {
    "Chessli::openings".to_string()
}

fn default_true() -> bool {
    true
}

fn default_muted_color() -> String {
    "grey".to_string()
}

fn default_highlight_color() -> String {
    "green".to_string()
}

fn default_title_color() -> String {
    "blue".to_string()
}

fn default_file_level() -> String {
    "debug".to_string()
}

fn default_console_level() -> String {
    "info".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::debug!(
            "Loaded configuration from {:?}: max_plies={}, flashcard command={}",
            self.path,
            config.openings.max_plies,
            config.flashcards.command
        );

        Ok(config)
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let example_config = include_str!("../../chessli.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);
        Ok(())
    }
}
