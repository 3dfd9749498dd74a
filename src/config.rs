// src/config.rs
//
// Application configuration
//
// Layered: built-in defaults, then an optional TOML file, then `PODCAST_*`
// environment variables (nested keys use `__`, e.g. `PODCAST_DATABASE__PATH`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::db::get_database_path;
use crate::error::{AppError, AppResult};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "PODCAST";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Which storage backend the services run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    #[default]
    Memory,
    Database,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub repository: RepositoryKind,

    /// Folder holding `podcasts.csv` and `episodes.csv`
    pub data_path: PathBuf,

    /// Clear and repopulate the database on every start-up
    pub testing: bool,

    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// `None` resolves to the per-user data directory
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,

    /// Rotated log files go here; stderr only when unset
    pub directory: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repository: RepositoryKind::default(),
            data_path: PathBuf::from("data"),
            testing: false,
            database: DatabaseSettings::default(),
            auth: AuthSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `config.toml` is optional.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::from_builder(settings)
    }

    /// Parse a TOML document on top of the defaults, ignoring the environment
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml));
        Self::from_builder(settings)
    }

    fn from_builder(
        settings: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AppResult<Self> {
        let config: AppConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            return Err(AppError::Config(format!(
                "auth.bcrypt_cost must be within {}..={}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, self.auth.bcrypt_cost
            )));
        }

        if self.logging.level.trim().is_empty() {
            return Err(AppError::Config("logging.level cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Configured database file, or the default under the user data directory
    pub fn database_path(&self) -> AppResult<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }
}
