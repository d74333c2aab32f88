// Configuration loading and parsing (league.toml, settings.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub data_paths: DataPaths,
    pub api: ApiConfig,
    pub grading: GradingConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// Sleeper username whose leagues are listed. May be empty, in which
    /// case the last-used name from preferences is tried.
    #[serde(default)]
    pub username: String,
    /// Season year, e.g. "2026".
    pub season: String,
    /// Specific league to load. When empty, the first league found for the
    /// user and season is used.
    #[serde(default)]
    pub league_id: String,
}

// ---------------------------------------------------------------------------
// settings.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire settings.toml file.
#[derive(Debug, Clone, Deserialize)]
struct SettingsFile {
    data: DataPaths,
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    grading: GradingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Player values CSV.
    pub players: String,
    /// Draft pick value curve CSV.
    pub pick_curve: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradingConfig {
    /// Initial drop-adjustment toggle; the persisted user preference
    /// overrides this once one exists.
    #[serde(default = "default_true")]
    pub drop_adjustment: bool,
}

impl Default for GradingConfig {
    fn default() -> Self {
        GradingConfig {
            drop_adjustment: true,
        }
    }
}

fn default_base_url() -> String {
    crate::league::client::SLEEPER_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/settings.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- settings.toml (required) ---
    let settings_path = config_dir.join("settings.toml");
    let settings_text = read_file(&settings_path)?;
    let settings_file: SettingsFile =
        toml::from_str(&settings_text).map_err(|e| ConfigError::ParseError {
            path: settings_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        data_paths: settings_file.data,
        api: settings_file.api,
        grading: settings_file.grading,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let season = config.league.season.trim();
    if season.len() != 4 || !season.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::ValidationError {
            field: "league.season".into(),
            message: format!("must be a 4-digit year, got `{season}`"),
        });
    }

    if config.data_paths.players.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.players".into(),
            message: "must be a non-empty path".into(),
        });
    }

    if config.data_paths.pick_curve.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.pick_curve".into(),
            message: "must be a non-empty path".into(),
        });
    }

    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.base_url".into(),
            message: "must be a non-empty URL".into(),
        });
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "api.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
