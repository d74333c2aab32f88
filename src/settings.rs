// Persisted user preferences.
//
// Small quality-of-life state that survives between runs: the
// drop-adjustment toggle and the last-used username/season/league. Stored
// as TOML in the platform config directory. Loading is forgiving (a
// missing or corrupt file falls back to defaults) and saving is
// best-effort; preference I/O never fails a run.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

const PREFS_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub drop_adjustment: bool,
    #[serde(default)]
    pub last_username: Option<String>,
    #[serde(default)]
    pub last_season: Option<String>,
    #[serde(default)]
    pub last_league_id: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            drop_adjustment: true,
            last_username: None,
            last_season: None,
            last_league_id: None,
        }
    }
}

/// Platform path for the preferences file, e.g.
/// `~/.config/tradecalc/preferences.toml` on Linux.
pub fn prefs_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tradecalc").map(|dirs| dirs.config_dir().join(PREFS_FILE))
}

/// Load preferences from the platform location, defaulting on any failure.
pub fn load() -> Preferences {
    match prefs_path() {
        Some(path) => load_from(&path),
        None => Preferences::default(),
    }
}

/// Save preferences to the platform location. Failures are logged, not
/// propagated.
pub fn save(prefs: &Preferences) {
    if let Some(path) = prefs_path() {
        save_to(&path, prefs);
    }
}

/// Load preferences from an explicit path.
pub fn load_from(path: &Path) -> Preferences {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(_) => return Preferences::default(),
    };
    match toml::from_str(&text) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!("ignoring corrupt preferences file {}: {e}", path.display());
            Preferences::default()
        }
    }
}

/// Save preferences to an explicit path, creating parent directories.
pub fn save_to(path: &Path, prefs: &Preferences) {
    let text = match toml::to_string_pretty(prefs) {
        Ok(t) => t,
        Err(e) => {
            warn!("failed to serialize preferences: {e}");
            return;
        }
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("failed to create preferences directory {}: {e}", parent.display());
            return;
        }
    }
    if let Err(e) = std::fs::write(path, text) {
        warn!("failed to write preferences to {}: {e}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tradecalc_prefs_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join(PREFS_FILE)
    }

    #[test]
    fn roundtrip_through_toml() {
        let path = temp_path("roundtrip");
        let prefs = Preferences {
            drop_adjustment: false,
            last_username: Some("example_user".into()),
            last_season: Some("2026".into()),
            last_league_id: Some("987654".into()),
        };

        save_to(&path, &prefs);
        let loaded = load_from(&path);
        assert_eq!(loaded, prefs);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = temp_path("missing");
        let loaded = load_from(&path);
        assert_eq!(loaded, Preferences::default());
        assert!(loaded.drop_adjustment);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not [[[ toml").unwrap();

        let loaded = load_from(&path);
        assert_eq!(loaded, Preferences::default());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "last_username = \"example_user\"\n").unwrap();

        let loaded = load_from(&path);
        assert!(loaded.drop_adjustment);
        assert_eq!(loaded.last_username.as_deref(), Some("example_user"));
        assert!(loaded.last_season.is_none());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
