use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";
const SETTINGS_DIR: &str = "reveal-party";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults when the file is missing or
    /// unreadable. A corrupt settings file must never block the game.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, text)
    }

    /// `$REVEAL_PARTY_CONFIG` overrides; otherwise the XDG-ish default under
    /// the user's home directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os("REVEAL_PARTY_CONFIG") {
            return Some(PathBuf::from(explicit));
        }
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join(SETTINGS_DIR)
                .join(SETTINGS_FILE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings, Settings::default());
        assert!(settings.sound_enabled);
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = std::env::temp_dir().join("reveal-party-settings-test");
        let path = dir.join(SETTINGS_FILE);
        let settings = Settings {
            sound_enabled: false,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = std::env::temp_dir().join("reveal-party-settings-corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SETTINGS_FILE);
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
