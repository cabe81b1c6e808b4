use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Persistent configuration, stored as TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub refile: RefileConfig,

    #[serde(default)]
    pub peek: PeekConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Directory that relative selector file names resolve against.
    /// Defaults to the current directory; the JOT_DIR environment
    /// variable overrides both.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefileConfig {
    /// Insert at the top of the destination subtree instead of the end.
    #[serde(default)]
    pub prepend: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeekConfig {
    /// Synthesize compressed selectors in TOC output by default.
    #[serde(default)]
    pub short: bool,
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/jot/config.toml
    /// - Linux: ~/.config/jot/config.toml
    /// - Windows: %APPDATA%/jot/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jot").join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                fs::read_to_string(&path)
                    .ok()
                    .and_then(|contents| toml::from_str(&contents).ok())
            })
            .unwrap_or_default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path().ok_or("Could not determine config directory")?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        Ok(())
    }

    /// Notes root directory: JOT_DIR env, then the config file setting,
    /// then the current directory.
    pub fn notes_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var("JOT_DIR") {
            return PathBuf::from(dir);
        }
        self.notes
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
