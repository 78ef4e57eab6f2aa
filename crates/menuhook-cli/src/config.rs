use anyhow::{Context, Result};
use menuhook_core::MENU_BUTTON_ID;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Settings for `menuhook`, stored as TOML under the user's home.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Element the bootstrap looks up; `menuButton` when unset.
    pub element_id: Option<String>,
}

impl Config {
    /// `~/.config/menuhook`, or `None` when there is no home directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("menuhook"))
    }

    /// `config.toml` inside [`Config::dir`].
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join("config.toml"))
    }

    /// Reads the settings file. A missing file or home directory yields the
    /// defaults; an unreadable or malformed file is an error.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Writes the settings file, creating `~/.config/menuhook` first.
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("Could not determine config path")?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The configured element id, or `menuButton`.
    pub fn get_element_id(&self) -> &str {
        self.element_id.as_deref().unwrap_or(MENU_BUTTON_ID)
    }

    pub fn set_element_id(&mut self, id: String) {
        self.element_id = Some(id);
    }

    pub fn clear_element_id(&mut self) {
        self.element_id = None;
    }
}
