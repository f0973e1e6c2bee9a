use anyhow::{anyhow, Result};
use qurani_core::{RenderOptions, SavedPosition};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the verse database lives when nothing else says otherwise.
pub const DEFAULT_DATABASE_PATH: &str = "database/quran/quran.DB";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub database_path: Option<PathBuf>,
    pub show_verse_number: bool,
    pub one_verse_per_line: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            database_path: None,
            show_verse_number: true,
            one_verse_per_line: true,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(read_json(path)?.unwrap_or_else(Self::new))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_verse_number: self.show_verse_number,
            one_verse_per_line: self.one_verse_per_line,
        }
    }

    /// `--db` beats the config file, which beats the default location.
    pub fn resolve_database_path(&self, cli_path: Option<&Path>) -> PathBuf {
        cli_path
            .map(Path::to_path_buf)
            .or_else(|| self.database_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("qurani").join("config.json"))
    }
}

/// The reader's saved position, kept apart from settings.
pub struct UserData;

impl UserData {
    pub fn load() -> Result<SavedPosition> {
        Self::load_from(&Self::get_data_path()?)
    }

    pub fn load_from(path: &Path) -> Result<SavedPosition> {
        Ok(read_json(path)?.unwrap_or_default())
    }

    pub fn save(position: &SavedPosition) -> Result<()> {
        Self::save_to(&Self::get_data_path()?, position)
    }

    pub fn save_to(path: &Path, position: &SavedPosition) -> Result<()> {
        write_json(path, position)
    }

    fn get_data_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(data_dir.join("qurani").join("user_data.json"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)
        .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;
    Ok(Some(value))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    // Create the parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}
