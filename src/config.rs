use std::{
    fs::{create_dir_all, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use dombratab::DombraError;
use home::home_dir;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    audio_folder: Option<PathBuf>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Config {
    // folder placed in $HOME directory
    const FOLDER: &'static str = ".dombratab";

    pub const DEFAULT_API_URL: &'static str = "http://localhost:8000";

    pub fn get_audio_folder(&self) -> Option<PathBuf> {
        self.audio_folder.clone()
    }

    /// Backend base URL, the command line takes precedence over the file.
    pub fn resolve_api_url(&self, from_args: Option<String>) -> String {
        from_args
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string())
    }

    pub fn set_audio_folder(
        &mut self,
        new_audio_folder: Option<PathBuf>,
    ) -> Result<(), DombraError> {
        if self.audio_folder == new_audio_folder {
            // no op
            Ok(())
        } else {
            self.audio_folder = new_audio_folder;
            self.save_config()
        }
    }

    fn get_base_path() -> Result<PathBuf, DombraError> {
        let home = home_dir()
            .ok_or_else(|| DombraError::ConfigError("Could not find home directory".to_string()))?;
        let path = home.join(Self::FOLDER);
        Ok(path)
    }

    /// Creates config if it does not exist
    pub fn read_config() -> Result<Self, DombraError> {
        let base_path = Self::get_base_path()?;
        if !base_path.exists() {
            create_dir_all(&base_path)?;
        }
        Self::read_from(base_path.join("config.json"))
    }

    /// Reads the config at `config_path`, creating an empty one if missing
    pub fn read_from(config_path: impl Into<PathBuf>) -> Result<Self, DombraError> {
        let config_path = config_path.into();
        if !config_path.exists() {
            // create empty config
            Self::empty_at(config_path.clone()).save_config()?;
        }
        let file = File::open(&config_path)?;
        let reader = BufReader::new(file);
        let mut config: Self = serde_json::from_reader(reader).map_err(|err| {
            DombraError::ConfigError(format!("Could not read local configuration {err:}"))
        })?;
        config.path = Some(config_path);
        Ok(config)
    }

    fn empty_at(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..Self::default()
        }
    }

    fn config_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Assumes the config folder exists
    pub fn save_config(&self) -> Result<(), DombraError> {
        let Some(config_path) = self.config_path() else {
            log::debug!("configuration not backed by a file, skip saving");
            return Ok(());
        };
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            DombraError::ConfigError(format!("Could not save local configuration {err:}"))
        })?;
        let mut file = File::create(config_path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
