//! Configuration management

use crate::speech::{Locale, RegistrationMode};
use crate::{Result, VoxError};
use ini::Ini;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG: &str = "catalog";

const DEFAULT_MAX_VOICES: usize = 16;

/// Catalog configuration (~/.voxcat.cfg)
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| VoxError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| VoxError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| VoxError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config file path (~/.voxcat.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".voxcat.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default voice data directory (<data dir>/voxcat/voices)
    fn default_voxdir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voxcat")
            .join("voices")
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some(CATALOG))
            .set("max_voices", DEFAULT_MAX_VOICES.to_string())
            .set("registration_mode", RegistrationMode::Single.to_string())
            .set("voxdir", Self::default_voxdir().to_string_lossy())
            .set("default_locale", "")
            .set("languages", "");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Maximum number of voices in the catalog
    pub fn max_voices(&self) -> usize {
        match self.ini.get_from(Some(CATALOG), "max_voices") {
            None => DEFAULT_MAX_VOICES,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid max_voices {:?}, using {}", raw, DEFAULT_MAX_VOICES);
                DEFAULT_MAX_VOICES
            }),
        }
    }

    /// Whether voices register up front ("all") or one at a time ("single")
    pub fn registration_mode(&self) -> RegistrationMode {
        let raw = self.get_string(CATALOG, "registration_mode", "single");
        raw.parse().unwrap_or_else(|e| {
            warn!("{}, using single", e);
            RegistrationMode::Single
        })
    }

    /// Directory of voice data handed to the engine at registration
    pub fn voxdir(&self) -> PathBuf {
        match self.ini.get_from(Some(CATALOG), "voxdir") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
            _ => Self::default_voxdir(),
        }
    }

    /// Locale to select at startup, if configured and parseable
    pub fn default_locale(&self) -> Option<Locale> {
        let raw = self.get_string(CATALOG, "default_locale", "");
        if raw.trim().is_empty() {
            return None;
        }

        match raw.parse() {
            Ok(locale) => Some(locale),
            Err(e) => {
                warn!("Ignoring default_locale: {}", e);
                None
            }
        }
    }

    /// Languages to load from the engine; empty means all
    pub fn languages(&self) -> Vec<String> {
        self.get_string(CATALOG, "languages", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
