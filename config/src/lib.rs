//! Zeroth Configuration
//!
//! Handles loading configuration from:
//! 1. ZEROTH_CONFIG env var (explicit path)
//! 2. ./zeroth.toml (current directory)
//! 3. ~/.zeroth/config.toml (user home)
//!
//! Environment variables take precedence over TOML config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

const CONFIG_FILE_NAME: &str = "config.toml";
const LOCAL_CONFIG_FILE_NAME: &str = "zeroth.toml";
const CONFIG_DIR_NAME: &str = ".zeroth";

// ============================================================================
// Default Constants
// ============================================================================

const DEFAULT_SELECTION: &str = "first";
const DEFAULT_OUTPUT_RADIX: u32 = 10;

// ============================================================================
// Config Structs
// ============================================================================

/// Root configuration structure (matches TOML layout)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZerothConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the share-set document comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputConfig {
    /// Path to the share-set JSON; stdin when unset
    #[serde(default)]
    pub path: Option<String>,
}

/// Which shares feed the reconstruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionConfig {
    /// "first", "available", or an index list such as "1,3,6"
    #[serde(default = "default_selection")]
    pub mode: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_SELECTION.into(),
        }
    }
}

fn default_selection() -> String {
    DEFAULT_SELECTION.into()
}

/// How the secret is printed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_output_radix")]
    pub radix: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            radix: DEFAULT_OUTPUT_RADIX,
        }
    }
}

fn default_output_radix() -> u32 {
    DEFAULT_OUTPUT_RADIX
}

// ============================================================================
// Environment Variable Helpers
// ============================================================================

/// Set field from env var if present
fn env_string(key: &str, field: &mut String) {
    if let Ok(v) = env::var(key) {
        *field = v;
    }
}

/// Set Option<String> from env var if present
fn env_option_string(key: &str, field: &mut Option<String>) {
    if let Ok(v) = env::var(key) {
        *field = Some(v);
    }
}

/// Set field from env var if present and parseable
fn env_parse<T: std::str::FromStr>(key: &str, field: &mut T) {
    if let Ok(v) = env::var(key) {
        match v.parse() {
            Ok(parsed) => *field = parsed,
            Err(_) => log::warn!("Ignoring unparseable {}={:?}", key, v),
        }
    }
}

// ============================================================================
// Implementation
// ============================================================================

impl ZerothConfig {
    /// Load configuration from config file with env var overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                log::info!("Loading config from: {}", path.display());
                Self::read_file(&path)?
            }
            None => {
                log::debug!("No config file found, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Find the config file path
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check ZEROTH_CONFIG env var
        if let Ok(path) = env::var("ZEROTH_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            log::warn!("ZEROTH_CONFIG points to missing file: {}", path.display());
        }

        // 2. Check ./zeroth.toml (current directory)
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        // 3. Check ~/.zeroth/config.toml
        Self::default_config_path().filter(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        env_option_string("ZEROTH_INPUT", &mut self.input.path);
        env_string("ZEROTH_SELECTION", &mut self.selection.mode);
        env_parse("ZEROTH_OUTPUT_RADIX", &mut self.output.radix);
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Generate a sample config file
    pub fn generate_sample() -> String {
        let mut sample = Self::default();
        sample.input.path = Some("shares.json".into());
        toml::to_string_pretty(&sample).unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
