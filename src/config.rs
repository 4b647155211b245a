//! Configuration system for jury-personas
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (JURY_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::persona::DEFAULT_SKEPTIC_MINIMUM;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JuryConfig {
    /// Where persona collections live
    pub personas: PersonaSettings,

    /// Jury draw parameters
    pub jury: JurySettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Persona directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaSettings {
    /// Root holding generated/, seeds/ and archetypes/
    pub root: String,
}

/// Jury draw settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JurySettings {
    /// Target number of personas
    pub size: usize,

    /// Minimum fraction of skeptics (0.0 - 1.0)
    pub skeptic_minimum: f64,

    /// Fixed RNG seed for reproducible draws
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            root: "personas".to_string(),
        }
    }
}

impl Default for JurySettings {
    fn default() -> Self {
        Self {
            size: 100,
            skeptic_minimum: DEFAULT_SKEPTIC_MINIMUM,
            seed: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl JuryConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // An explicit path must exist
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from("jury-personas.toml"),
            dirs::config_dir()
                .map(|p| p.join("jury-personas").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".jury-personas").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("JURY_PERSONAS_DIR") {
            self.personas.root = val;
        }

        if let Ok(val) = std::env::var("JURY_SIZE") {
            if let Ok(n) = val.parse() {
                self.jury.size = n;
            }
        }
        if let Ok(val) = std::env::var("JURY_SKEPTIC_MINIMUM") {
            if let Ok(n) = val.parse() {
                self.jury.skeptic_minimum = n;
            }
        }
        if let Ok(val) = std::env::var("JURY_SEED") {
            if let Ok(n) = val.parse() {
                self.jury.seed = Some(n);
            }
        }

        if let Ok(val) = std::env::var("JURY_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("JURY_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("JURY_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.personas.root = expand_path(&self.personas.root);

        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.personas.root.is_empty() {
            return Err(Error::config_field_invalid(
                "personas.root",
                "Personas root cannot be empty",
            ));
        }

        if self.jury.size == 0 {
            return Err(Error::config_field_invalid(
                "jury.size",
                "Jury size must be at least 1",
            ));
        }

        if !(0.0..=1.0).contains(&self.jury.skeptic_minimum) {
            return Err(Error::config_field_invalid(
                "jury.skeptic_minimum",
                "skeptic_minimum must be between 0.0 and 1.0",
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Get the personas root as a PathBuf
    pub fn personas_root(&self) -> PathBuf {
        PathBuf::from(&self.personas.root)
    }
}

/// Expand ~ and environment variables in paths
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| PathBuf::from("jury-personas.toml"));

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    write_default_config(&config_path)?;
    Ok(config_path)
}

fn write_default_config(path: &Path) -> Result<()> {
    fs::write(path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# jury-personas configuration

[personas]
# Directory holding generated/, seeds/ and archetypes/
root = "personas"

[jury]
# Target number of personas per jury
size = 100

# Minimum fraction of skeptics guaranteed in a sampled jury
skeptic_minimum = 0.15

# Fixed RNG seed for reproducible draws (comment out for a fresh draw each run)
# seed = 42

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.jury-personas/logs/jury.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
