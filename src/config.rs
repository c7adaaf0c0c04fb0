//! Configuration
//!
//! Loaded from a TOML file with environment variable overrides. Every field
//! has a default, so an empty (or missing) file yields a working console
//! pointed at the local analysis service.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::net::diagnosis::PatientMetrics;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub scene: SceneConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub patient: PatientMetrics,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Environment overrides that could not be applied, as `NAME=value`.
    /// Reported by the caller once logging is up.
    #[serde(skip)]
    pub ignored_overrides: Vec<String>,
}

/// Analysis service location
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Background torus animation
#[derive(Debug, Clone, Deserialize)]
pub struct SceneConfig {
    /// Radians added to rotation.x every frame
    #[serde(default = "default_step_x")]
    pub rotation_step_x: f32,

    /// Radians added to rotation.y every frame
    #[serde(default = "default_step_y")]
    pub rotation_step_y: f32,

    /// Wireframe colour as 0xRRGGBB
    #[serde(default = "default_color")]
    pub color: u32,
}

fn default_step_x() -> f32 {
    0.01
}

fn default_step_y() -> f32 {
    0.005
}

fn default_color() -> u32 {
    0x00f2ff
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rotation_step_x: default_step_x(),
            rotation_step_y: default_step_y(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1280.0
}

fn default_height() -> f32 {
    800.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from a file (no environment overrides)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// First existing config file among `$NEURAL_LINK_CONFIG`, the user
    /// config dir and `./neural-link.toml`.
    pub fn locate() -> Option<PathBuf> {
        let candidates = [
            std::env::var_os("NEURAL_LINK_CONFIG").map(PathBuf::from),
            dirs::config_dir().map(|p| p.join("neural-link").join("config.toml")),
            Some(PathBuf::from("./neural-link.toml")),
        ];
        candidates.into_iter().flatten().find(|p| p.exists())
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NEURAL_LINK_ENDPOINT") {
            self.endpoint.base_url = url;
        }
        if let Some(secs) = lookup("NEURAL_LINK_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(s) => self.endpoint.timeout_secs = s,
                Err(_) => self
                    .ignored_overrides
                    .push(format!("NEURAL_LINK_TIMEOUT_SECS={:?}", secs)),
            }
        }
        if let Some(level) = lookup("NEURAL_LINK_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.endpoint.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.endpoint.timeout_secs, 30);
        assert_eq!(config.scene.rotation_step_x, 0.01);
        assert_eq!(config.scene.rotation_step_y, 0.005);
        assert_eq!(config.scene.color, 0x00f2ff);
        assert_eq!(config.patient.scalp_health, "dry");
        assert_eq!(config.patient.vision_clarity, "blurred");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml("", Path::new("mem.toml")).unwrap();
        assert_eq!(config.endpoint.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.window.width, 1280.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let text = r#"
[endpoint]
base_url = "http://10.0.0.7:8080"

[patient]
scalp_health = "oily"
"#;
        let config = Config::from_toml(text, Path::new("mem.toml")).unwrap();
        assert_eq!(config.endpoint.base_url, "http://10.0.0.7:8080");
        assert_eq!(config.endpoint.timeout_secs, 30);
        assert_eq!(config.patient.scalp_health, "oily");
        assert_eq!(config.patient.vision_clarity, "blurred");
    }

    #[test]
    fn parse_error_names_path() {
        let err = Config::from_toml("[endpoint\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\nwidth = 640.0\nheight = 480.0").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.window.width, 640.0);
        assert_eq!(config.window.height, 480.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("NEURAL_LINK_ENDPOINT", "http://192.168.1.20:5000"),
            ("NEURAL_LINK_TIMEOUT_SECS", "5"),
            ("NEURAL_LINK_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.endpoint.base_url, "http://192.168.1.20:5000");
        assert_eq!(config.endpoint.timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
        assert!(config.ignored_overrides.is_empty());
    }

    #[test]
    fn bad_timeout_override_is_ignored() {
        let mut config = Config::default();
        config.apply_env_overrides(|k| {
            (k == "NEURAL_LINK_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.endpoint.timeout_secs, 30);
        assert_eq!(config.ignored_overrides, ["NEURAL_LINK_TIMEOUT_SECS=\"soon\""]);
    }
}
