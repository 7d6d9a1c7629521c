// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell configuration loaded from an optional JSON file.
//!
//! Demos ship sensible defaults; a `mikra.json` next to the working
//! directory can override window geometry, vsync, and the font. A missing
//! file is not an error, a malformed one is.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Windowing and rendering options shared by every demo.
///
/// All fields have defaults, so a config file only needs to name the fields
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
    /// Whether the user may resize the window.
    pub resizable: bool,
    /// Prefer a vsynced present mode.
    pub vsync: bool,
    /// Explicit font file to load. When absent, a monospace face is
    /// resolved from the system font database.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_px: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "mikra".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            vsync: true,
            font_path: None,
            font_px: 16.0,
        }
    }
}

impl ShellConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads the configuration from `path`, falling back to the defaults
    /// when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is reported as an
    /// error rather than silently ignored, so a typo in an override does not
    /// go unnoticed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config file at '{}', using defaults.", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Returns the config with the window title replaced.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the config with resizability replaced.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

/// An error loading the shell configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    Read {
        /// The path of the file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The config file is not valid JSON for [`ShellConfig`].
    Parse {
        /// The path of the offending file.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config from '{}': {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ShellConfig::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert!(config.vsync);
        assert!(!config.resizable);
        assert!(config.font_path.is_none());
        assert_eq!(config.font_px, 16.0);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = ShellConfig::from_json(r#"{ "width": 1280, "vsync": false }"#)
            .expect("partial config should parse");
        assert_eq!(config.width, 1280);
        assert!(!config.vsync);
        // Untouched fields fall back to their defaults.
        assert_eq!(config.height, 600);
        assert_eq!(config.font_px, 16.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ShellConfig::load_or_default("definitely/not/a/real/mikra.json")
            .expect("missing file should not be an error");
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join("mikra_config_malformed_test.json");
        std::fs::write(&path, "{ not json").expect("temp write should succeed");

        let result = ShellConfig::load_or_default(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_through_file() {
        let path = std::env::temp_dir().join("mikra_config_roundtrip_test.json");
        let config = ShellConfig::default()
            .with_title("Round Trip")
            .with_resizable(true);

        let json = serde_json::to_string_pretty(&config).expect("serialize should succeed");
        std::fs::write(&path, json).expect("temp write should succeed");

        let loaded = ShellConfig::load_or_default(&path).expect("load should succeed");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn builder_helpers_replace_fields() {
        let config = ShellConfig::default()
            .with_title("Spring")
            .with_resizable(true);
        assert_eq!(config.title, "Spring");
        assert!(config.resizable);
    }

    #[test]
    fn error_display_names_the_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("mikra.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("mikra.json"));
        assert!(text.contains("denied"));
    }
}
