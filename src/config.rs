//! TOML-based viewer configuration.

use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::library::DEFAULT_LIBRARY_DIR;
use crate::store::PLANT_SLOT;
use crate::visibility::Visibility;

/// Log levels accepted in `[logging] level`.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Top-level viewer configuration parsed from TOML.
///
/// Every section is optional and falls back to its defaults. Load from
/// TOML with [`ViewerConfig::from_toml_file`] or use
/// [`ViewerConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewerConfig {
    /// Server-side document library.
    #[serde(default)]
    pub library: LibraryConfig,
    /// Where the last loaded document is kept between runs.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Initial category toggles.
    #[serde(default)]
    pub visibility: Visibility,
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server-side document library.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Directory scanned for `*.json` plant documents.
    pub dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
        }
    }
}

/// Slot storage for the current document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding slot files.
    pub dir: PathBuf,
    /// Slot name for the current plant document.
    pub slot: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".plant-viewer"),
            slot: PLANT_SLOT.to_string(),
        }
    }
}

/// HTTP listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (IPv4 or IPv6 literal).
    pub bind: String,
    /// TCP port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Socket address built from `bind` and `port`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `bind` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind.parse().map_err(|_| ConfigError {
            field: "server.bind".into(),
            message: format!("must be an IP address, got \"{}\"", self.bind),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} - {}", self.field, self.message)
    }
}

impl ViewerConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.library.dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "library.dir".into(),
                message: "must not be empty".into(),
            });
        }

        if self.storage.dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "storage.dir".into(),
                message: "must not be empty".into(),
            });
        }
        let slot = &self.storage.slot;
        if slot.is_empty() || slot.contains(['/', '\\']) || slot == "." || slot == ".." {
            errors.push(ConfigError {
                field: "storage.slot".into(),
                message: format!("must be a plain name, got \"{slot}\""),
            });
        }

        if let Err(e) = self.server.socket_addr() {
            errors.push(e);
        }
        if self.server.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigError {
                field: "logging.level".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let errors = ViewerConfig::default().validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[library]
dir = "plants"

[storage]
dir = "/tmp/viewer-state"
slot = "current"

[visibility]
buildings = true
equipment = false
silos = true
markers = false

[server]
bind = "127.0.0.1"
port = 8080

[logging]
level = "debug"
"#;
        let cfg = ViewerConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.library.dir.clone()),
            Some(PathBuf::from("plants"))
        );
        assert_eq!(cfg.as_ref().map(|c| c.visibility.equipment), Some(false));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.server.socket_addr().ok()),
            Some("127.0.0.1:8080".parse().unwrap())
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[server]
port = 3000
tls = true
"#;
        assert!(ViewerConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ViewerConfig::from_toml_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.bind, "0.0.0.0");
        assert_eq!(cfg.storage.slot, PLANT_SLOT);
        assert_eq!(cfg.visibility, Visibility::default());
    }

    #[test]
    fn validation_reports_field_paths() {
        let mut cfg = ViewerConfig::default();
        cfg.server.bind = "localhost".into();
        cfg.server.port = 0;
        cfg.storage.slot = "../escape".into();
        cfg.logging.level = "loud".into();
        let errors = cfg.validate();
        for field in ["server.bind", "server.port", "storage.slot", "logging.level"] {
            assert!(
                errors.iter().any(|e| e.field == field),
                "expected error for {field}: {errors:?}"
            );
        }
    }
}
