//! Client configuration
//!
//! Handles loading `widecol.toml`:
//!
//! ```toml
//! project_id = "my-project"
//! instance_id = "my-instance"
//! app_profile_id = "batch"   # optional
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "widecol.toml";

/// Instance identity every read is sent against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub project_id: String,
    pub instance_id: String,
    /// Routing profile forwarded with every request.
    #[serde(default)]
    pub app_profile_id: Option<String>,
}

impl ClientConfig {
    pub fn new(project_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            instance_id: instance_id.into(),
            app_profile_id: None,
        }
    }

    pub fn with_app_profile(mut self, app_profile_id: impl Into<String>) -> Self {
        self.app_profile_id = Some(app_profile_id.into());
        self
    }

    /// Load from default config file
    pub fn load() -> Result<Self, Error> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from specific path
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.into())
            } else {
                Error::Io(path.into(), e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::Parse(path.into(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate an in-memory document
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_id("project_id", &self.project_id)?;
        check_id("instance_id", &self.instance_id)?;
        if let Some(profile) = &self.app_profile_id {
            check_id("app_profile_id", profile)?;
        }
        Ok(())
    }
}

/// Ids end up as path segments of the table name.
fn check_id(field: &'static str, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::Invalid {
            field,
            reason: "must not be empty",
        });
    }
    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(Error::Invalid {
            field,
            reason: "must not contain '/' or whitespace",
        });
    }
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

pub type ConfigError = Error;
