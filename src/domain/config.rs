use std::path::Path;

use serde::{Deserialize, Serialize};

/// Names of the files the registry keeps inside its storage root.
///
/// The storage root itself is not part of the configuration; it is supplied
/// by whoever opens the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    donors: String,
    requests: String,
    verified_names: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            donors: default_donors(),
            requests: default_requests(),
            verified_names: default_verified_names(),
        }
    }
}

impl Config {
    /// Creates a configuration with custom file names.
    #[must_use]
    pub fn new(
        donors: impl Into<String>,
        requests: impl Into<String>,
        verified_names: impl Into<String>,
    ) -> Self {
        Self {
            donors: donors.into(),
            requests: requests.into(),
            verified_names: verified_names.into(),
        }
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// File name of the donor collection.
    #[must_use]
    pub fn donors(&self) -> &str {
        &self.donors
    }

    /// File name of the request collection.
    #[must_use]
    pub fn requests(&self) -> &str {
        &self.requests
    }

    /// File name of the verified-name log.
    #[must_use]
    pub fn verified_names(&self) -> &str {
        &self.verified_names
    }
}

/// Failure to load or save a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),
    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn default_donors() -> String {
    "donors.csv".to_string()
}

fn default_requests() -> String {
    "requests.csv".to_string()
}

// Older data directories call this file the "blockchain". It is a plain list.
fn default_verified_names() -> String {
    "blockchain.txt".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_donors")]
        donors: String,

        #[serde(default = "default_requests")]
        requests: String,

        #[serde(default = "default_verified_names")]
        verified_names: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                donors,
                requests,
                verified_names,
            } => Self {
                donors,
                requests,
                verified_names,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            donors: config.donors,
            requests: config.requests,
            verified_names: config.verified_names,
        }
    }
}
