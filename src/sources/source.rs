//! A single loaded configuration source.

use crate::error::{ConfigError, Result};
use config::File;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Reserved top-level table holding the string settings map.
const SETTINGS_TABLE: &str = "settings";
/// Reserved top-level table holding named connection strings.
const CONNECTION_STRINGS_TABLE: &str = "connection_strings";

/// A named connection string paired with its provider.
///
/// Entries are overridden as a unit during merging; the connection string and
/// provider of one layer are never combined with another layer's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStringSetting {
    /// The connection string itself.
    pub connection_string: String,
    /// The provider name, empty when the source declares none.
    #[serde(default)]
    pub provider_name: String,
}

impl ConnectionStringSetting {
    /// Create a setting from a bare connection string with no provider.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            provider_name: String::new(),
        }
    }
}

/// One loaded configuration source (a file).
///
/// A source file is TOML, YAML, or JSON. Two top-level tables are reserved:
/// `settings` (string key/value pairs) and `connection_strings` (name to
/// connection string, optionally with a provider). Every other top-level key
/// is kept verbatim as a named section of raw [`config::Value`] data.
///
/// Sources are immutable after creation and cached by the owning
/// [`ConfigRepository`](crate::sources::ConfigRepository) for its lifetime.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    name: String,
    settings: BTreeMap<String, String>,
    connection_strings: BTreeMap<String, ConnectionStringSetting>,
    sections: BTreeMap<String, config::Value>,
}

impl ConfigSource {
    /// Load and parse the file at `path`, recording `name` as the source
    /// name the caller asked for.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] naming the source when the file content
    /// is malformed, when a `settings` value is not representable as a
    /// string, or when a `connection_strings` entry has an unexpected shape.
    pub(crate) fn from_file(name: &str, path: &Path) -> Result<Self> {
        let parse_err = |source: config::ConfigError| ConfigError::Parse {
            file: name.to_string(),
            source: Box::new(source),
        };

        let root = config::Config::builder()
            .add_source(File::from(path.to_path_buf()).required(true))
            .build()
            .and_then(|cfg| cfg.try_deserialize::<config::Map<String, config::Value>>())
            .map_err(parse_err)?;

        let mut settings = BTreeMap::new();
        let mut connection_strings = BTreeMap::new();
        let mut sections = BTreeMap::new();

        for (key, value) in root {
            match key.as_str() {
                SETTINGS_TABLE => {
                    for (k, v) in value.into_table().map_err(parse_err)? {
                        settings.insert(k, v.into_string().map_err(parse_err)?);
                    }
                }
                CONNECTION_STRINGS_TABLE => {
                    for (k, v) in value.into_table().map_err(parse_err)? {
                        connection_strings.insert(k, connection_setting(v).map_err(parse_err)?);
                    }
                }
                _ => {
                    sections.insert(key, value);
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            settings,
            connection_strings,
            sections,
        })
    }

    /// Create an empty source, used as the baseline when no baseline file
    /// exists on disk.
    pub(crate) fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            settings: BTreeMap::new(),
            connection_strings: BTreeMap::new(),
            sections: BTreeMap::new(),
        }
    }

    /// Build a source from already-resolved maps, keeping `sections` as
    /// given. Used for the system-store write-back and in tests.
    pub(crate) fn from_parts(
        name: &str,
        settings: BTreeMap<String, String>,
        connection_strings: BTreeMap<String, ConnectionStringSetting>,
        sections: BTreeMap<String, config::Value>,
    ) -> Self {
        Self {
            name: name.to_string(),
            settings,
            connection_strings,
            sections,
        }
    }

    /// The source name as requested from the repository.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The settings map declared by this source alone.
    pub fn settings(&self) -> &BTreeMap<String, String> {
        &self.settings
    }

    /// The connection strings declared by this source alone.
    pub fn connection_strings(&self) -> &BTreeMap<String, ConnectionStringSetting> {
        &self.connection_strings
    }

    /// Look up a named section in this source, `None` when this source does
    /// not define it.
    pub fn section(&self, name: &str) -> Option<&config::Value> {
        self.sections.get(name)
    }

    /// All sections declared by this source, keyed by name.
    pub fn sections(&self) -> &BTreeMap<String, config::Value> {
        &self.sections
    }
}

/// A connection-string entry is either a bare string or a table with
/// `connection_string` and an optional `provider_name`.
fn connection_setting(
    value: config::Value,
) -> std::result::Result<ConnectionStringSetting, config::ConfigError> {
    if let Ok(setting) = value.clone().try_deserialize::<ConnectionStringSetting>() {
        return Ok(setting);
    }
    value.into_string().map(ConnectionStringSetting::new)
}
