//! Merging an ordered list of sources into one logical view.

use crate::error::{ConfigError, Result};
use crate::sources::{ConfigSource, ConnectionStringSetting};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The merged result of applying a resolution order.
///
/// The first layer is always the baseline; later layers have higher
/// precedence. Settings and connection strings are merged per key, so a key
/// unique to an early layer survives unless a later layer overrides it, and
/// the last layer defining a key wins. Connection-string entries are replaced
/// as a whole pair; the string and provider always come from the same layer.
///
/// Sections are *not* merged key by key. Section lookup walks the resolution
/// order backwards and picks the whole section from the last layer that
/// defines the name at all, falling back to the baseline, and finally to
/// "not present".
///
/// A view is computed once when a [`Configurator`](crate::core::Configurator)
/// is constructed and immutable afterwards.
#[derive(Debug)]
pub struct MergedView {
    settings: BTreeMap<String, String>,
    connection_strings: BTreeMap<String, ConnectionStringSetting>,
    layers: Vec<Arc<ConfigSource>>,
}

impl MergedView {
    /// Merge `layers` in order; `layers[0]` is the baseline. Absent sources
    /// must already have been dropped by the caller.
    pub(crate) fn merge(layers: Vec<Arc<ConfigSource>>) -> Self {
        let mut settings = BTreeMap::new();
        let mut connection_strings = BTreeMap::new();

        for layer in &layers {
            for (key, value) in layer.settings() {
                settings.insert(key.clone(), value.clone());
            }
            for (name, setting) in layer.connection_strings() {
                connection_strings.insert(name.clone(), setting.clone());
            }
        }

        Self {
            settings,
            connection_strings,
            layers,
        }
    }

    /// The merged settings map.
    pub fn settings(&self) -> &BTreeMap<String, String> {
        &self.settings
    }

    /// The merged connection strings.
    pub fn connection_strings(&self) -> &BTreeMap<String, ConnectionStringSetting> {
        &self.connection_strings
    }

    /// The raw section for `name` from the highest-precedence layer defining
    /// it, or `None` when no layer does.
    pub fn section(&self, name: &str) -> Option<&config::Value> {
        self.layers.iter().rev().find_map(|layer| layer.section(name))
    }

    /// Deserialize the section for `name` into `T`.
    ///
    /// Absence is a normal value: `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SectionType`] when the section exists but does
    /// not match `T`.
    pub fn section_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.section(name) {
            Some(value) => value
                .clone()
                .try_deserialize::<T>()
                .map(Some)
                .map_err(|source| ConfigError::SectionType {
                    section: name.to_string(),
                    source: Box::new(source),
                }),
            None => Ok(None),
        }
    }

    /// Like [`section_as`](Self::section_as), but absence is a hard error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RequiredSectionMissing`] naming the section
    /// when no layer defines it, or [`ConfigError::SectionType`] when it does
    /// not match `T`.
    pub fn required_section<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.section_as(name)?
            .ok_or_else(|| ConfigError::RequiredSectionMissing(name.to_string()))
    }
}
