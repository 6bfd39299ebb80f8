//! The baseline/system configuration store.

use crate::sources::{ConfigRepository, ConfigSource, ConnectionStringSetting};
use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Baseline file name used by web hosts.
const WEB_BASELINE: &str = "web.config";
/// Baseline file name used by everything else.
const APP_BASELINE: &str = "app.config";

/// The host environment's native configuration store.
///
/// The store is captured once when the owning context is created: the base
/// directory is probed for `web.config` first (marking the process as a web
/// host), then `app.config`; when neither exists the baseline is empty. The
/// captured values are the always-present, lowest-precedence layer of every
/// resolution order.
///
/// Reads go through an atomic slot so that
/// [`promote_to_system_default`](crate::core::Configurator::promote_to_system_default)
/// can back-fill merged values into the store without ever exposing a
/// partially-updated view, and
/// [`restore_system_defaults`](crate::core::ConfigContext::restore_system_defaults)
/// can return the store to exactly the values captured at startup.
#[derive(Debug)]
pub struct SystemStore {
    pristine: Arc<ConfigSource>,
    current: ArcSwap<ConfigSource>,
    web_host: bool,
}

impl SystemStore {
    /// Probe the repository for the baseline file and capture it.
    pub(crate) fn capture(repository: &ConfigRepository) -> crate::error::Result<Self> {
        let (source, web_host) = match repository.get(WEB_BASELINE)? {
            Some(source) => (source, true),
            None => match repository.get(APP_BASELINE)? {
                Some(source) => (source, false),
                None => (Arc::new(ConfigSource::empty(APP_BASELINE)), false),
            },
        };
        Ok(Self {
            pristine: Arc::clone(&source),
            current: ArcSwap::new(source),
            web_host,
        })
    }

    /// A consistent snapshot of the store as it reads right now.
    pub fn snapshot(&self) -> Arc<ConfigSource> {
        self.current.load_full()
    }

    /// The store's settings map by value, as an application outside this
    /// crate would observe it.
    pub fn settings(&self) -> BTreeMap<String, String> {
        self.snapshot().settings().clone()
    }

    /// The store's connection strings by value.
    pub fn connection_strings(&self) -> BTreeMap<String, ConnectionStringSetting> {
        self.snapshot().connection_strings().clone()
    }

    /// Look up a named section in the store.
    pub fn section(&self, name: &str) -> Option<config::Value> {
        self.snapshot().section(name).cloned()
    }

    /// Whether the captured baseline was a `web.config` file.
    pub fn is_web_host(&self) -> bool {
        self.web_host
    }

    /// Replace the store's settings and connection strings with merged
    /// values. Sections keep the captured baseline's content; only the two
    /// key/value maps are back-filled.
    pub(crate) fn overlay(
        &self,
        settings: &BTreeMap<String, String>,
        connection_strings: &BTreeMap<String, ConnectionStringSetting>,
    ) {
        let overlaid = ConfigSource::from_parts(
            self.pristine.name(),
            settings.clone(),
            connection_strings.clone(),
            self.pristine.sections().clone(),
        );
        self.current.store(Arc::new(overlaid));
    }

    /// Return the store to exactly the values captured at startup.
    pub(crate) fn restore(&self) {
        self.current.store(Arc::clone(&self.pristine));
    }
}
