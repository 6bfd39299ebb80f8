//! The immutable configuration façade handed to applications.

use crate::core::context::ContextShared;
use crate::core::merge::MergedView;
use crate::error::Result;
use crate::sources::ConnectionStringSetting;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a resolution produced: the merged view plus the metadata it
/// was resolved with. Shared untouched between clones and the default slot.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) file_names: Vec<String>,
    pub(crate) view: MergedView,
    pub(crate) host_alias: String,
    pub(crate) web_host: bool,
}

/// An immutable, value-like view over one resolved configuration.
///
/// Built by [`ConfigContext::using_files`](crate::core::ConfigContext::using_files)
/// (or returned by [`current_default`](crate::core::ConfigContext::current_default)).
/// Cloning is cheap and clones observe the same resolved data; instances are
/// safe to share across threads without further synchronization.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::prelude::*;
///
/// # fn example() -> layered_config::error::Result<()> {
/// let context = ConfigContext::new()?;
/// let configurator = context.using_file("production")?;
///
/// if let Some(level) = configurator.settings().get("log_level") {
///     println!("log level: {level}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Configurator {
    pub(crate) resolved: Arc<ResolvedConfig>,
    pub(crate) shared: Arc<ContextShared>,
}

impl Configurator {
    /// The merged settings map.
    pub fn settings(&self) -> &BTreeMap<String, String> {
        self.resolved.view.settings()
    }

    /// The merged connection strings.
    pub fn connection_strings(&self) -> &BTreeMap<String, ConnectionStringSetting> {
        self.resolved.view.connection_strings()
    }

    /// The whole merged view, for callers that want to hold on to less than
    /// a full configurator.
    pub fn merged_view(&self) -> &MergedView {
        &self.resolved.view
    }

    /// Deserialize the named section from the highest-precedence layer that
    /// defines it. Absence is a normal value, `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SectionType`](crate::error::ConfigError::SectionType)
    /// when the section does not match `T`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use layered_config::prelude::*;
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize)]
    /// struct Diagnostics {
    ///     level: String,
    /// }
    ///
    /// # fn example() -> layered_config::error::Result<()> {
    /// let context = ConfigContext::new()?;
    /// let configurator = context.using_file("production")?;
    ///
    /// match configurator.section::<Diagnostics>("diagnostics")? {
    ///     Some(diagnostics) => println!("level: {}", diagnostics.level),
    ///     None => println!("no diagnostics section anywhere"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn section<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.resolved.view.section_as(name)
    }

    /// Like [`section`](Self::section), but absence is a hard error naming
    /// the section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RequiredSectionMissing`](crate::error::ConfigError::RequiredSectionMissing)
    /// when no layer, baseline included, defines the section.
    pub fn required_section<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.resolved.view.required_section(name)
    }

    /// The named section as raw data, without deserializing.
    pub fn raw_section(&self, name: &str) -> Option<&config::Value> {
        self.resolved.view.section(name)
    }

    /// The source names this configurator was resolved from, in resolution
    /// order, baseline excluded. Useful for diagnostics and equality checks.
    pub fn file_names(&self) -> &[String] {
        &self.resolved.file_names
    }

    /// The alias of the running host.
    pub fn host_alias(&self) -> &str {
        &self.resolved.host_alias
    }

    /// Whether the process was detected as a web host.
    pub fn is_web_host(&self) -> bool {
        self.resolved.web_host
    }

    /// Make this configurator the context's current default.
    ///
    /// Every subsequent
    /// [`current_default`](crate::core::ConfigContext::current_default) read
    /// anywhere in the process observes this view, until the next promotion
    /// or restore. The swap is atomic; concurrent readers see either the old
    /// or the new default in full.
    pub fn promote_to_default(&self) {
        self.shared.defaults.promote(Arc::clone(&self.resolved));
    }

    /// Like [`promote_to_default`](Self::promote_to_default), and
    /// additionally back-fill this configurator's merged settings and
    /// connection strings into the baseline system store itself.
    ///
    /// This is the invasive variant: it mutates state shared with readers
    /// that never go through this crate's resolution at all (anything
    /// observing [`SystemStore`](crate::sources::SystemStore) directly), and
    /// every configurator resolved afterwards merges on top of the
    /// back-filled values. Undone only by
    /// [`restore_system_defaults`](crate::core::ConfigContext::restore_system_defaults).
    pub fn promote_to_system_default(&self) {
        self.shared.system.overlay(
            self.resolved.view.settings(),
            self.resolved.view.connection_strings(),
        );
        self.shared.defaults.promote(Arc::clone(&self.resolved));
    }
}
