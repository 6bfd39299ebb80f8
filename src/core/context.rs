//! The resolution context owning repository, system store, and default slot.

use crate::core::configurator::{Configurator, ResolvedConfig};
use crate::core::default_state::DefaultConfigState;
use crate::core::host;
use crate::core::merge::MergedView;
use crate::error::Result;
use crate::sources::{ConfigRepository, SystemStore};
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

#[derive(Debug)]
pub(crate) struct ContextShared {
    pub(crate) repository: ConfigRepository,
    pub(crate) system: SystemStore,
    pub(crate) defaults: DefaultConfigState,
    pub(crate) host_alias: String,
}

/// The entry point for configuration resolution.
///
/// A context owns everything resolution needs: the source repository and its
/// cache, the captured baseline system store, the current-default slot, and
/// the host alias. Constructing one captures the baseline and resolves the
/// host alias exactly once; both are immutable inputs to every
/// [`Configurator`] the context produces.
///
/// Applications typically create one context at startup (or use
/// [`global`](Self::global)) and share it; tests construct isolated contexts
/// over a temporary directory so nothing leaks between them.
///
/// # Examples
///
/// ```rust,no_run
/// use layered_config::prelude::*;
///
/// # fn example() -> layered_config::error::Result<()> {
/// let context = ConfigContext::new()?;
/// let configurator = context.using_files(["database", "production"])?;
///
/// configurator.promote_to_default();
/// assert_eq!(
///     context.current_default().file_names(),
///     configurator.file_names(),
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigContext {
    shared: Arc<ContextShared>,
}

impl ConfigContext {
    /// Create a context resolving names under the current working directory.
    ///
    /// # Errors
    ///
    /// Fails when the working directory cannot be determined, when the
    /// baseline file exists but is malformed, or when host-alias resolution
    /// fails.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(std::env::current_dir()?)
    }

    /// Create a context resolving names under `base_dir`.
    ///
    /// # Errors
    ///
    /// Fails when the baseline file under `base_dir` is malformed or when
    /// host-alias resolution fails.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_machine_name(base_dir, host::machine_name())
    }

    /// As [`with_base_dir`](Self::with_base_dir), with the machine name
    /// supplied by the caller instead of read from the host.
    pub(crate) fn with_machine_name(
        base_dir: impl Into<PathBuf>,
        machine_name: String,
    ) -> Result<Self> {
        let repository = ConfigRepository::new(base_dir);
        let system = SystemStore::capture(&repository)?;
        let host_alias = host::resolve_alias(&repository, &system.snapshot(), &machine_name)?;

        let baseline = Arc::new(ResolvedConfig {
            file_names: Vec::new(),
            view: MergedView::merge(vec![system.snapshot()]),
            host_alias: host_alias.clone(),
            web_host: system.is_web_host(),
        });
        let defaults = DefaultConfigState::new(baseline);

        Ok(Self {
            shared: Arc::new(ContextShared {
                repository,
                system,
                defaults,
                host_alias,
            }),
        })
    }

    /// The process-wide context, created on first use over the current
    /// working directory.
    ///
    /// # Panics
    ///
    /// Panics when the baseline cannot be captured (malformed baseline file
    /// or unreadable working directory); the ambient accessor has no error
    /// channel. Construct an explicit context to handle those errors.
    pub fn global() -> &'static ConfigContext {
        static GLOBAL: LazyLock<ConfigContext> = LazyLock::new(|| {
            ConfigContext::new()
                .expect("failed to initialize the process-wide configuration context")
        });
        &GLOBAL
    }

    /// Resolve an ordered list of source names into a [`Configurator`].
    ///
    /// The resolution order is the baseline followed by `names` in call
    /// order; later names have higher precedence. Names matching no file are
    /// skipped and contribute nothing. Zero names is valid and yields a
    /// baseline-equivalent configurator. A name may appear twice; the later
    /// occurrence simply re-overrides with the same cached source.
    ///
    /// Every call recomputes the merge, but source parses are cached by the
    /// context's repository, so resolving the same names again reuses the
    /// already-loaded sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`](crate::error::ConfigError::Parse) when
    /// any named file exists but is malformed. No partial configurator is
    /// returned.
    pub fn using_files<I>(&self, names: I) -> Result<Configurator>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut layers = Vec::with_capacity(names.len() + 1);
        layers.push(self.shared.system.snapshot());
        for name in &names {
            if let Some(source) = self.shared.repository.get(name)? {
                layers.push(source);
            }
        }

        let resolved = Arc::new(ResolvedConfig {
            file_names: names,
            view: MergedView::merge(layers),
            host_alias: self.shared.host_alias.clone(),
            web_host: self.shared.system.is_web_host(),
        });
        Ok(Configurator {
            resolved,
            shared: Arc::clone(&self.shared),
        })
    }

    /// Convenience for [`using_files`](Self::using_files) with exactly one
    /// name.
    pub fn using_file(&self, name: impl Into<String>) -> Result<Configurator> {
        self.using_files([name.into()])
    }

    /// The current default configurator. Before any promotion this equals
    /// the baseline configurator.
    pub fn current_default(&self) -> Configurator {
        Configurator {
            resolved: self.shared.defaults.current(),
            shared: Arc::clone(&self.shared),
        }
    }

    /// The baseline configurator captured when this context was created.
    pub fn baseline(&self) -> Configurator {
        Configurator {
            resolved: Arc::clone(self.shared.defaults.baseline()),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Return the current default to the captured baseline, discarding any
    /// promotion. Equivalent to promoting a zero-file configurator resolved
    /// before any system promotion.
    pub fn restore_defaults(&self) {
        self.shared.defaults.restore();
    }

    /// Revert everything
    /// [`promote_to_system_default`](Configurator::promote_to_system_default)
    /// wrote into the baseline system store, returning it to exactly the
    /// values captured at context creation, and return the current default
    /// to the baseline as well.
    pub fn restore_system_defaults(&self) {
        self.shared.system.restore();
        self.shared.defaults.restore();
    }

    /// The baseline system store, as a caller outside this crate's
    /// resolution would read it.
    pub fn system(&self) -> &SystemStore {
        &self.shared.system
    }

    /// The repository resolving and caching this context's sources.
    pub fn repository(&self) -> &ConfigRepository {
        &self.shared.repository
    }

    /// The alias of the running host, resolved once at context creation.
    pub fn host_alias(&self) -> &str {
        &self.shared.host_alias
    }

    /// Whether the process was detected as a web host.
    pub fn is_web_host(&self) -> bool {
        self.shared.system.is_web_host()
    }

    /// The machine's network name, as used for host-alias resolution when no
    /// mapping matches. Exposed so callers and tests can build host-mapping
    /// fixtures for the machine they actually run on.
    pub fn machine_name() -> String {
        host::machine_name()
    }
}
