//! # layered-config
//!
//! Layered configuration resolution with ordered file merging, host
//! aliasing, and atomic promotion of process-wide defaults.
//!
//! ## Overview
//!
//! An application hands a [`ConfigContext`](core::ConfigContext) an ordered
//! list of source names. The context loads each named file through a cached
//! repository, merges them over the always-present baseline (`web.config` or
//! `app.config` under the base directory), and returns an immutable
//! [`Configurator`](core::Configurator) exposing the merged settings,
//! connection strings, and named sections. Later sources override earlier
//! ones per key; sections are taken whole from the highest-precedence layer
//! defining them.
//!
//! A configurator can be *promoted*: one atomic swap makes its merged view
//! the context's current default, observed by every subsequent
//! [`current_default`](core::ConfigContext::current_default) read. The
//! stronger [`promote_to_system_default`](core::Configurator::promote_to_system_default)
//! also back-fills the merged values into the baseline store itself, and
//! [`restore_system_defaults`](core::ConfigContext::restore_system_defaults)
//! reverts that to exactly the values captured at startup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use layered_config::prelude::*;
//!
//! # fn example() -> layered_config::error::Result<()> {
//! let context = ConfigContext::new()?;
//!
//! // Baseline first, then "database", then "production" (highest wins).
//! let configurator = context.using_files(["database", "production"])?;
//!
//! if let Some(main) = configurator.connection_strings().get("main") {
//!     println!("connecting to {}", main.connection_string);
//! }
//!
//! // Make this view the ambient default for the rest of the process.
//! configurator.promote_to_default();
//! # Ok(())
//! # }
//! ```
//!
//! ## Source files
//!
//! Sources are TOML, YAML, or JSON. The `settings` and `connection_strings`
//! top-level tables are reserved; every other top-level key is a named
//! section available raw or deserialized into a caller type:
//!
//! ```toml
//! [settings]
//! log_level = "info"
//!
//! [connection_strings.main]
//! connection_string = "Server=db;Database=app"
//! provider_name = "postgres"
//!
//! [diagnostics]
//! level = "debug"
//! ```
//!
//! A named file that does not exist is skipped, not an error: resolution
//! with only missing names equals the baseline alone. A malformed file fails
//! the whole resolution call immediately, naming the file.
//!
//! ## Host aliases
//!
//! Each context resolves a logical alias for the running host from a
//! dedicated `hostmap.config` source (falling back to the baseline's
//! `host_map` section, then to the machine name itself). Callers that want
//! host-specific layers include an alias-named file in their resolution
//! order.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{ConfigContext, Configurator, MergedView};
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::ConnectionStringSetting;
}
