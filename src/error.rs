//! Error types for layered-config.

/// Result type alias for layered-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while resolving configuration.
///
/// A named file that does not exist on disk is *not* an error anywhere in
/// this crate; absent sources and absent optional sections are normal values
/// (`None`). Everything below is a hard failure that propagates to the caller
/// who requested resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A named source exists but its content is malformed.
    ///
    /// Aborts the whole resolution call; no partially-merged view is ever
    /// returned.
    #[error("failed to parse configuration file '{file}': {source}")]
    Parse {
        /// The source name as requested by the caller.
        file: String,
        /// The underlying reader error.
        #[source]
        source: Box<config::ConfigError>,
    },

    /// A section requested through the required-section accessor is not
    /// defined in any layer, including the baseline.
    #[error("required configuration section '{0}' is not defined in any layer")]
    RequiredSectionMissing(String),

    /// A section is defined but does not deserialize into the requested type.
    #[error("configuration section '{section}' does not match the requested type: {source}")]
    SectionType {
        /// The section name.
        section: String,
        /// The underlying deserialization error.
        #[source]
        source: Box<config::ConfigError>,
    },

    /// The host-mapping data contains more than one entry for the current
    /// machine name.
    #[error("host '{host}' is mapped more than once in '{file}'")]
    HostMappingAmbiguous {
        /// The machine network name being resolved.
        host: String,
        /// The source holding the conflicting mapping.
        file: String,
    },

    /// IO error occurred while locating the configuration base directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
