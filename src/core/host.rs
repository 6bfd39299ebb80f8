//! Host alias resolution.
//!
//! A host alias is a logical name for the machine the process runs on, used
//! by callers to select host-specific configuration layers (for example by
//! including an `<alias>.config` file in their resolution order; that naming
//! convention is caller policy, nothing here inserts files into the merge).

use crate::error::{ConfigError, Result};
use crate::sources::{ConfigRepository, ConfigSource};
use std::collections::BTreeMap;

/// The dedicated host-mapping source name.
pub(crate) const HOST_MAP_SOURCE: &str = "hostmap.config";
/// The mapping section name, in the dedicated source or the baseline.
const HOST_MAP_SECTION: &str = "host_map";

/// The machine's network name, `localhost` when it cannot be determined.
pub(crate) fn machine_name() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}

/// Resolve the alias for `machine_name`.
///
/// The dedicated `hostmap.config` source is consulted first, then the
/// baseline's `host_map` section. When neither maps this host, the machine
/// name itself is the alias; every host has a valid alias by definition.
///
/// # Errors
///
/// Returns [`ConfigError::HostMappingAmbiguous`] when a mapping table holds
/// more than one entry for this host (host names compare case-insensitively),
/// and propagates parse errors from the host-map source.
pub(crate) fn resolve_alias(
    repository: &ConfigRepository,
    baseline: &ConfigSource,
    machine_name: &str,
) -> Result<String> {
    if let Some(source) = repository.get(HOST_MAP_SOURCE)? {
        if let Some(alias) = alias_from(&source, machine_name)? {
            return Ok(alias);
        }
    }
    if let Some(alias) = alias_from(baseline, machine_name)? {
        return Ok(alias);
    }
    Ok(machine_name.to_string())
}

fn alias_from(source: &ConfigSource, machine_name: &str) -> Result<Option<String>> {
    let Some(value) = source.section(HOST_MAP_SECTION) else {
        return Ok(None);
    };
    let mappings: BTreeMap<String, String> =
        value
            .clone()
            .try_deserialize()
            .map_err(|source| ConfigError::SectionType {
                section: HOST_MAP_SECTION.to_string(),
                source: Box::new(source),
            })?;

    let mut matches = mappings
        .iter()
        .filter(|(host, _)| host.eq_ignore_ascii_case(machine_name));
    match (matches.next(), matches.next()) {
        (Some((_, alias)), None) => Ok(Some(alias.clone())),
        (Some(_), Some(_)) => Err(ConfigError::HostMappingAmbiguous {
            host: machine_name.to_string(),
            file: source.name().to_string(),
        }),
        (None, _) => Ok(None),
    }
}
