//! Name-to-source resolution with per-name caching.

use crate::error::Result;
use crate::sources::ConfigSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Extensions probed, in order, when a name does not match a file directly.
const PROBE_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Resolves source names to loaded [`ConfigSource`] values.
///
/// Names resolve relative to the repository's base directory: the name is
/// tried verbatim first, then with each supported extension appended
/// (`{name}.toml`, `.yaml`, `.yml`, `.json`). A name matching no file is
/// *absent* (`Ok(None)`), which is a normal outcome, not a failure.
///
/// Lookups are cached by name for the lifetime of the repository, absent
/// results included. Cache population happens at most once per name, under
/// the cache lock, so concurrent callers never observe a partially-built
/// source and repeated lookups return the same `Arc` (reference-stable,
/// which keeps merging deterministic). A file created on disk after its name
/// was first looked up is only observed by a new repository.
#[derive(Debug)]
pub struct ConfigRepository {
    base_dir: PathBuf,
    cache: Mutex<HashMap<String, Option<Arc<ConfigSource>>>>,
}

impl ConfigRepository {
    /// Create a repository resolving names under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The directory names resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `name` to its loaded source.
    ///
    /// Returns `Ok(None)` when no file matches the name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`](crate::error::ConfigError::Parse) when
    /// a matching file exists but is malformed. Parse failures are not
    /// cached; a corrected file is picked up by the next lookup.
    pub fn get(&self, name: &str) -> Result<Option<Arc<ConfigSource>>> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(cached) = cache.get(name) {
            return Ok(cached.clone());
        }

        let loaded = match self.resolve_path(name) {
            Some(path) => Some(Arc::new(ConfigSource::from_file(name, &path)?)),
            None => None,
        };
        cache.insert(name.to_string(), loaded.clone());
        Ok(loaded)
    }

    fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        let direct = self.base_dir.join(name);
        if direct.is_file() {
            return Some(direct);
        }
        PROBE_EXTENSIONS
            .iter()
            .map(|ext| self.base_dir.join(format!("{name}.{ext}")))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_name_is_absent_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let repository = ConfigRepository::new(temp_dir.path());

        assert!(repository.get("nowhere.config").unwrap().is_none());
    }

    #[test]
    fn probes_extensions_in_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("service.config.toml"),
            "[settings]\nkey = \"toml\"\n",
        )
        .unwrap();
        let repository = ConfigRepository::new(temp_dir.path());

        let source = repository.get("service.config").unwrap().unwrap();
        assert_eq!(source.settings()["key"], "toml");
    }

    #[test]
    fn exact_file_name_wins_over_probing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("service.yaml"),
            "settings:\n  key: direct\n",
        )
        .unwrap();
        let repository = ConfigRepository::new(temp_dir.path());

        let source = repository.get("service.yaml").unwrap().unwrap();
        assert_eq!(source.settings()["key"], "direct");
    }

    #[test]
    fn repeated_lookups_are_reference_stable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.toml"), "[settings]\nk = \"v\"\n").unwrap();
        let repository = ConfigRepository::new(temp_dir.path());

        let first = repository.get("a").unwrap().unwrap();
        let second = repository.get("a").unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn absent_results_are_cached_for_the_repository_lifetime() {
        let temp_dir = TempDir::new().unwrap();
        let repository = ConfigRepository::new(temp_dir.path());

        assert!(repository.get("late").unwrap().is_none());

        // The file shows up after the first lookup; this repository keeps
        // reporting the cached absence.
        fs::write(temp_dir.path().join("late.toml"), "[settings]\nk = \"v\"\n").unwrap();
        assert!(repository.get("late").unwrap().is_none());

        let fresh = ConfigRepository::new(temp_dir.path());
        assert!(fresh.get("late").unwrap().is_some());
    }

    #[test]
    fn malformed_file_propagates_parse_error_naming_the_source() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.toml"), "settings = not toml").unwrap();
        let repository = ConfigRepository::new(temp_dir.path());

        match repository.get("broken") {
            Err(ConfigError::Parse { file, .. }) => assert_eq!(file, "broken"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn concurrent_lookups_agree_on_one_source() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("shared.toml"), "[settings]\nk = \"v\"\n").unwrap();
        let repository = Arc::new(ConfigRepository::new(temp_dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                std::thread::spawn(move || repository.get("shared").unwrap().unwrap())
            })
            .collect();

        let sources: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for source in &sources[1..] {
            assert!(Arc::ptr_eq(&sources[0], source));
        }
    }
}
