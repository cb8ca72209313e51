use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, TrailError};

/// Top-level Papertrail configuration read from a TOML file.
///
/// Host applications that configure the trail programmatically can use
/// [`TrailConfig::default`] and override fields directly.
#[derive(Debug, Clone, Deserialize)]
pub struct TrailConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub dispatch: DispatchSection,
}

impl TrailConfig {
    /// Load the configuration from `path`.
    ///
    /// Missing sections fall back to defaults; present values are
    /// validated so a bad config fails at startup, not on first append.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TrailError::InvalidConfig {
                detail: format!("config file not found: {}", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| TrailError::InvalidConfig {
            detail: format!("failed to parse {}: {e}", path.display()),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.store.file.as_os_str().is_empty() {
            return Err(TrailError::InvalidConfig {
                detail: "store.file must not be empty".into(),
            });
        }
        if self.dispatch.workers == 0 {
            return Err(TrailError::InvalidConfig {
                detail: "dispatch.workers must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            store: StoreSection::default(),
            dispatch: DispatchSection::default(),
        }
    }
}

/// The `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// Backing file for the record sequence.
    #[serde(default = "default_store_file")]
    pub file: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            file: default_store_file(),
        }
    }
}

fn default_store_file() -> PathBuf {
    PathBuf::from("audit_trail.json")
}

/// The `[dispatch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchSection {
    /// Number of background workers draining the dispatch queue.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, body: &str) -> PathBuf {
        let path = tmp.path().join("papertrail.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_are_usable() {
        let config = TrailConfig::default();
        assert_eq!(config.store.file, PathBuf::from("audit_trail.json"));
        assert_eq!(config.dispatch.workers, 2);
    }

    #[test]
    fn loads_a_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
            [store]
            file = "dat/audit_trail.json"

            [dispatch]
            workers = 4
            "#,
        );

        let config = TrailConfig::load(&path).unwrap();
        assert_eq!(config.store.file, PathBuf::from("dat/audit_trail.json"));
        assert_eq!(config.dispatch.workers, 4);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[store]\nfile = \"trail.json\"\n");

        let config = TrailConfig::load(&path).unwrap();
        assert_eq!(config.store.file, PathBuf::from("trail.json"));
        assert_eq!(config.dispatch.workers, 2);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[dispatch]\nworkers = 0\n");

        let err = TrailConfig::load(&path).unwrap_err();
        assert!(matches!(err, TrailError::InvalidConfig { .. }));
    }

    #[test]
    fn missing_file_is_invalid_config() {
        let tmp = TempDir::new().unwrap();
        let err = TrailConfig::load(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, TrailError::InvalidConfig { .. }));
    }

    #[test]
    fn unparseable_config_is_invalid_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "not toml [[[");

        let err = TrailConfig::load(&path).unwrap_err();
        assert!(matches!(err, TrailError::InvalidConfig { .. }));
    }
}
