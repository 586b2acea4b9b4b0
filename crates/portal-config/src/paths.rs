//! File system paths for the portal client.

use crate::{ConfigError, ConfigResult};
use std::path::PathBuf;

/// Manages file system paths for the portal client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client files (~/.portal)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.portal`.
    pub fn new() -> ConfigResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".portal"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.portal).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.portal/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the persisted session store path (~/.portal/session.json).
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base directory exists.
    pub fn ensure_dirs(&self) -> ConfigResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_base_dir() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/portal-test"));
        assert_eq!(paths.base_dir(), &PathBuf::from("/tmp/portal-test"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/portal-test/config.json")
        );
        assert_eq!(
            paths.session_file(),
            PathBuf::from("/tmp/portal-test/session.json")
        );
    }

    #[test]
    fn test_ensure_dirs_creates_base() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_base_dir(tmp.path().join("nested").join("portal"));
        paths.ensure_dirs().unwrap();
        assert!(paths.base_dir().is_dir());
    }
}
