//! Host configuration: where the notebook directory lives.
//!
//! The on-disk format is a small TOML file. The stored path may use `~` or
//! environment variables; expansion happens once, at load time, so the rest
//! of the application only ever sees a concrete path.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid config TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// What actually sits in the TOML file. The path is kept as a string so
/// `~` and `$VAR` forms survive a save/load cycle unexpanded on disk.
#[derive(Serialize, Deserialize)]
struct OnDisk {
    notebook_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub notebook_path: PathBuf,
}

impl Config {
    pub fn new(notebook_path: impl Into<PathBuf>) -> Self {
        Self {
            notebook_path: notebook_path.into(),
        }
    }

    /// Load from the default location. `Ok(None)` means no file exists yet.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let on_disk: OnDisk = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Some(Self {
            notebook_path: expand(&on_disk.notebook_path),
        }))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        let on_disk = OnDisk {
            notebook_path: self.notebook_path.display().to_string(),
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(&on_disk)?)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        let home = shellexpand::tilde("~");
        Path::new(home.as_ref()).join(".config/markdown-cellbook/config.toml")
    }
}

/// Expand `~` and environment variables; a path that fails to expand (for
/// example an unset variable) is kept literal rather than rejected.
fn expand(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn save_then_load_preserves_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = Config::new("/srv/notebooks");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn tilde_in_stored_path_is_expanded_on_load() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "notebook_path = \"~/notebooks\"\n");

        let loaded = Config::load_from(&path).unwrap().unwrap();
        let loaded_str = loaded.notebook_path.to_string_lossy();
        assert!(!loaded_str.contains('~'), "got {loaded_str}");
        assert!(loaded_str.ends_with("/notebooks"));
    }

    #[test]
    fn env_var_in_stored_path_is_expanded_on_load() {
        unsafe {
            env::set_var("CELLBOOK_CONFIG_TEST_ROOT", "/data/books");
        }
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "notebook_path = \"$CELLBOOK_CONFIG_TEST_ROOT/mine\"\n");

        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.notebook_path, PathBuf::from("/data/books/mine"));

        unsafe {
            env::remove_var("CELLBOOK_CONFIG_TEST_ROOT");
        }
    }

    #[test]
    fn unset_env_var_keeps_the_path_literal() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "notebook_path = \"$CELLBOOK_NO_SUCH_VAR/mine\"\n");

        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(
            loaded.notebook_path,
            PathBuf::from("$CELLBOOK_NO_SUCH_VAR/mine")
        );
    }

    #[test]
    fn malformed_toml_reports_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "notebook_path = [oops");

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn wrong_key_reports_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "notes_path = \"/somewhere\"\n");

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn default_path_is_concrete_and_under_dot_config() {
        let path = Config::default_path();
        let path_str = path.to_string_lossy();
        assert!(!path_str.contains('~'));
        assert!(path_str.ends_with(".config/markdown-cellbook/config.toml"));
    }
}
