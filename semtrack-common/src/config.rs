//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

const ENV_ROOT_FOLDER: &str = "SEMTRACK_ROOT_FOLDER";
const DATABASE_FILE: &str = "seminars.db";

/// Root folder resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SEMTRACK_ROOT_FOLDER` environment variable
/// 3. `root_folder` key in the platform config file
/// 4. OS-dependent default data directory (fallback)
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>) -> Self {
        Self { cli_arg }
    }

    pub fn resolve(&self) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(ENV_ROOT_FOLDER) {
            return PathBuf::from(path);
        }

        // Priority 3: Config file
        if let Ok(config_path) = find_config_file() {
            if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                    if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                        return PathBuf::from(root_folder);
                    }
                }
            }
        }

        // Priority 4: OS-dependent default
        default_root_folder()
    }
}

/// Ensures the resolved root folder exists and locates files inside it.
pub struct RootFolderInitializer {
    root: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }
}

/// Platform config file: `<config dir>/semtrack/config.toml`
fn find_config_file() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("semtrack").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("semtrack"))
        .unwrap_or_else(|| PathBuf::from("./semtrack_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_takes_priority() {
        let resolver = RootFolderResolver::new(Some(PathBuf::from("/tmp/custom-root")));
        assert_eq!(resolver.resolve(), PathBuf::from("/tmp/custom-root"));
    }

    #[test]
    fn initializer_creates_directory_and_names_database() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("semtrack-root");

        let initializer = RootFolderInitializer::new(root.clone());
        initializer
            .ensure_directory_exists()
            .expect("should create directory");

        assert!(root.is_dir());
        assert_eq!(initializer.database_path(), root.join("seminars.db"));
    }
}
