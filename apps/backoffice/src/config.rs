//! # Application Configuration
//!
//! Resolves where the collection blobs live on disk.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Environment override for the data directory (useful in development and
/// tests).
pub const DATA_DIR_ENV: &str = "AGENDA_DATA_DIR";

/// Backoffice configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding one `<collection>.json` file per store.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Resolves the configuration from the environment.
    ///
    /// ## Resolution Order
    /// 1. `AGENDA_DATA_DIR` environment variable, when set
    /// 2. The platform app-data directory:
    ///    - **macOS**: `~/Library/Application Support/com.agenda.gestion`
    ///    - **Windows**: `%APPDATA%\agenda\gestion\data`
    ///    - **Linux**: `~/.local/share/agenda-gestion`
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(AppConfig {
                data_dir: PathBuf::from(dir),
            });
        }

        let project_dirs = ProjectDirs::from("com", "agenda", "gestion")
            .ok_or("could not determine app data directory")?;

        Ok(AppConfig {
            data_dir: project_dirs.data_dir().to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        // Env vars are process-global; keep this the only test touching it.
        std::env::set_var(DATA_DIR_ENV, "/tmp/agenda-test-data");
        let config = AppConfig::from_env().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(config.data_dir, PathBuf::from("/tmp/agenda-test-data"));
    }
}
