//! Application paths and draft-store constants.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Duration (seconds) of a cover clip when none is given.
pub const DEFAULT_COVER_DURATION: f64 = 1.0;

/// Managed directory name used when the caller doesn't pick one.
pub const DEFAULT_DRAFT_DIRECTORY: &str = "Clips";

/// Extension of the media file stored for every video clip.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Sidecar file is named `<directory>Drafts.json`.
pub const SIDECAR_SUFFIX: &str = "Drafts.json";

/// Current sidecar schema version.
pub const SIDECAR_VERSION: u32 = 1;

/// Env var overriding the data directory.
pub const DATA_DIR_ENV: &str = "MYSECONDS_DATA_DIR";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom data directory (from CLI or ENV)
    pub data_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (MYSECONDS_DATA_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let data_dir = cli_dir.or_else(|| std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from));

        Self { data_dir }
    }

    /// Config pinned to an explicit directory (tests, embedding).
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
        }
    }
}

/// Get path to a data file (drafts, logs)
///
/// Platform paths:
/// - Linux: ~/.local/share/myseconds/{name}
/// - macOS: ~/Library/Application Support/myseconds/{name}
/// - Windows: %APPDATA%\myseconds\{name}
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    data_dir(config).join(name)
}

/// Get the data directory
///
/// Priority:
/// 1. CLI --data-dir argument
/// 2. MYSECONDS_DATA_DIR environment variable
/// 3. Platform-specific data directory from dirs-next (default)
pub fn data_dir(config: &PathConfig) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }

    if let Some(dir) = dirs_next::data_dir() {
        return dir.join("myseconds");
    }

    // Fallback: "." if everything else fails
    PathBuf::from(".")
}

/// Ensure that the data directory exists
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let dir = data_dir(config);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    }

    Ok(())
}

/// Sidecar file name for a managed directory: `ClipsDrafts.json` for `Clips`.
pub fn sidecar_name(directory_name: &str) -> String {
    format!("{}{}", directory_name, SIDECAR_SUFFIX)
}
