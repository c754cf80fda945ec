//! Platform paths for the record store and log file.

use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "blade")
}

/// Default store directory: `<data dir>/store`, or `.blade/store` when no home is known.
pub fn default_store_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from(".blade").join("store"))
}

/// Default log file: `<state dir>/blade.log`, falling back to the local data dir.
pub fn default_log_file() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs
            .state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .join("blade.log"),
        None => PathBuf::from(".blade").join("blade.log"),
    }
}
