use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::app::movie::WatchedEntry;

/// On-disk form of the watched list.
#[derive(Debug, Serialize, Deserialize)]
pub struct WatchedFile {
    pub saved_at: DateTime<Local>,
    pub movies: Vec<WatchedEntry>,
}

#[derive(Debug, Error)]
pub enum WatchedListError {
    #[error("failed to read watched list '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse watched list '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write watched list '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize watched list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `<data dir>/filmbuff/watched.json`, or the current directory when
/// the platform has no data dir.
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("filmbuff")
        .join("watched.json")
}

/// Loads the watched list. A missing file is an empty list.
pub fn load(path: &Path) -> Result<Vec<WatchedEntry>, WatchedListError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(WatchedListError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: WatchedFile =
        serde_json::from_str(&content).map_err(|source| WatchedListError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(file.movies)
}

/// Moves a watched list that failed to parse to `<path>.bak`, so the
/// next save does not overwrite it. Returns the backup path.
pub fn back_up(path: &Path) -> io::Result<PathBuf> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    fs::rename(path, &backup)?;
    warn!(from = %path.display(), to = %backup.display(), "moved unreadable watched list aside");
    Ok(backup)
}

pub fn save(path: &Path, movies: &[WatchedEntry]) -> Result<(), WatchedListError> {
    let file = WatchedFile {
        saved_at: Local::now(),
        movies: movies.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file)?;

    let write_error = |source: io::Error| WatchedListError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, json).map_err(write_error)?;

    info!(path = %path.display(), count = movies.len(), "saved watched list");
    Ok(())
}
