//! JSON snapshot of the store on disk.

use crate::store::ArenaStore;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "data file I/O error: {}", e),
            PersistError::Json(e) => write!(f, "data file is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Json(err)
    }
}

/// Load the store, or an empty one when the file does not exist yet.
pub fn load(path: &Path) -> Result<ArenaStore, PersistError> {
    match fs::read_to_string(path) {
        Ok(json) => {
            let store: ArenaStore = serde_json::from_str(&json)?;
            log::info!(
                "Loaded {} tournament(s) and {} user(s) from {}",
                store.tournaments.len(),
                store.users.len(),
                path.display()
            );
            Ok(store)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No data file at {}, starting empty", path.display());
            Ok(ArenaStore::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write the store next to `path` and rename over it, so a crash mid-write
/// leaves the previous snapshot intact.
pub fn save(path: &Path, store: &ArenaStore) -> Result<(), PersistError> {
    let json = serde_json::to_vec_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::debug!("Saved store to {}", path.display());
    Ok(())
}
