//! Snapshot persistence for the library state.
//!
//! The engine exports deterministic JSON snapshots; this module reads and
//! writes them. A write failure after a successful mutation is logged
//! rather than surfaced, so the request that already committed in memory
//! still succeeds.

use circ_engine::{Library, LibrarySnapshot};
use std::path::Path;

/// Errors while restoring persisted state at startup.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read snapshot file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to restore snapshot: {0}")]
    Engine(#[from] circ_engine::Error),
}

/// Load the library from a snapshot file, or start empty.
///
/// A missing file is not an error; a present but invalid file is, since
/// silently discarding recorded loans would be worse than refusing to start.
pub fn load_or_default(path: Option<&Path>) -> Result<Library, PersistError> {
    let Some(path) = path else {
        return Ok(Library::new());
    };

    if !path.exists() {
        tracing::info!("no snapshot at {}, starting empty", path.display());
        return Ok(Library::new());
    }

    let json = std::fs::read_to_string(path)?;
    let snapshot = LibrarySnapshot::from_json(&json)?;

    let mut library = Library::new();
    library.import_state(snapshot)?;
    Ok(library)
}

/// Write the library snapshot to a file. Failures are logged, not surfaced.
pub fn save(path: &Path, library: &Library) {
    match library.export_state().to_json() {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                tracing::warn!("failed to persist snapshot to {}: {}", path.display(), e);
            }
        }
        Err(e) => tracing::warn!("failed to encode snapshot: {}", e),
    }
}
