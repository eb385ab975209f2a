//! Request handlers and response shaping.

pub mod books;
pub mod borrowers;

use crate::error::{AppError, Result};
use crate::AppState;
use circ_engine::Library;
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn read_library(state: &AppState) -> Result<RwLockReadGuard<'_, Library>> {
    state
        .library
        .read()
        .map_err(|_| AppError::Internal("state lock poisoned".into()))
}

pub(crate) fn write_library(state: &AppState) -> Result<RwLockWriteGuard<'_, Library>> {
    state
        .library
        .write()
        .map_err(|_| AppError::Internal("state lock poisoned".into()))
}

/// Persist the library snapshot if a data path is configured.
pub(crate) fn persist_if_configured(state: &AppState, library: &Library) {
    if let Some(path) = &state.config.data_path {
        crate::persist::save(path, library);
    }
}
