//! Durable key-value state: calculation settings, the disclaimer flag and the
//! preferred calendar frame, kept together in one JSON document.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarSystem;
use crate::error::StoreError;
use crate::settings::CalculationSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredState {
    pub settings: CalculationSettings,
    pub disclaimer_dismissed: bool,
    pub calendar_mode: CalendarSystem,
}

/// File-backed store. Every read goes to disk, so changes written by another
/// process are picked up on the next load.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be read, or
    /// [`StoreError::Malformed`] if it is not valid JSON.
    pub fn load(&self) -> Result<StoredState, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredState::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(StoredState::default());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the whole document through a sibling temp file and a rename, so
    /// a concurrent reader never sees a half-written file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory, temp file or rename fails.
    pub fn save(&self, state: &StoredState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(state).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "settings store written");
        Ok(())
    }

    /// # Errors
    ///
    /// See [`SettingsStore::load`].
    pub fn load_settings(&self) -> Result<CalculationSettings, StoreError> {
        Ok(self.load()?.settings)
    }

    /// # Errors
    ///
    /// See [`SettingsStore::load`] and [`SettingsStore::save`].
    pub fn save_settings(&self, settings: &CalculationSettings) -> Result<(), StoreError> {
        self.update(|state| state.settings = settings.clone())
    }

    /// # Errors
    ///
    /// See [`SettingsStore::load`].
    pub fn is_disclaimer_dismissed(&self) -> Result<bool, StoreError> {
        Ok(self.load()?.disclaimer_dismissed)
    }

    /// # Errors
    ///
    /// See [`SettingsStore::load`] and [`SettingsStore::save`].
    pub fn dismiss_disclaimer(&self) -> Result<(), StoreError> {
        self.update(|state| state.disclaimer_dismissed = true)
    }

    /// # Errors
    ///
    /// See [`SettingsStore::load`].
    pub fn calendar_mode(&self) -> Result<CalendarSystem, StoreError> {
        Ok(self.load()?.calendar_mode)
    }

    /// # Errors
    ///
    /// See [`SettingsStore::load`] and [`SettingsStore::save`].
    pub fn set_calendar_mode(&self, mode: CalendarSystem) -> Result<(), StoreError> {
        self.update(|state| state.calendar_mode = mode)
    }

    /// Last modification time, or `None` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if metadata cannot be read.
    pub fn modified_at(&self) -> Result<Option<SystemTime>, StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) => meta.modified().map(Some).map_err(|e| self.io_error(e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut StoredState)) -> Result<(), StoreError> {
        let mut state = self.load()?;
        apply(&mut state);
        self.save(&state)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
