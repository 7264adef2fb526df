//! Shared schedule preferences (subgroup, elective-sport instructor).
//!
//! One store is created at the composition root and handed to every view
//! that needs it; clones share the same underlying state. Preferences are
//! persisted as JSON on every change.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePreferences {
    pub subgroup: Option<u8>,
    pub elective_sport_instructor: Option<String>,
}

#[derive(Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Arc<RwLock<SchedulePreferences>>,
}

impl PreferenceStore {
    /// Loads preferences from `path`. A missing or unreadable file is a
    /// first run; a malformed file is discarded with a warning. Neither
    /// is an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(err) => {
                    warn!("ignoring malformed preference file {}: {}", path.display(), err);
                    SchedulePreferences::default()
                }
            },
            Err(_) => SchedulePreferences::default(),
        };

        Self {
            path,
            prefs: Arc::new(RwLock::new(prefs)),
        }
    }

    pub fn get(&self) -> SchedulePreferences {
        self.prefs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subgroup(&self) -> Option<u8> {
        self.get().subgroup
    }

    pub fn elective_sport_instructor(&self) -> Option<String> {
        self.get().elective_sport_instructor
    }

    pub fn set_subgroup(&self, subgroup: Option<u8>) -> Result<(), AppError> {
        self.update(|prefs| prefs.subgroup = subgroup)
    }

    pub fn set_elective_sport_instructor(&self, name: Option<String>) -> Result<(), AppError> {
        self.update(|prefs| prefs.elective_sport_instructor = name)
    }

    fn update(&self, apply: impl FnOnce(&mut SchedulePreferences)) -> Result<(), AppError> {
        let snapshot = {
            let mut prefs = self.prefs.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut prefs);
            prefs.clone()
        };
        self.persist(&snapshot)
    }

    fn persist(&self, prefs: &SchedulePreferences) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(prefs)?)?;
        debug!("preferences saved to {}", self.path.display());
        Ok(())
    }
}
