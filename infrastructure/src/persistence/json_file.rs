//! Session fields persisted as one JSON object on disk.

use interview_application::ports::field_store::{FieldStore, PersistenceError, SessionField};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

type Fields = BTreeMap<String, String>;

/// Field store backed by a single JSON file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash mid-write leaves the previous snapshot intact.
pub struct JsonFileStore {
    path: PathBuf,
    fields: Mutex<Fields>,
}

impl JsonFileStore {
    /// Open the store, loading existing fields if the file is present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let fields = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Fields::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            Fields::new()
        };
        debug!("Opened session store {} ({} fields)", path.display(), fields.len());

        Ok(Self {
            path,
            fields: Mutex::new(fields),
        })
    }

    /// Start an empty store at `path`, discarding whatever the file held.
    ///
    /// The previous contents are never parsed, so a truncated snapshot left
    /// by a crash does not block a new interview.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            fields: Mutex::new(Fields::new()),
        };
        store.flush(&Fields::new())?;
        debug!("Started empty session store {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Fields>, PersistenceError> {
        self.fields
            .lock()
            .map_err(|_| PersistenceError::Unavailable("store lock poisoned".to_string()))
    }

    fn flush(&self, fields: &Fields) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(fields)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl FieldStore for JsonFileStore {
    fn set_field(&self, field: SessionField, value: &str) -> Result<(), PersistenceError> {
        let mut fields = self.lock()?;
        fields.insert(field.key().to_string(), value.to_string());
        self.flush(&fields)
    }

    fn get_field(&self, field: SessionField) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock()?.get(field.key()).cloned())
    }
}
