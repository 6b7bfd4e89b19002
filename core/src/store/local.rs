//! Local translation store.
//!
//! In-memory state behind a mutex with optional JSON persistence, so CLI
//! runs see the same collection across invocations. Enforces the host rules
//! the pipelines rely on: at most [`MAX_MODES`] modes per collection, never
//! zero modes, fresh collections start with a single default mode.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SyncError;
use crate::model::{mode_flag, Collection, LocalEntry, Mode};

use super::{TranslationStore, DEFAULT_MODE_NAME, MAX_MODES};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    collections: Vec<CollectionState>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CollectionState {
    id: String,
    name: String,
    modes: Vec<Mode>,
    entries: Vec<LocalEntry>,
}

impl CollectionState {
    fn snapshot(&self) -> Collection {
        Collection {
            id: self.id.clone(),
            name: self.name.clone(),
            modes: self.modes.clone(),
        }
    }
}

/// JSON-file-backed implementation of [`TranslationStore`].
pub struct LocalStore {
    state: Mutex<StoreState>,
    path: Option<PathBuf>,
}

impl LocalStore {
    /// Purely in-memory store, used by tests and dry runs.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            path: None,
        }
    }

    /// Open (or initialize) a store backed by a JSON file.
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let state = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("corrupt store file {}: {e}", path.display()))?
        } else {
            StoreState::default()
        };

        Ok(Self {
            state: Mutex::new(state),
            path: Some(path),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreState>, SyncError> {
        self.state
            .lock()
            .map_err(|_| SyncError::Store("store lock poisoned".to_string()))
    }

    fn persist(&self, state: &StoreState) -> Result<(), SyncError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| SyncError::Store(format!("create store dir failed: {e}")))?;
        }
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| SyncError::Store(format!("serialize store failed: {e}")))?;
        std::fs::write(path, raw)
            .map_err(|e| SyncError::Store(format!("write store file failed: {e}")))?;
        Ok(())
    }

    fn flag_key(mode_id: Option<&str>, name: &str) -> String {
        match mode_id {
            Some(mode_id) => mode_flag(name, mode_id),
            None => name.to_string(),
        }
    }
}

fn collection_mut<'a>(
    state: &'a mut StoreState,
    collection_id: &str,
) -> Result<&'a mut CollectionState, SyncError> {
    state
        .collections
        .iter_mut()
        .find(|c| c.id == collection_id)
        .ok_or_else(|| SyncError::Store(format!("unknown collection: {collection_id}")))
}

fn entry_mut<'a>(
    state: &'a mut StoreState,
    entry_id: &str,
) -> Result<&'a mut LocalEntry, SyncError> {
    state
        .collections
        .iter_mut()
        .flat_map(|c| c.entries.iter_mut())
        .find(|e| e.id == entry_id)
        .ok_or_else(|| SyncError::Store(format!("unknown entry: {entry_id}")))
}

#[async_trait]
impl TranslationStore for LocalStore {
    async fn find_collection(&self, name: &str) -> Result<Option<Collection>, SyncError> {
        let state = self.lock()?;
        Ok(state
            .collections
            .iter()
            .find(|c| c.name == name)
            .map(CollectionState::snapshot))
    }

    async fn create_collection(&self, name: &str) -> Result<Collection, SyncError> {
        let mut state = self.lock()?;
        if state.collections.iter().any(|c| c.name == name) {
            return Err(SyncError::Store(format!(
                "collection already exists: {name}"
            )));
        }

        let collection = CollectionState {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            // A collection never exists without a mode.
            modes: vec![Mode {
                id: Uuid::new_v4().to_string(),
                name: DEFAULT_MODE_NAME.to_string(),
            }],
            entries: Vec::new(),
        };
        let snapshot = collection.snapshot();
        state.collections.push(collection);
        self.persist(&state)?;
        Ok(snapshot)
    }

    async fn reset_collection(
        &self,
        collection_id: &str,
        base_locale: &str,
    ) -> Result<Collection, SyncError> {
        let mut state = self.lock()?;
        let collection = collection_mut(&mut state, collection_id)?;

        collection.entries.clear();
        collection.modes.truncate(1);
        match collection.modes.first_mut() {
            Some(mode) => mode.name = base_locale.to_string(),
            None => {
                // Unreachable under the never-zero-modes rule; repair anyway.
                collection.modes.push(Mode {
                    id: Uuid::new_v4().to_string(),
                    name: base_locale.to_string(),
                });
            }
        }

        let snapshot = collection.snapshot();
        self.persist(&state)?;
        Ok(snapshot)
    }

    async fn get_or_create_mode(
        &self,
        collection_id: &str,
        name: &str,
    ) -> Result<Option<Mode>, SyncError> {
        let mut state = self.lock()?;
        let collection = collection_mut(&mut state, collection_id)?;

        if let Some(mode) = collection.modes.iter().find(|m| m.name == name) {
            return Ok(Some(mode.clone()));
        }
        if collection.modes.len() >= MAX_MODES {
            return Ok(None);
        }

        let mode = Mode {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        collection.modes.push(mode.clone());
        self.persist(&state)?;
        Ok(Some(mode))
    }

    async fn list_entries(&self, collection_id: &str) -> Result<Vec<LocalEntry>, SyncError> {
        let mut state = self.lock()?;
        let collection = collection_mut(&mut state, collection_id)?;
        Ok(collection.entries.clone())
    }

    async fn set_entry_value(
        &self,
        entry_id: &str,
        mode_id: &str,
        value: &str,
    ) -> Result<(), SyncError> {
        let mut state = self.lock()?;
        let entry = entry_mut(&mut state, entry_id)?;
        entry
            .values_by_mode
            .insert(mode_id.to_string(), value.to_string());
        self.persist(&state)?;
        Ok(())
    }

    async fn create_entry(
        &self,
        collection_id: &str,
        name: &str,
        value: &str,
        mode_id: &str,
    ) -> Result<LocalEntry, SyncError> {
        let mut state = self.lock()?;
        let collection = collection_mut(&mut state, collection_id)?;

        if collection.entries.iter().any(|e| e.name == name) {
            return Err(SyncError::Store(format!("entry already exists: {name}")));
        }

        let mut values_by_mode = HashMap::new();
        values_by_mode.insert(mode_id.to_string(), value.to_string());
        let entry = LocalEntry {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            values_by_mode,
            flags: HashMap::new(),
        };
        collection.entries.push(entry.clone());
        self.persist(&state)?;
        Ok(entry)
    }

    async fn get_flag(
        &self,
        entry_id: &str,
        mode_id: Option<&str>,
        name: &str,
    ) -> Result<Option<String>, SyncError> {
        let mut state = self.lock()?;
        let entry = entry_mut(&mut state, entry_id)?;
        Ok(entry.flags.get(&Self::flag_key(mode_id, name)).cloned())
    }

    async fn set_flag(
        &self,
        entry_id: &str,
        mode_id: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<(), SyncError> {
        let mut state = self.lock()?;
        let entry = entry_mut(&mut state, entry_id)?;
        entry
            .flags
            .insert(Self::flag_key(mode_id, name), value.to_string());
        self.persist(&state)?;
        Ok(())
    }
}
