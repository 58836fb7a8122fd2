use crate::{
    domain::{BoardMeta, Task},
    error::{BoardError, Result},
    storage::{Storage, BOARD_KEY, TASKS_KEY},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// In-process key-value storage holding raw JSON text per key
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key with raw text, bypassing serialization
    pub fn with_raw(self, key: &str, value: impl Into<String>) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.into());
        }
        self
    }

    /// Returns the raw text stored under a key
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| BoardError::StorageError("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn load_tasks(&self) -> Result<Option<Vec<Task>>> {
        match self.lock()?.get(TASKS_KEY) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.lock()?.insert(TASKS_KEY.to_string(), json);
        Ok(())
    }

    async fn load_board(&self) -> Result<Option<BoardMeta>> {
        match self.lock()?.get(BOARD_KEY) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save_board(&self, meta: &BoardMeta) -> Result<()> {
        let json = serde_json::to_string(meta)?;
        self.lock()?.insert(BOARD_KEY.to_string(), json);
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.raw(BOARD_KEY).is_some()
    }
}
