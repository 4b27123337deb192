//! Web Storage backed preferences, plus an in-memory stand-in.

use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::Storage;

use crate::domain::errors::StorageError;
use crate::domain::repositories::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    /// Survives restarts, shared by every tab
    Local,
    /// Scoped to one tab
    Session,
}

impl StorageArea {
    fn label(&self) -> &'static str {
        match self {
            StorageArea::Local => "localStorage",
            StorageArea::Session => "sessionStorage",
        }
    }
}

/// Looks the storage object up on every call; private browsing modes may
/// deny access at any time, which reads as "no value".
#[derive(Debug, Clone, Copy)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    pub fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    fn storage(&self) -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable("window"))?;
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        storage
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable(self.area.label()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

/// Used when Web Storage is unavailable, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
