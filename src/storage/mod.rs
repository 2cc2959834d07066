// src/storage/mod.rs
//
// Persistence adapter: one string under one fixed key.

pub mod browser;

use std::collections::HashMap;
use std::rc::Rc;

use parking_lot::Mutex;

pub use browser::BrowserStorage;

use crate::error::StorageError;

/// String key-value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted editor text.
///
/// Backend failures never reach the caller. A failed write is kept in an
/// in-memory shadow for the rest of the session and `load` prefers the shadow,
/// so save/load still round-trips when the browser refuses to store anything.
pub struct CodeStore<S> {
    backend: Option<S>,
    key: String,
    shadow: Mutex<Option<String>>,
}

impl<S: KeyValueStore> CodeStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        CodeStore {
            backend: Some(backend),
            key: key.into(),
            shadow: Mutex::new(None),
        }
    }

    /// Memory-only store, used when the page has no storage at all.
    pub fn detached(key: impl Into<String>) -> Self {
        CodeStore {
            backend: None,
            key: key.into(),
            shadow: Mutex::new(None),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn save(&self, code: &str) {
        let Some(backend) = &self.backend else {
            *self.shadow.lock() = Some(code.to_string());
            return;
        };

        match backend.set(&self.key, code) {
            Ok(()) => {
                *self.shadow.lock() = None;
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "keeping editor text in memory only");
                *self.shadow.lock() = Some(code.to_string());
            }
        }
    }

    pub fn load(&self) -> Option<String> {
        if let Some(code) = self.shadow.lock().clone() {
            return Some(code);
        }

        let backend = self.backend.as_ref()?;
        match backend.get(&self.key) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "could not read saved editor text");
                None
            }
        }
    }

    pub fn load_or(&self, default: &str) -> String {
        self.load().unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Accepts a fixed number of writes, then reports quota exhaustion.
    struct QuotaStorage {
        inner: MemoryStorage,
        writes_left: Cell<usize>,
    }

    impl KeyValueStore for QuotaStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            match self.writes_left.get() {
                0 => Err(StorageError::WriteFailed("QuotaExceededError".into())),
                n => {
                    self.writes_left.set(n - 1);
                    self.inner.set(key, value)
                }
            }
        }
    }

    struct BrokenStorage;

    impl KeyValueStore for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::ReadFailed("SecurityError".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn first_load_uses_default_snippet() {
        let store = CodeStore::new(MemoryStorage::default(), "codeContent");
        assert_eq!(store.load(), None);
        assert_eq!(store.load_or("print('Hello world')"), "print('Hello world')");
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = CodeStore::new(MemoryStorage::default(), "codeContent");
        for text in ["", "print(1)\n", "for i in range(3):\n\tprint('é', i)\n"] {
            store.save(text);
            assert_eq!(store.load().as_deref(), Some(text));
        }
    }

    #[test]
    fn save_writes_under_the_configured_key() {
        let backend = MemoryStorage::default();
        backend.set("other", "untouched").unwrap();
        let store = CodeStore::new(backend, "scratch");

        store.save("x = 2");

        let backend = store.backend.as_ref().unwrap();
        assert_eq!(backend.get("scratch").unwrap().as_deref(), Some("x = 2"));
        assert_eq!(backend.get("other").unwrap().as_deref(), Some("untouched"));
    }

    #[test]
    fn failed_write_is_shadowed_in_memory() {
        let store = CodeStore::new(
            QuotaStorage {
                inner: MemoryStorage::default(),
                writes_left: Cell::new(1),
            },
            "codeContent",
        );

        store.save("first");
        store.save("second");

        assert_eq!(store.load().as_deref(), Some("second"));
    }

    #[test]
    fn broken_backend_never_surfaces() {
        let store = CodeStore::new(BrokenStorage, "codeContent");
        assert_eq!(store.load(), None);

        store.save("kept");
        assert_eq!(store.load().as_deref(), Some("kept"));
    }

    #[test]
    fn detached_store_round_trips() {
        let store: CodeStore<MemoryStorage> = CodeStore::detached("codeContent");
        assert_eq!(store.load(), None);
        store.save("y = 3");
        assert_eq!(store.load().as_deref(), Some("y = 3"));
    }
}
