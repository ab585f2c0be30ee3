use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::{TryOnError, TryOnResult},
    model::TryOnRequest,
};

/// Fixed slot key shared by every writer and reader of the relay.
pub const RELAY_KEY: &str = "tryOnData";

/// String key-value storage scoped to one profile.
pub trait KeyValueStore {
    /// Content that exists but is not text is reported as
    /// [`TryOnError::Corrupt`], distinct from I/O failures.
    fn get(&self, key: &str) -> TryOnResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> TryOnResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> TryOnResult<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TryOnResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> TryOnResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> TryOnResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One file per key under `root`. Outlives the process, like a browser profile.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

fn io_error(op: &str, path: &Path, e: std::io::Error) -> TryOnError {
    TryOnError::storage(format!("{op} '{}': {e}", path.display()))
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> TryOnResult<PathBuf> {
        let ok = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !ok {
            return Err(TryOnError::storage(format!("invalid store key '{key}'")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FsStore {
    fn get(&self, key: &str) -> TryOnResult<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", &path, e)),
        };

        match String::from_utf8(bytes) {
            Ok(s) => Ok(Some(s)),
            Err(e) => {
                let msg = format!("'{}' is not UTF-8: {e}", path.display());
                Err(TryOnError::corrupt(msg))
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> TryOnResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| io_error("create", &self.root, e))?;
        std::fs::write(&path, value)
            .map_err(|e| io_error("write", &path, e))
    }

    fn remove(&mut self, key: &str) -> TryOnResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &path, e)),
        }
    }
}

/// Single-slot, read-once channel between the selection and result views.
///
/// One writer, one reader. A second `store` before a read overwrites the
/// first (last write wins). Reading clears the slot, so a second read without
/// an intervening `store` yields `None`. Not meant to be shared across
/// threads; every operation takes `&mut self`.
#[derive(Debug)]
pub struct SessionRelay<S> {
    store: S,
}

impl<S: KeyValueStore> SessionRelay<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    #[tracing::instrument(skip(self))]
    pub fn store(&mut self, request: &TryOnRequest) -> TryOnResult<()> {
        let json = serde_json::to_string(request)
            .map_err(|e| TryOnError::serde(e.to_string()))?;
        self.store.set(RELAY_KEY, &json)
    }

    /// Reads the slot and clears it. A value that is not text or not a
    /// request is dropped and reads as `None`, so it cannot poison later
    /// reads. Plain I/O failures still propagate.
    #[tracing::instrument(skip(self))]
    pub fn take_and_clear(&mut self) -> TryOnResult<Option<TryOnRequest>> {
        let raw = match self.store.get(RELAY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(TryOnError::Corrupt(msg)) => {
                tracing::warn!(error = %msg, "discarding unreadable relay slot");
                self.store.remove(RELAY_KEY)?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        self.store.remove(RELAY_KEY)?;

        match serde_json::from_str::<TryOnRequest>(&raw) {
            Ok(req) => Ok(Some(req)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed relay slot");
                Ok(None)
            }
        }
    }

    pub fn send(&mut self, request: &TryOnRequest) -> TryOnResult<()> {
        self.store(request)
    }

    pub fn receive_once(&mut self) -> TryOnResult<Option<TryOnRequest>> {
        self.take_and_clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_reads_none_without_deleting_anything() {
        let mut store = MemoryStore::new();
        store.set("other", "x").unwrap();
        let mut relay = SessionRelay::new(store);
        assert_eq!(relay.take_and_clear().unwrap(), None);

        let other = relay.into_inner().get("other").unwrap();
        assert_eq!(other.as_deref(), Some("x"));
    }

    #[test]
    fn malformed_slot_is_cleared() {
        let mut store = MemoryStore::new();
        store.set(RELAY_KEY, "{not json").unwrap();
        let mut relay = SessionRelay::new(store);
        assert_eq!(relay.take_and_clear().unwrap(), None);
        assert_eq!(relay.into_inner().get(RELAY_KEY).unwrap(), None);
    }

    #[test]
    fn fs_store_rejects_path_like_keys() {
        let store = FsStore::new(std::env::temp_dir());
        assert!(store.get("../etc/passwd").is_err());
        assert!(store.get("").is_err());
    }
}
