//! Single-file JSON document store.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use chirpy_core::domain::Document;
use chirpy_core::error::StoreError;

/// Durable home of the [`Document`].
///
/// Readers share the lock while loading; a writer holds it exclusively from
/// load to save, so two read-modify-write sequences never interleave. The
/// file is replaced by writing a sibling temp file and renaming it into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    /// Open the store, writing an empty document if the file is absent.
    ///
    /// A failure here means the store cannot work at all; callers are
    /// expected to abort startup.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            lock: RwLock::new(()),
        };

        store.ensure_exists().map_err(|e| match e {
            StoreError::Io { path, source } => StoreError::Init { path, source },
            other => other,
        })?;

        tracing::info!(path = %store.path.display(), "Document store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load a snapshot of the document.
    pub fn load(&self) -> Result<Document, StoreError> {
        self.read_locked().map(|(_guard, doc)| doc)
    }

    /// Replace the whole document.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        self.save_unlocked(doc)
    }

    /// Run a read-only operation against a fresh snapshot.
    pub fn read<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let (_guard, doc) = self.read_locked()?;
        operation(&doc)
    }

    /// Run load, `operation` and save as one exclusive critical section.
    ///
    /// Nothing is written if `operation` fails.
    pub fn write<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        let mut doc = self.load_unlocked()?;
        let result = operation(&mut doc)?;
        self.save_unlocked(&doc)?;
        Ok(result)
    }

    /// Take the shared lock and load under it.
    ///
    /// Recreating a missing file is a write, so it happens under the
    /// exclusive lock before the shared one is taken again.
    fn read_locked(&self) -> Result<(RwLockReadGuard<'_, ()>, Document), StoreError> {
        loop {
            {
                let guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
                if let Some(doc) = self.try_load_unlocked()? {
                    return Ok((guard, doc));
                }
            }

            let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
            self.ensure_exists()?;
        }
    }

    fn ensure_exists(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Creating empty document");
                self.replace_file(&Document::default())
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn load_unlocked(&self) -> Result<Document, StoreError> {
        self.ensure_exists()?;
        self.try_load_unlocked()?
            .ok_or_else(|| StoreError::io(&self.path, ErrorKind::NotFound.into()))
    }

    /// Read and decode the file, or `None` if it is absent.
    fn try_load_unlocked(&self) -> Result<Option<Document>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let doc: Document = serde_json::from_slice(&data).map_err(StoreError::Decode)?;

        tracing::debug!(
            chirps = doc.chirp_count(),
            users = doc.user_count(),
            "Loaded document"
        );
        Ok(Some(doc))
    }

    fn save_unlocked(&self, doc: &Document) -> Result<(), StoreError> {
        self.ensure_exists()?;
        self.replace_file(doc)?;

        tracing::debug!(
            chirps = doc.chirp_count(),
            users = doc.user_count(),
            "Saved document"
        );
        Ok(())
    }

    fn replace_file(&self, doc: &Document) -> Result<(), StoreError> {
        let data = serde_json::to_vec(doc).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let temp_path = self.temp_path();
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| StoreError::io(&temp_path, e))?;
            file.write_all(&data)
                .map_err(|e| StoreError::io(&temp_path, e))?;
            file.sync_all().map_err(|e| StoreError::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};

    use chirpy_core::error::RepoError;
    use tempfile::TempDir;

    use super::*;

    fn open_temp() -> (TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("database.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_empty_document() {
        let (_dir, store) = open_temp();

        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), Document::default());
    }

    #[test]
    fn test_open_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        fs::write(
            &path,
            r#"{"chirps":{"1":{"id":1,"body":"hello","author_id":1}},"users":{}}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.load().unwrap().chirp(1).map(|c| c.body.as_str()), Some("hello"));
    }

    #[test]
    fn test_load_recreates_deleted_file() {
        let (_dir, store) = open_temp();
        fs::remove_file(store.path()).unwrap();

        assert_eq!(store.load().unwrap(), Document::default());
        assert!(store.path().exists());
    }

    #[test]
    fn test_malformed_file_is_decode_error() {
        let (_dir, store) = open_temp();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = open_temp();
        store
            .write(|doc| {
                doc.insert_chirp("first".to_string(), 1)?;
                doc.insert_user("a@x.com".to_string(), "hash".to_string())?;
                Ok::<_, StoreError>(())
            })
            .unwrap();

        let before = fs::read_to_string(store.path()).unwrap();
        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        assert_eq!(store.load().unwrap(), loaded);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_failed_operation_writes_nothing() {
        let (_dir, store) = open_temp();

        let result: Result<(), RepoError> = store.write(|doc| {
            doc.insert_chirp("discarded".to_string(), 1)?;
            Err(RepoError::Forbidden)
        });

        assert!(matches!(result, Err(RepoError::Forbidden)));
        assert_eq!(store.load().unwrap().chirp_count(), 0);
    }

    #[test]
    fn test_concurrent_writes_do_not_lose_updates() {
        let (_dir, store) = open_temp();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .write(|doc| doc.insert_chirp(format!("c{i}"), i))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load().unwrap().chirp_count(), 16);
    }

    #[test]
    fn test_concurrent_loads_recreate_missing_file() {
        let (_dir, store) = open_temp();
        let store = Arc::new(store);

        for _ in 0..50 {
            fs::remove_file(store.path()).unwrap();
            let barrier = Arc::new(Barrier::new(8));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let store = store.clone();
                    let barrier = barrier.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        store.load()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), Document::default());
            }
            assert!(!store.temp_path().exists());
        }
    }

    #[test]
    fn test_exhausted_sequence_is_reported() {
        let (_dir, store) = open_temp();
        fs::write(
            store.path(),
            format!(r#"{{"chirps":{{}},"users":{{}},"sequences":{{"chirps":{}}}}}"#, i64::MAX),
        )
        .unwrap();

        let result = store.write(|doc| doc.insert_chirp("overflow".to_string(), 1));

        assert!(matches!(result, Err(StoreError::IdsExhausted { collection: "chirps" })));
        assert_eq!(store.load().unwrap().chirp_count(), 0);
    }
}
