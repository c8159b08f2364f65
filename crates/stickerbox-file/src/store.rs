//! On-disk layout and low-level file helpers for the sticker library.

use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;

use stickerbox_core::Result;
use stickerbox_core::error::{Error, InvalidInputError, StorageError};
use stickerbox_core::types::{CollectionId, StickerId, StickerKind};

pub(crate) fn map_io(path: &Path, err: std::io::Error) -> Error {
    Error::Storage(StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

pub(crate) fn map_json(err: serde_json::Error) -> Error {
    Error::Storage(StorageError::Serialization {
        message: err.to_string(),
    })
}

/// Root of a sticker library on disk.
///
/// ```text
/// {root}/stickers/{emote_id}.webp                  image blobs
/// {root}/db/stickers/{static|animated}/{id}.json   sticker records
/// {root}/db/collections/{id}.json                  collections
/// {root}/db/collections.lock                       membership write lock
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn db_dir(&self) -> PathBuf {
        self.root.join("db")
    }

    /// Directory holding the records of one sticker kind.
    pub(crate) fn stickers_dir(&self, kind: StickerKind) -> PathBuf {
        self.db_dir().join("stickers").join(kind.as_str())
    }

    pub(crate) fn sticker_path(&self, kind: StickerKind, id: &StickerId) -> PathBuf {
        self.stickers_dir(kind).join(format!("{}.json", id))
    }

    pub(crate) fn collections_dir(&self) -> PathBuf {
        self.db_dir().join("collections")
    }

    pub(crate) fn collection_path(&self, id: &CollectionId) -> PathBuf {
        self.collections_dir().join(format!("{}.json", id))
    }

    fn collections_lock_path(&self) -> PathBuf {
        self.db_dir().join("collections.lock")
    }

    /// Resolve a relative blob path under the root.
    ///
    /// Absolute paths and paths that climb out of the root are rejected.
    pub(crate) fn blob_path(&self, relative: &str) -> Result<PathBuf> {
        let path = Path::new(relative);
        let safe = !relative.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !safe {
            return Err(InvalidInputError::Other {
                message: format!("invalid blob path '{}'", relative),
            }
            .into());
        }

        Ok(self.root.join(path))
    }

    /// Read and decode a JSON file, or `None` if it does not exist.
    pub(crate) fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| map_io(path, e))?;
        let value = serde_json::from_str(&content).map_err(map_json)?;

        Ok(Some(value))
    }

    /// Encode a value as JSON and replace `path` with it atomically.
    pub(crate) fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_vec_pretty(value).map_err(map_json)?;
        self.write_atomic(path, &content)
    }

    /// Write bytes to a temp file next to `path`, then rename over it.
    pub(crate) fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes).map_err(|e| map_io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| map_io(path, e))?;

        Ok(())
    }

    /// Paths of the `.json` files in `dir`, sorted by file name.
    pub(crate) fn json_entries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| map_io(dir, e))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();

        entries.sort();

        Ok(entries)
    }

    /// Run `f` while holding the exclusive collections lock.
    ///
    /// The lock is advisory and serializes membership writes across
    /// processes sharing the same library.
    pub(crate) fn with_collections_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let lock_path = self.collections_lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;

        FileExt::lock_exclusive(&lock_file).map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;

        let result = f();

        FileExt::unlock(&lock_file).map_err(|e| StorageError::Lock {
            message: e.to_string(),
        })?;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout() {
        let store = FileStore::new("/lib");
        let id = StickerId::new("abc").unwrap();

        assert_eq!(
            store.sticker_path(StickerKind::Animated, &id),
            PathBuf::from("/lib/db/stickers/animated/abc.json")
        );
        assert_eq!(
            store.blob_path("stickers/e1.webp").unwrap(),
            PathBuf::from("/lib/stickers/e1.webp")
        );
    }

    #[test]
    fn blob_path_rejects_escapes() {
        let store = FileStore::new("/lib");

        assert!(store.blob_path("../outside.webp").is_err());
        assert!(store.blob_path("/etc/passwd").is_err());
        assert!(store.blob_path("stickers/../../x").is_err());
        assert!(store.blob_path("").is_err());
    }

    #[test]
    fn json_roundtrip_and_listing() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());
        let dir = tmp.path().join("things");

        store.write_json(&dir.join("b.json"), &vec![2]).unwrap();
        store.write_json(&dir.join("a.json"), &vec![1]).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let entries = store.json_entries(&dir).unwrap();
        assert_eq!(entries, vec![dir.join("a.json"), dir.join("b.json")]);

        let value: Option<Vec<u32>> = store.read_json(&dir.join("a.json")).unwrap();
        assert_eq!(value, Some(vec![1]));

        let missing: Option<Vec<u32>> = store.read_json(&dir.join("zzz.json")).unwrap();
        assert!(missing.is_none());
        assert!(!dir.join("a.tmp").exists());
    }

    #[test]
    fn lock_returns_closure_result() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        let value = store.with_collections_lock(|| Ok(42)).unwrap();
        assert_eq!(value, 42);

        let again = store.with_collections_lock(|| Ok("reentrant after unlock"));
        assert!(again.is_ok());
    }
}
