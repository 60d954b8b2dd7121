//! File-backed store.
//!
//! One file per key under a root directory. Keys are percent-encoded into
//! file names so any key string maps to its own valid file. Writes land in a
//! temp sibling first and are renamed into place, so a crashed write never
//! leaves a half-written entry at the key.

use crate::store::Store;
use cellar_core::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const ENTRY_SUFFIX: &str = ".json";
const TMP_SUFFIX: &str = ".json.tmp";

/// Store keeping each entry in its own file.
///
/// Entries survive process restarts, which makes this the backend behind
/// `Cellar::open`. A missing entry file reads as an absent key; every other
/// I/O failure surfaces as [`StoreError::Io`].
///
/// # Example
///
/// ```ignore
/// use cellar_storage::{FileStore, Store};
///
/// let store = FileStore::open("./state")?;
/// store.set("name", "\"Rick\"")?;
/// assert_eq!(store.get("name")?.as_deref(), Some("\"Rick\""));
/// ```
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!("file store opened at {}", root.display());
        Ok(Self { root })
    }

    /// Root directory holding the entry files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", encode_file_name(key), ENTRY_SUFFIX))
    }

    fn tmp_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}{}", encode_file_name(key), TMP_SUFFIX))
    }
}

/// Percent-encode a key into a file name.
///
/// ASCII letters, digits, `.`, `_` and `-` pass through; every other byte
/// becomes `%XX`. `%` itself is always encoded, so distinct keys never
/// collide on one file.
fn encode_file_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                name.push(byte as char);
            }
            _ => name.push_str(&format!("%{:02X}", byte)),
        }
    }
    name
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&self, key: &str, text: &str) -> Result<(), StoreError> {
        let tmp = self.tmp_path(key);
        fs::write(&tmp, text)?;
        fs::rename(&tmp, self.entry_path(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("state").join("cells");

        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.root(), nested.as_path());
    }

    #[test]
    fn test_open_over_regular_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("occupied");
        fs::write(&path, b"not a directory").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_get_absent_returns_none() {
        let (_dir, store) = setup();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, store) = setup();
        store.set("name", "\"Rick\"").unwrap();
        assert_eq!(store.get("name").unwrap().as_deref(), Some("\"Rick\""));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = setup();
        store.set("counter", "1").unwrap();
        store.set("counter", "2").unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("name", "\"Rick\"").unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("name").unwrap().as_deref(), Some("\"Rick\""));
    }

    #[test]
    fn test_remove() {
        let (_dir, store) = setup();
        store.set("temp", "1").unwrap();

        assert!(store.remove("temp").unwrap());
        assert!(store.get("temp").unwrap().is_none());
        assert!(!store.remove("temp").unwrap());
    }

    #[test]
    fn test_special_characters_in_key() {
        let (_dir, store) = setup();
        let key = "cell/with:special@chars and spaces";

        store.set(key, "42").unwrap();
        assert_eq!(store.get(key).unwrap().as_deref(), Some("42"));
        assert!(store.remove(key).unwrap());
    }

    #[test]
    fn test_unicode_key() {
        let (_dir, store) = setup();
        store.set("caf\u{e9}", "\"crema\"").unwrap();
        assert_eq!(store.get("caf\u{e9}").unwrap().as_deref(), Some("\"crema\""));
    }

    #[test]
    fn test_empty_key_is_a_valid_key() {
        let (_dir, store) = setup();
        store.set("", "null").unwrap();
        assert_eq!(store.get("").unwrap().as_deref(), Some("null"));
    }

    #[test]
    fn test_similar_keys_never_collide() {
        let (_dir, store) = setup();

        // "a/b" encodes the slash; "a%2Fb" encodes its own percent sign
        store.set("a/b", "1").unwrap();
        store.set("a%2Fb", "2").unwrap();

        assert_eq!(store.get("a/b").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("a%2Fb").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_no_tmp_file_left_after_set() {
        let (dir, store) = setup();
        store.set("key", "1").unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "stray tmp files: {:?}", leftovers);
    }

    #[test]
    fn test_encode_file_name_passthrough_and_escape() {
        assert_eq!(encode_file_name("plain-key_1.2"), "plain-key_1.2");
        assert_eq!(encode_file_name("a/b"), "a%2Fb");
        assert_eq!(encode_file_name("a%2Fb"), "a%252Fb");
        assert_eq!(encode_file_name(""), "");
    }
}
