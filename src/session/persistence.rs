//! String key-value storage for stats, the archive and saved games.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::chess_errors::{ChessError, ChessResult};

pub const STATS_KEY: &str = "chessStats";
pub const ARCHIVE_KEY: &str = "chessGameHistory";

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> ChessResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ChessResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ChessResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ChessResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per entry under a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn open(root: impl AsRef<Path>) -> ChessResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> ChessResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ChessError::InvalidSetting(format!("bad storage key '{key}'")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> ChessResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ChessResult<()> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(STATS_KEY).expect("get"), None);
        store.set(STATS_KEY, "{}").expect("set");
        assert_eq!(store.get(STATS_KEY).expect("get").as_deref(), Some("{}"));
        store.set(STATS_KEY, "{\"wins\":1}").expect("overwrite");
        assert_eq!(
            store.get(STATS_KEY).expect("get").as_deref(),
            Some("{\"wins\":1}")
        );
    }

    #[test]
    fn directory_store_writes_one_file_per_key() {
        let dir = std::env::temp_dir().join(format!("brain_chess_store_{}", std::process::id()));
        let mut store = DirectoryStore::open(&dir).expect("open");
        store.set(ARCHIVE_KEY, "[]").expect("set");
        assert!(dir.join("chessGameHistory.json").exists());
        assert_eq!(store.get(ARCHIVE_KEY).expect("get").as_deref(), Some("[]"));
        assert_eq!(store.get(STATS_KEY).expect("get"), None);

        let reopened = DirectoryStore::open(&dir).expect("reopen");
        assert_eq!(reopened.get(ARCHIVE_KEY).expect("get").as_deref(), Some("[]"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn directory_store_rejects_path_like_keys() {
        let dir = std::env::temp_dir().join(format!("brain_chess_keys_{}", std::process::id()));
        let store = DirectoryStore::open(&dir).expect("open");
        assert!(store.get("../escape").is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
