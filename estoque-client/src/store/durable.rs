// Durable key/value store (no expiry)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::StoreResult;
use super::file::JsonFile;

/// Key the global theme preference lives under
pub const THEME_KEY: &str = "temaGlobal";

#[derive(Debug)]
pub struct DurableStore {
    file: JsonFile,
}

impl DurableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.file.guard();
        let mut entries: BTreeMap<String, String> = self.file.load()?;
        Ok(entries.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.file.guard();
        let mut entries: BTreeMap<String, String> = self.file.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.file.save(&entries)
    }

    /// Raw stored theme token, not validated
    pub fn theme_token(&self) -> StoreResult<Option<String>> {
        self.get(THEME_KEY)
    }

    pub fn set_theme_token(&self, token: &str) -> StoreResult<()> {
        self.set(THEME_KEY, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = DurableStore::new(dir.path().join("nested/preferences.json"));
        assert_eq!(store.theme_token().unwrap(), None);
    }

    #[test]
    fn test_set_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        DurableStore::new(&path).set_theme_token("matrix").unwrap();
        DurableStore::new(&path).set("outra", "chave").unwrap();

        let reopened = DurableStore::new(&path);
        assert_eq!(reopened.theme_token().unwrap().as_deref(), Some("matrix"));
        assert_eq!(reopened.get("outra").unwrap().as_deref(), Some("chave"));
    }

    #[test]
    fn test_write_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"temaGlobal": "cla"#).unwrap();

        let store = DurableStore::new(&path);
        assert_eq!(store.theme_token().unwrap(), None);
        store.set_theme_token("claro").unwrap();
        store.set_theme_token("matrix").unwrap();

        let reopened = DurableStore::new(&path);
        assert_eq!(reopened.theme_token().unwrap().as_deref(), Some("matrix"));
    }
}
