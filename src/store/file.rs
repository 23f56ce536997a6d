use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{Storage, StorageError, validate_key};
use crate::config;

/// Stores every key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Storage rooted at the configured data directory.
    pub fn from_env() -> Self {
        let mut root = config::data_dir();
        root.push("storage");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn get_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.get_path(key)?;
        match async_fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.get_path(key)?;
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        // write-then-rename so a crash never leaves a half written document
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, value).await?;
        async_fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.get_path(key)?;
        match async_fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
