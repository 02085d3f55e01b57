use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{KvStorage, StorageError};

const KV_FILE_NAME: &str = "kv.toml";
const KV_FILE_VERSION: u32 = 1;

/// Configuration for file-backed key/value storage.
#[derive(Debug, Clone)]
pub struct KvStorageConfig {
    pub base_dir: PathBuf,
}

impl KvStorageConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

/// Key/value store persisted as a single TOML file.
///
/// Every write rewrites the whole file into a sibling temp file and renames
/// it into place, so readers see either the old or the new contents. The
/// store is meant for a handful of session values, not bulk data.
///
/// # Example
/// ```no_run
/// use peptide::storage::{FileKvStorage, KvStorage, KvStorageConfig};
///
/// let store = FileKvStorage::new(KvStorageConfig::new("/tmp/peptide".into()));
/// store.set("sessionToken", "token")?;
/// # Ok::<(), peptide::storage::StorageError>(())
/// ```
#[derive(Debug)]
pub struct FileKvStorage {
    path: PathBuf,
    // Serializes reads and read-modify-write cycles within the process.
    lock: Mutex<()>,
}

impl FileKvStorage {
    pub fn new(config: KvStorageConfig) -> Self {
        Self {
            path: config.base_dir.join(KV_FILE_NAME),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<KvFile, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(KvFile::default())
            }
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };
        Ok(toml::from_str(&raw)?)
    }

    fn write_file(&self, mut file: KvFile) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        file.version = KV_FILE_VERSION;
        file.saved_at = Some(Utc::now());
        let serialized = toml::to_string(&file)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(serialized.as_bytes())?;
        tmp.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file().set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        tmp.persist(&self.path)
            .map_err(|err| StorageError::Io(err.error.to_string()))?;
        Ok(())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.lock
            .lock()
            .map_err(|_| StorageError::Io("storage lock poisoned".to_string()))
    }

    fn modify(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        let mut file = self.read_file()?;
        apply(&mut file.values);
        self.write_file(file)
    }
}

impl KvStorage for FileKvStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard()?;
        Ok(self.read_file()?.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.modify(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.modify(|values| {
            values.remove(key);
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KvFile {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    values: BTreeMap<String, String>,
}
