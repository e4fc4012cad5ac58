//! Key/bytes storage backends

use parking_lot::Mutex;
use rwcheck_core::Result;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Durable key -> bytes storage
pub trait SnapshotBackend {
    /// Read the record for `key`, `None` if there is none
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the record for `key`
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Stores each key as a file in one directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SnapshotBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.tmp", key));

        // Write then rename so an interrupted run never leaves a torn record.
        std::fs::write(&tmp, bytes)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-process backend, nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.lock().get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.records.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
