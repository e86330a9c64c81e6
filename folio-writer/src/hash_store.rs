//! Hash store: SHA-256 digests of the files written by the last render.
//!
//! Lives at `<out>/.folio/hashes.json`, keyed by output-relative path with
//! `/` separators. Saved with the same `.tmp` + rename pattern as the pages.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, WriteError};

/// Relative output path -> hex digest.
pub type HashStore = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashStoreFile {
    pub synced_at: DateTime<Utc>,
    #[serde(default)]
    pub files: HashStore,
}

impl HashStoreFile {
    fn empty() -> Self {
        Self {
            synced_at: Utc::now(),
            files: HashStore::new(),
        }
    }
}

/// `<out>/.folio/hashes.json`
pub fn store_path(out_dir: &Path) -> PathBuf {
    out_dir.join(".folio").join("hashes.json")
}

/// Load the store for `out_dir`; empty if none has been saved yet.
pub fn load(out_dir: &Path) -> Result<HashStoreFile, WriteError> {
    let path = store_path(out_dir);
    if !path.exists() {
        return Ok(HashStoreFile::empty());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save(out_dir: &Path, store: &HashStoreFile) -> Result<(), WriteError> {
    let path = store_path(out_dir);
    let Some(dir) = path.parent() else {
        return Err(io_err(path, std::io::Error::other("invalid hash store path")));
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let json = serde_json::to_string_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}
