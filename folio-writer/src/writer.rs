//! Hash-gated atomic writer.
//!
//! For every rendered file:
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 the content.
//! 3. Skip if the stored digest matches and the file is still on disk.
//! 4. Write `<path>.folio.tmp`, then rename over the final path.
//! 5. Record the digest.
//!
//! Files tracked by the store but absent from the new output are removed, so
//! switching themes does not leave stale pages behind. The store is saved
//! once all files are processed.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};

use folio_renderer::OutputFile;

use crate::error::{io_err, WriteError};
use crate::hash_store::{self, HashStore};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome for one output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Content changed or the file did not exist.
    Written { path: PathBuf },
    /// Content matches the stored digest.
    Unchanged { path: PathBuf },
    /// Dry run: the file would have been written.
    WouldWrite { path: PathBuf },
    /// Left over from a previous render and deleted.
    Removed { path: PathBuf },
    /// Dry run: the leftover would have been deleted.
    WouldRemove { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path }
            | WriteResult::Removed { path }
            | WriteResult::WouldRemove { path } => path,
        }
    }

    /// Whether the filesystem was (or in a dry run, would be) touched.
    pub fn is_change(&self) -> bool {
        !matches!(self, WriteResult::Unchanged { .. })
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

fn digest(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

/// Store key for an output-relative path.
fn store_key(relative: &Path) -> String {
    relative.to_string_lossy().replace('\\', "/")
}

fn tmp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.folio.tmp", path.display()))
}

pub(crate) fn atomic_write(
    path: &Path,
    key: String,
    content: &str,
    store: &mut HashStore,
    dry_run: bool,
) -> Result<WriteResult, WriteError> {
    atomic_write_with_tmp(path, key, content, store, dry_run, &tmp_path(path))
}

fn atomic_write_with_tmp(
    path: &Path,
    key: String,
    content: &str,
    store: &mut HashStore,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, WriteError> {
    let normalized = content.replace("\r\n", "\n");
    let hash = digest(&normalized);

    if store.get(&key) == Some(&hash) && path.exists() {
        tracing::debug!(path = %path.display(), "unchanged");
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!(path = %path.display(), "[dry-run] would write");
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, &normalized).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    store.insert(key, hash);
    tracing::info!(path = %path.display(), "wrote");
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

fn remove_stale(
    out_dir: &Path,
    keep: &BTreeSet<String>,
    store: &mut HashStore,
    dry_run: bool,
) -> Result<Vec<WriteResult>, WriteError> {
    let stale: Vec<String> = store.keys().filter(|k| !keep.contains(*k)).cloned().collect();
    let mut results = Vec::new();
    for key in stale {
        // Only ever delete below the output directory.
        if !Path::new(&key).components().all(|c| matches!(c, Component::Normal(_))) {
            tracing::warn!(entry = %key, "ignoring hash store entry outside the output dir");
            store.remove(&key);
            continue;
        }
        let path = out_dir.join(&key);
        if dry_run {
            results.push(WriteResult::WouldRemove { path });
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "removed stale output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(&path, e)),
        }
        store.remove(&key);
        results.push(WriteResult::Removed { path });
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// write_output
// ---------------------------------------------------------------------------

/// Write `files` below `out_dir`, skipping content that has not changed since
/// the last run. In a dry run nothing on disk changes, the hash store included.
pub fn write_output(
    out_dir: &Path,
    files: &[OutputFile],
    dry_run: bool,
) -> Result<Vec<WriteResult>, WriteError> {
    let started_at = Utc::now();
    let mut store = hash_store::load(out_dir)?;

    let mut results = Vec::with_capacity(files.len());
    let mut keep = BTreeSet::new();
    for file in files {
        let key = store_key(&file.path);
        keep.insert(key.clone());
        let path = out_dir.join(&file.path);
        results.push(atomic_write(&path, key, &file.contents, &mut store.files, dry_run)?);
    }
    results.extend(remove_stale(out_dir, &keep, &mut store.files, dry_run)?);

    if !dry_run {
        store.synced_at = started_at;
        hash_store::save(out_dir, &store)?;
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str, store: &mut HashStore) -> WriteResult {
        atomic_write(path, store_key(path), content, store, false).unwrap()
    }

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        let result = write(&path, "<html>", &mut HashStore::new());
        assert!(matches!(result, WriteResult::Written { .. }));
        assert!(path.exists());
        assert!(!tmp_path(&path).exists(), ".folio.tmp must be cleaned up");
    }

    #[test]
    fn same_content_is_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        let mut store = HashStore::new();
        write(&path, "same", &mut store);
        assert!(matches!(write(&path, "same", &mut store), WriteResult::Unchanged { .. }));
        assert!(matches!(write(&path, "other", &mut store), WriteResult::Written { .. }));
    }

    #[test]
    fn deleted_file_is_rewritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        let mut store = HashStore::new();
        write(&path, "page", &mut store);
        fs::remove_file(&path).unwrap();
        assert!(matches!(write(&path, "page", &mut store), WriteResult::Written { .. }));
    }

    #[test]
    fn crlf_and_lf_share_a_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");
        let mut store = HashStore::new();
        write(&path, "a\r\nb\r\n", &mut store);
        assert!(matches!(write(&path, "a\nb\n", &mut store), WriteResult::Unchanged { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn dry_run_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let files = [OutputFile::new("classes/Foo.html", "x")];
        let results = write_output(tmp.path(), &files, true).unwrap();
        assert!(matches!(results[0], WriteResult::WouldWrite { .. }));
        assert!(!tmp.path().join("classes").exists());
        assert!(!hash_store::store_path(tmp.path()).exists());
    }

    #[test]
    fn stale_outputs_are_removed() {
        let tmp = TempDir::new().unwrap();
        write_output(
            tmp.path(),
            &[OutputFile::new("index.html", "a"), OutputFile::new("classes/Foo.html", "b")],
            false,
        )
        .unwrap();

        let files = [OutputFile::new("index.html", "a")];
        let results = write_output(tmp.path(), &files, false).unwrap();
        assert_eq!(
            results,
            [
                WriteResult::Unchanged { path: tmp.path().join("index.html") },
                WriteResult::Removed { path: tmp.path().join("classes/Foo.html") },
            ]
        );
        assert!(!tmp.path().join("classes/Foo.html").exists());
        let store = hash_store::load(tmp.path()).unwrap();
        assert_eq!(store.files.keys().collect::<Vec<_>>(), ["index.html"]);
    }

    #[test]
    fn untracked_files_are_left_alone() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CNAME"), "docs.example.com").unwrap();
        write_output(tmp.path(), &[OutputFile::new("index.html", "a")], false).unwrap();
        assert!(tmp.path().join("CNAME").exists());
    }

    #[test]
    fn rename_failure_keeps_target_and_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory in the way makes the final rename fail.
        let path = root.path().join("index.html");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep"), "original").unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp = tmp_dir.path().join("index.html.folio.tmp");
        let mut store = HashStore::new();
        let result =
            atomic_write_with_tmp(&path, "index.html".into(), "new", &mut store, false, &tmp);
        assert!(matches!(result, Err(WriteError::Io { .. })));

        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "original");
        assert!(!tmp.exists(), ".folio.tmp should be cleaned up");
        assert!(store.is_empty());
    }
}
