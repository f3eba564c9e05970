//! Atomic file write using the write-rename pattern.
//!
//! Writes data to `{path}.tmp`, calls `sync_all()`, then renames the temp
//! file over the final path, so a crash mid-write never leaves a half-written
//! snapshot behind.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically writes `data` to `path`, creating parent directories as needed.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fresh scratch directory per test.
    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wildfire_atomic_write_test_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_atomic_write_creates_and_overwrites() {
        let dir = test_dir("overwrites");
        let path = dir.join("snapshot.bin");

        atomic_write(&path, b"version 1").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"version 1");
        atomic_write(&path, b"version 2").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"version 2");
        assert!(!tmp_path(&path).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = test_dir("parent_dirs");
        let path = dir.join("nested").join("deep").join("snapshot.bin");

        atomic_write(&path, b"nested data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"nested data");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_atomic_write_replaces_stale_tmp() {
        let dir = test_dir("stale_tmp");
        let path = dir.join("snapshot.bin");
        fs::write(&path, b"original").unwrap();
        fs::write(tmp_path(&path), b"partial garbage").unwrap();

        atomic_write(&path, b"new snapshot").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new snapshot");
        assert!(!tmp_path(&path).exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
