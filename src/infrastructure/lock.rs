//! File-backed sync locks
//!
//! Each destination gets a sibling `<destination>.lock` file holding an
//! exclusive `fs2` advisory lock. The kernel drops the lock when the holder
//! exits, so a crashed process never leaves a destination locked.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::ports::{LockAttempt, LockHandle, SyncLock};

/// Attempts before giving up when the lock file is swapped underneath us.
const MAX_REOPEN_ATTEMPTS: usize = 3;

/// `SyncLock` implementation using lock files next to each destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSyncLock;

impl FileSyncLock {
    pub fn new() -> Self {
        Self
    }

    /// Lock file path for a destination directory.
    pub fn lock_path(resource: &Path) -> PathBuf {
        let mut name = resource
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("root"));
        name.push(".lock");
        resource.with_file_name(name)
    }
}

impl SyncLock for FileSyncLock {
    fn try_acquire(&self, resource: &Path) -> io::Result<LockAttempt> {
        let path = Self::lock_path(resource);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        for _ in 0..MAX_REOPEN_ATTEMPTS {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&path)?;

            if let Err(e) = file.try_lock_exclusive() {
                if is_contended(&e) {
                    tracing::debug!(lock = %path.display(), "lock held by another process");
                    return Ok(LockAttempt::Busy);
                }
                return Err(e);
            }

            // A releasing holder may have unlinked the file between our open
            // and our lock; the inode we hold would then be orphaned.
            if !still_linked(&file, &path)? {
                let _ = FileExt::unlock(&file);
                continue;
            }

            file.set_len(0)?;
            write!(file, "{}", std::process::id())?;

            tracing::debug!(lock = %path.display(), "lock acquired");
            return Ok(LockAttempt::Acquired(Box::new(FileLockHandle {
                file: Some(file),
                path,
            })));
        }

        Ok(LockAttempt::Busy)
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(unix)]
fn still_linked(file: &File, path: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let held = file.metadata()?;
    match fs::metadata(path) {
        Ok(current) => Ok(held.dev() == current.dev() && held.ino() == current.ino()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(not(unix))]
fn still_linked(_file: &File, path: &Path) -> io::Result<bool> {
    Ok(path.exists())
}

/// A held destination lock. Removing the lock file happens before unlocking
/// so a waiter that opened the old file detects the swap.
struct FileLockHandle {
    file: Option<File>,
    path: PathBuf,
}

impl FileLockHandle {
    fn release_inner(&mut self) -> io::Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };

        let removed = match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        };
        let unlocked = FileExt::unlock(&file);
        tracing::debug!(lock = %self.path.display(), "lock released");

        removed.and(unlocked)
    }
}

impl LockHandle for FileLockHandle {
    fn release(mut self: Box<Self>) -> io::Result<()> {
        self.release_inner()
    }
}

impl Drop for FileLockHandle {
    fn drop(&mut self) {
        let _ = self.release_inner();
    }
}
