//! Directory Mirror
//!
//! Replaces a destination directory with a hard-linked copy of a source
//! directory while holding that destination's sync lock.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::entities::SyncMapping;
use crate::domain::ports::{LockAttempt, SyncEvent, SyncEventSink, SyncLock};
use crate::domain::value_objects::MirrorOutcome;
use crate::error::{DepsyncError, DepsyncResult};
use crate::infrastructure::{hard_link_dir, same_directory, FileSyncLock};

/// One mirror operation: `source` becomes the content of `destination`.
pub trait Mirror: Send + Sync {
    fn mirror(&self, source: &Path, destination: &Path) -> DepsyncResult<MirrorOutcome>;
}

/// Lock-guarded, full-replace directory mirror.
#[derive(Debug, Clone, Default)]
pub struct DirectoryMirror<L: SyncLock = FileSyncLock> {
    lock: L,
}

impl DirectoryMirror<FileSyncLock> {
    /// Mirror guarded by `<destination>.lock` files.
    pub fn with_file_locks() -> Self {
        Self::new(FileSyncLock::new())
    }
}

impl<L: SyncLock> DirectoryMirror<L> {
    pub fn new(lock: L) -> Self {
        Self { lock }
    }
}

impl<L: SyncLock> Mirror for DirectoryMirror<L> {
    fn mirror(&self, source: &Path, destination: &Path) -> DepsyncResult<MirrorOutcome> {
        let io_err = |e: io::Error| DepsyncError::MirrorIo {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        };

        let metadata = match fs::metadata(source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    source = %source.display(),
                    "source does not exist, did you forget to build the library?"
                );
                return Ok(MirrorOutcome::SkippedSourceMissing);
            }
            Err(e) => return Err(io_err(e)),
        };

        if !metadata.is_dir() {
            return Ok(MirrorOutcome::SkippedSourceIsFile);
        }

        if same_directory(source, destination) {
            return Err(DepsyncError::SelfSync {
                path: source.to_path_buf(),
            });
        }

        let handle = match self.lock.try_acquire(destination).map_err(io_err)? {
            LockAttempt::Acquired(handle) => handle,
            LockAttempt::Busy => {
                tracing::debug!(
                    destination = %destination.display(),
                    "another process is already syncing this directory, skipping"
                );
                return Ok(MirrorOutcome::SkippedLockHeldElsewhere);
            }
        };

        remove_existing(destination).map_err(io_err)?;
        tracing::debug!(destination = %destination.display(), "removed before syncing");

        // Walk the real directory so a symlinked source root is mirrored by content.
        let walk_root = source.canonicalize().map_err(io_err)?;
        let stats = hard_link_dir(&walk_root, destination).map_err(io_err)?;
        tracing::debug!(
            source = %source.display(),
            destination = %destination.display(),
            files = stats.files(),
            "synced"
        );

        if let Err(e) = handle.release() {
            tracing::warn!(destination = %destination.display(), error = %e, "failed to clean up sync lock");
        }

        Ok(MirrorOutcome::Completed(stats))
    }
}

fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Mirror one mapping and report the result to `events`.
pub fn mirror_mapping<M: Mirror + ?Sized>(
    mirror: &M,
    mapping: &SyncMapping,
    events: &dyn SyncEventSink,
) -> DepsyncResult<MirrorOutcome> {
    let result = mirror.mirror(&mapping.source, &mapping.destination);

    let event = match &result {
        Ok(MirrorOutcome::Completed(stats)) => Some(SyncEvent::MirrorCompleted {
            package: mapping.package.clone(),
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
            files_linked: stats.files_linked,
            files_copied: stats.files_copied,
        }),
        Ok(skipped) => skipped.skip_reason().map(|reason| SyncEvent::MirrorSkipped {
            package: mapping.package.clone(),
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
            reason,
        }),
        Err(err) => Some(SyncEvent::MirrorFailed {
            package: mapping.package.clone(),
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
            error: err.to_string(),
        }),
    };
    if let Some(event) = event {
        events.on_event(event);
    }

    result
}
