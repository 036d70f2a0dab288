//! Hard-linked directory mirror
//!
//! Recreates the directory structure of a source tree at a destination and
//! links every file into it. Files keep sharing storage with the source, so
//! the mirror costs one directory entry per file regardless of size.

use std::fs;
use std::io;
use std::path::Path;

use ignore::WalkBuilder;

use crate::domain::value_objects::LinkStats;

/// Directory names never mirrored.
const SKIPPED_DIRS: &[&str] = &["node_modules"];

enum Placed {
    Linked,
    Copied,
    Vanished,
}

/// Mirror `source` into `destination` using hard links.
///
/// `destination` must not exist or be empty; it is created (with parents)
/// even when `source` is empty. Files that disappear from the source while
/// walking are skipped. A file that cannot be hard-linked (for example across
/// devices) is copied instead.
pub fn hard_link_dir(source: &Path, destination: &Path) -> io::Result<LinkStats> {
    let mut stats = LinkStats::default();

    fs::create_dir_all(destination)?;
    stats.directories += 1;

    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name))
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => match err.into_io_error() {
                Some(io_err) if io_err.kind() == io::ErrorKind::NotFound => continue,
                Some(io_err) => return Err(io_err),
                None => return Err(io::Error::other("failed to walk source directory")),
            },
        };

        if entry.depth() == 0 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let target = destination.join(relative);

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            match fs::create_dir(&target) {
                Ok(()) => stats.directories += 1,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e),
            }
            continue;
        }

        match link_or_copy(entry.path(), &target)? {
            Placed::Linked => stats.files_linked += 1,
            Placed::Copied => stats.files_copied += 1,
            Placed::Vanished => {}
        }
    }

    Ok(stats)
}

fn link_or_copy(source: &Path, target: &Path) -> io::Result<Placed> {
    match fs::hard_link(source, target) {
        Ok(()) => Ok(Placed::Linked),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(Placed::Linked),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if fs::symlink_metadata(source).is_err() {
                return Ok(Placed::Vanished);
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::hard_link(source, target).map(|()| Placed::Linked)
        }
        Err(link_err) => {
            tracing::debug!(
                source = %source.display(),
                error = %link_err,
                "hard link failed, copying instead"
            );
            copy_atomic(source, target).map(|()| Placed::Copied)
        }
    }
}

/// Copy through a temp file in the target directory, then rename into place.
fn copy_atomic(source: &Path, target: &Path) -> io::Result<()> {
    let parent = target
        .parent()
        .ok_or_else(|| io::Error::other("copy target has no parent directory"))?;

    let mut reader = fs::File::open(source)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    tmp.as_file()
        .set_permissions(reader.metadata()?.permissions())?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
