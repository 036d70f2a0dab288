//! Mirror outcome value object

use serde::Serialize;

/// Counters from one hard-link pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Files hard-linked to the source
    pub files_linked: usize,
    /// Files that could not be linked and were copied instead
    pub files_copied: usize,
    /// Directories created, including the destination root
    pub directories: usize,
}

impl LinkStats {
    pub fn files(&self) -> usize {
        self.files_linked + self.files_copied
    }
}

/// Why a mirror did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Source not built yet
    SourceMissing,
    /// Source is a regular file; only directories are mirrored
    SourceIsFile,
    /// Another process holds the destination lock
    LockHeldElsewhere,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::SourceMissing => "source does not exist (not built yet?)",
            SkipReason::SourceIsFile => "source is a file",
            SkipReason::LockHeldElsewhere => "another process is already syncing it",
        }
    }
}

/// Result of a single mirror call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorOutcome {
    Completed(LinkStats),
    SkippedSourceMissing,
    SkippedSourceIsFile,
    SkippedLockHeldElsewhere,
}

impl MirrorOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, MirrorOutcome::Completed(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            MirrorOutcome::Completed(_) => None,
            MirrorOutcome::SkippedSourceMissing => Some(SkipReason::SourceMissing),
            MirrorOutcome::SkippedSourceIsFile => Some(SkipReason::SourceIsFile),
            MirrorOutcome::SkippedLockHeldElsewhere => Some(SkipReason::LockHeldElsewhere),
        }
    }
}
