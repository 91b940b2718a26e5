//! ward-archive: Move files into a project quarantine instead of deleting them.

mod mover;

pub use mover::{
    ArchiveError, ArchiveMover, MoveOutcome, MoveSummary, TargetKind, ARCHIVE_DIR_NAME,
    IGNORE_MARKER,
};
