//! Quarantine-directory management and per-target move logic.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Name of the quarantine directory kept at the project root.
pub const ARCHIVE_DIR_NAME: &str = ".deleted";

/// Ignore-marker file written inside the quarantine directory so archived
/// content stays out of version control.
pub const IGNORE_MARKER: &str = ".gitignore";

const IGNORE_MARKER_CONTENTS: &str = "*\n!.gitignore\n";

/// Errors from moving a single target.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// I/O error while archiving a target
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether a moved target was a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Directory,
}

/// What happened to one archival target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target was archived under the quarantine directory.
    Moved {
        kind: TargetKind,
        /// Location relative to the project root, mirrored under `.deleted/`.
        relative: PathBuf,
    },
    /// Target does not exist.
    SkippedMissing,
    /// Target lies outside the project root, so it has no mirror location.
    SkippedOutsideRoot,
}

/// Running totals for one archival batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MoveSummary {
    /// Targets archived.
    pub moved: usize,
    /// Targets skipped or failed.
    pub skipped: usize,
}

impl MoveSummary {
    /// Fold one outcome into the totals.
    pub fn record(&mut self, outcome: &MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { .. } => self.moved += 1,
            MoveOutcome::SkippedMissing | MoveOutcome::SkippedOutsideRoot => self.skipped += 1,
        }
    }

    /// Count a target whose move failed outright.
    pub fn record_failure(&mut self) {
        self.skipped += 1;
    }
}

/// Moves targets into `<project_root>/.deleted/`, preserving each
/// target's path relative to the project root.
#[derive(Debug, Clone)]
pub struct ArchiveMover {
    project_root: PathBuf,
}

impl ArchiveMover {
    /// Create a mover rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// The project root this mover archives into.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The quarantine directory.
    pub fn archive_dir(&self) -> PathBuf {
        self.project_root.join(ARCHIVE_DIR_NAME)
    }

    /// Create the quarantine directory and its ignore marker if absent.
    /// Idempotent: an existing marker is left untouched.
    pub async fn ensure_ignore_marker(&self) -> Result<(), ArchiveError> {
        let dir = self.archive_dir();
        fs::create_dir_all(&dir).await?;

        let marker = dir.join(IGNORE_MARKER);
        if !fs::try_exists(&marker).await? {
            fs::write(&marker, IGNORE_MARKER_CONTENTS).await?;
        }
        Ok(())
    }

    /// Archive one target. Relative targets resolve against `cwd`.
    ///
    /// Directories are copied into place and then removed, so the move
    /// survives crossing filesystems; files are renamed over any existing
    /// archived copy. A missing or out-of-root target is a skip, not an
    /// error.
    pub async fn move_target(
        &self,
        target: &Path,
        cwd: &Path,
    ) -> Result<MoveOutcome, ArchiveError> {
        let absolute = absolutize(target, cwd);

        let metadata = match fs::symlink_metadata(&absolute).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(MoveOutcome::SkippedMissing)
            }
            Err(err) => return Err(err.into()),
        };

        let relative = match absolute.strip_prefix(&self.project_root) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => return Ok(MoveOutcome::SkippedOutsideRoot),
        };

        self.ensure_ignore_marker().await?;
        let dest = self.archive_dir().join(&relative);

        if metadata.is_dir() {
            remove_existing(&dest).await?;
            copy_dir_tree(&absolute, &dest).await?;
            fs::remove_dir_all(&absolute).await?;
            tracing::debug!(path = %relative.display(), "archived directory");
            Ok(MoveOutcome::Moved {
                kind: TargetKind::Directory,
                relative,
            })
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::rename(&absolute, &dest).await?;
            tracing::debug!(path = %relative.display(), "archived file");
            Ok(MoveOutcome::Moved {
                kind: TargetKind::File,
                relative,
            })
        }
    }
}

/// Resolve `path` against `cwd` and normalize `.`/`..` components
/// lexically, without touching the filesystem.
fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::RootDir => out.push(component.as_os_str()),
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::Normal(seg) => out.push(seg),
        }
    }
    out
}

/// Remove whatever currently occupies `path`, if anything.
async fn remove_existing(path: &Path) -> std::io::Result<()> {
    match fs::symlink_metadata(path).await {
        Ok(existing) if existing.is_dir() => fs::remove_dir_all(path).await,
        Ok(_) => fs::remove_file(path).await,
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

// Worklist instead of recursion; async fns cannot self-recurse without boxing.
async fn copy_dir_tree(src: &Path, dest: &Path) -> std::io::Result<()> {
    let mut pending = vec![(src.to_path_buf(), dest.to_path_buf())];

    while let Some((src_dir, dest_dir)) = pending.pop() {
        fs::create_dir_all(&dest_dir).await?;

        let mut entries = fs::read_dir(&src_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let from = entry.path();
            let to = dest_dir.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                pending.push((from, to));
            } else {
                fs::copy(&from, &to).await?;
            }
        }
    }
    Ok(())
}
