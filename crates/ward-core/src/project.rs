//! Project root discovery.

use std::path::{Path, PathBuf};

/// Environment variable that supplies the project root directly,
/// bypassing the upward search.
pub const PROJECT_DIR_ENV: &str = "WARD_PROJECT_DIR";

/// Configuration anchor directory that marks a ward-managed project.
pub const CONFIG_ANCHOR: &str = ".ward";

/// Version-control anchor directory.
pub const VCS_ANCHOR: &str = ".git";

/// No directory containing both anchors exists above the starting point.
#[derive(Debug, thiserror::Error)]
#[error(
    "could not find project root (no directory with both .git and .ward above {})",
    start.display()
)]
pub struct ProjectRootError {
    /// Directory the upward walk started from.
    pub start: PathBuf,
}

/// Read the project-root override from the environment, if set.
pub fn project_root_override() -> Option<PathBuf> {
    std::env::var_os(PROJECT_DIR_ENV).map(PathBuf::from)
}

/// Locate the project root for `start`.
///
/// An explicit `override_root` wins verbatim. Otherwise walk upward from
/// `start` until a directory containing both [`VCS_ANCHOR`] and
/// [`CONFIG_ANCHOR`] is found.
pub fn find_project_root(
    start: &Path,
    override_root: Option<PathBuf>,
) -> Result<PathBuf, ProjectRootError> {
    if let Some(root) = override_root {
        return Ok(root);
    }

    let mut current = start;
    loop {
        if current.join(VCS_ANCHOR).exists() && current.join(CONFIG_ANCHOR).exists() {
            return Ok(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => {
                return Err(ProjectRootError {
                    start: start.to_path_buf(),
                })
            }
        }
    }
}
