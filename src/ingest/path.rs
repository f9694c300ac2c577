//! Mailbox and folder names derived from a message's location.
//!
//! The corpus follows `root/<name>/<category>/<file>`. Deeper trees still
//! resolve positionally from the end of the path, so
//! `root/alice/inbox/2001/msg` yields name `inbox` and category `2001`.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Components required below the corpus root: name, category and file.
pub const MIN_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetadata {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "{} is {depth} level(s) below the corpus root, expected at least 3",
        .path.display()
    )]
    TooShallow { path: PathBuf, depth: usize },
    #[error("{} is not inside the corpus root {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Resolve `name` and `category` for a file below `root`.
pub fn resolve(root: &Path, path: &Path) -> Result<PathMetadata, LayoutError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| LayoutError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let depth = segments.len();
    if depth < MIN_DEPTH {
        return Err(LayoutError::TooShallow {
            path: path.to_path_buf(),
            depth,
        });
    }

    Ok(PathMetadata {
        name: segments[depth - 3].clone(),
        category: segments[depth - 2].clone(),
    })
}
