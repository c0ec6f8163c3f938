use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::core::{Candidate, ExcludeConfig};

/// Depth-first traversal of a project tree that prunes excluded directories
/// before descending and yields files in a reproducible order.
pub struct TreeWalker<'a> {
    root: PathBuf,
    config: &'a ExcludeConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a ExcludeConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Files of a directory come before its subdirectories, each group sorted
    /// by name.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by(files_first)
            .into_iter()
            .filter_entry(|e| should_descend(e, self.config))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Could not read directory entry: {e}");
                    None
                }
            })
            .filter(is_file_like)
            .filter_map(move |entry| self.candidate(&entry))
    }

    fn candidate(&self, entry: &DirEntry) -> Option<Candidate> {
        let relative = entry.path().strip_prefix(&self.root).ok()?;

        Some(Candidate {
            path: entry.path().to_path_buf(),
            relative_path: to_posix(relative),
            file_name: entry.file_name().to_string_lossy().into_owned(),
        })
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn should_descend(entry: &DirEntry, config: &ExcludeConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    !config.is_excluded_dir(&entry.file_name().to_string_lossy())
}

fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Joins path components with `/` regardless of the host separator.
pub fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
