//! Change-set resolution for changepack.
//!
//! Turns the raw `git diff-tree --name-only` text into an ordered list of
//! archive entries rooted at a base directory:
//! - Empty lines are dropped, so a trailing newline is harmless
//! - Every directory between the base and a file is emitted once, outermost
//!   first, before the first file that lives in it
//! - Repeated change records collapse into a single file entry

use crate::error::{ChangepackError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

#[cfg(test)]
mod tests;

/// Whether an entry is a synthesized directory or a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A resolved, absolute path destined for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub kind: EntryKind,
    /// Absolute filesystem path (base directory joined with the record).
    pub path: PathBuf,
}

impl PathEntry {
    pub fn directory(path: PathBuf) -> Self {
        Self {
            kind: EntryKind::Directory,
            path,
        }
    }

    pub fn file(path: PathBuf) -> Self {
        Self {
            kind: EntryKind::File,
            path,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Name of this entry inside the archive.
    ///
    /// The base directory prefix is removed and the remaining components are
    /// joined with `/`. Directory names end with `/`.
    pub fn archive_name(&self, base_dir: &Path) -> Result<String> {
        let relative = self.path.strip_prefix(base_dir).map_err(|_| {
            ChangepackError::Archive(format!(
                "'{}' is not inside '{}'",
                self.path.display(),
                base_dir.display()
            ))
        })?;

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            return Err(ChangepackError::Archive(format!(
                "'{}' has no name relative to '{}'",
                self.path.display(),
                base_dir.display()
            )));
        }

        let mut name = parts.join("/");
        if self.is_dir() {
            name.push('/');
        }
        Ok(name)
    }
}

/// Split raw change text into repository-relative records.
pub fn parse_change_records(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve raw change text against `base_dir`.
///
/// Returns an empty list when there are no change records.
pub fn resolve(raw: &str, base_dir: &Path) -> Vec<PathEntry> {
    resolve_records(&parse_change_records(raw), base_dir)
}

/// Resolve already-parsed change records against `base_dir`.
pub fn resolve_records<S: AsRef<str>>(records: &[S], base_dir: &Path) -> Vec<PathEntry> {
    let mut entries = Vec::new();
    let mut seen_dirs: HashSet<PathBuf> = HashSet::new();
    let mut seen_files: HashSet<PathBuf> = HashSet::new();

    for record in records {
        let file_path = base_dir.join(record.as_ref());
        if !seen_files.insert(file_path.clone()) {
            continue;
        }

        // Ancestors come innermost first; collect until the base, then reverse.
        let mut pending: Vec<PathBuf> = Vec::new();
        for ancestor in file_path.ancestors().skip(1) {
            if ancestor == base_dir || !ancestor.starts_with(base_dir) {
                break;
            }
            if seen_dirs.contains(ancestor) {
                break;
            }
            pending.push(ancestor.to_path_buf());
        }

        for dir in pending.into_iter().rev() {
            seen_dirs.insert(dir.clone());
            entries.push(PathEntry::directory(dir));
        }
        entries.push(PathEntry::file(file_path));
    }

    entries
}

/// Compile exclude patterns into a matcher.
pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            ChangepackError::Config(format!("invalid exclude pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ChangepackError::Config(format!("failed to build exclude patterns: {}", e)))
}

/// Drop records matching any exclude pattern.
pub fn filter_excluded(records: Vec<String>, excludes: &GlobSet) -> Vec<String> {
    if excludes.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| !excludes.is_match(record))
        .collect()
}
