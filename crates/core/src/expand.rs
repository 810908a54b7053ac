//! Input expansion
//!
//! Turns the command-line arguments into a concrete list of files. Each
//! argument is classified on its own; the first bad argument aborts the
//! whole expansion.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ExpandError;
use crate::fetch::is_url;

/// What a single command-line argument refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Url,
    Directory,
    Glob,
    Literal,
}

impl InputKind {
    /// Classify an argument
    ///
    /// URLs are recognised by scheme, directories by the filesystem, globs by
    /// the presence of `*` or `?`. Anything else is a literal path.
    pub fn of(arg: &str) -> Self {
        if is_url(arg) {
            InputKind::Url
        } else if Path::new(arg).is_dir() {
            InputKind::Directory
        } else if is_glob(arg) {
            InputKind::Glob
        } else {
            InputKind::Literal
        }
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Expand local patterns into files, dropping duplicates
pub fn expand(patterns: &[String], recursive: bool) -> Result<Vec<PathBuf>, ExpandError> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let matched = match InputKind::of(pattern) {
            InputKind::Directory if !recursive => {
                return Err(ExpandError::IsDirectory(pattern.clone()));
            }
            InputKind::Directory => walk_directory(pattern)?,
            InputKind::Glob => expand_glob(pattern)?,
            InputKind::Literal | InputKind::Url => {
                let path = PathBuf::from(pattern);
                if !path.exists() {
                    return Err(ExpandError::NotFound(pattern.clone()));
                }
                vec![path]
            }
        };

        tracing::debug!(pattern = %pattern, count = matched.len(), "Expanded input");

        for path in matched {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(ExpandError::NoFiles);
    }

    Ok(files)
}

/// Every regular file under `dir`, in traversal order
///
/// Symlinks are not followed into directories, but links pointing at files
/// are kept.
fn walk_directory(dir: &str) -> Result<Vec<PathBuf>, ExpandError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| ExpandError::Walk {
            path: dir.to_string(),
            reason: e.to_string(),
        })?;

        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, ExpandError> {
    let paths = glob::glob(pattern).map_err(|e| ExpandError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut matched = 0usize;
    let mut files = Vec::new();
    for path in paths {
        let path = path.map_err(|e| ExpandError::Walk {
            path: e.path().display().to_string(),
            reason: e.error().to_string(),
        })?;
        matched += 1;
        if path.is_file() {
            files.push(path);
        }
    }

    if matched == 0 {
        return Err(ExpandError::NoMatch(pattern.to_string()));
    }

    Ok(files)
}
