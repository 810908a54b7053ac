//! Archive building
//!
//! Bundles resolved files into one deflate-compressed zip. Entry names come
//! from the display name of downloaded files, the path relative to the base
//! directory when paths are preserved, or the plain file name.

use std::fs::{File, Metadata};
use std::io;
use std::path::{Component, Path};

use tempfile::TempPath;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};
use crate::upload::ResolvedFile;

/// Entries at or above this size need zip64 headers
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Name a file will have inside the archive
pub fn entry_name(file: &ResolvedFile, preserve_path: bool, base_dir: Option<&Path>) -> String {
    if let Some(name) = &file.display_name {
        return name.clone();
    }

    if preserve_path
        && let Some(base) = base_dir
        && let Some(relative) = relative_to(&file.path, base)
    {
        return relative;
    }

    base_name(&file.path)
}

pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `path` relative to `base` with `/` separators
///
/// Tries the paths as given first, then their absolute forms.
fn relative_to(path: &Path, base: &Path) -> Option<String> {
    let relative = match path.strip_prefix(base) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => {
            let path = std::path::absolute(path).ok()?;
            let base = std::path::absolute(base).ok()?;
            path.strip_prefix(&base).ok()?.to_path_buf()
        }
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            _ => return None,
        }
    }

    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Write `files` into a new temporary zip and return its path
pub fn build_archive(
    files: &[ResolvedFile],
    preserve_path: bool,
    base_dir: Option<&Path>,
) -> Result<TempPath> {
    build_archive_in(&std::env::temp_dir(), files, preserve_path, base_dir)
}

fn build_archive_in(
    temp_dir: &Path,
    files: &[ResolvedFile],
    preserve_path: bool,
    base_dir: Option<&Path>,
) -> Result<TempPath> {
    let mut temp = tempfile::Builder::new()
        .prefix("file-share-")
        .suffix(".zip")
        .tempfile_in(temp_dir)
        .map_err(|e| Error::Build(e.to_string()))?;

    match write_entries(temp.as_file_mut(), files, preserve_path, base_dir) {
        Ok(()) => {
            tracing::debug!(path = %temp.path().display(), entries = files.len(), "Archive written");
            Ok(temp.into_temp_path())
        }
        Err(reason) => {
            if let Err(e) = temp.close() {
                tracing::warn!(error = %e, "Failed to remove partial archive");
            }
            Err(Error::Build(reason))
        }
    }
}

fn write_entries(
    out: &mut File,
    files: &[ResolvedFile],
    preserve_path: bool,
    base_dir: Option<&Path>,
) -> std::result::Result<(), String> {
    let mut zip = ZipWriter::new(out);

    for file in files {
        let name = entry_name(file, preserve_path, base_dir);
        let context = |e: String| format!("{}: {e}", file.path.display());

        let mut source = File::open(&file.path).map_err(|e| context(e.to_string()))?;
        let metadata = source.metadata().map_err(|e| context(e.to_string()))?;
        let size = metadata.len();

        let mut options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(permissions(&metadata))
            .large_file(size >= ZIP64_THRESHOLD);
        if let Some(modified) = modified_time(&metadata) {
            options = options.last_modified_time(modified);
        }

        zip.start_file(name.as_str(), options)
            .map_err(|e| context(e.to_string()))?;
        io::copy(&mut source, &mut zip).map_err(|e| context(e.to_string()))?;

        tracing::debug!(entry = %name, bytes = size, "Added archive entry");
    }

    zip.finish().map_err(|e| e.to_string())?;
    Ok(())
}

/// Permission bits of the source file
#[cfg(unix)]
fn permissions(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permissions(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Source modification time as local civil time
///
/// `None` when the time is unavailable or outside the zip range (1980-2107).
fn modified_time(metadata: &Metadata) -> Option<DateTime> {
    let modified = metadata.modified().ok()?;
    let local = jiff::Timestamp::try_from(modified)
        .ok()?
        .to_zoned(jiff::tz::TimeZone::system())
        .datetime();

    DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::try_from(local.month()).ok()?,
        u8::try_from(local.day()).ok()?,
        u8::try_from(local.hour()).ok()?,
        u8::try_from(local.minute()).ok()?,
        u8::try_from(local.second()).ok()?,
    )
    .ok()
}
