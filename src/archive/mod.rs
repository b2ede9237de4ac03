//! Zip archive construction for changepack.
//!
//! Entries are written strictly in the order they are given. Directory
//! entries become empty, uncompressed nodes whose names end in `/`; file
//! entries are streamed from disk with the configured compression.
//!
//! The first failure aborts the build. Entries written before the failure
//! stay in the archive and nothing is written twice. The archive writer and
//! each source file are closed on every exit path.

use crate::changeset::{EntryKind, PathEntry};
use crate::config::Compression;
use crate::error::{ChangepackError, Result};
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime as ZipDateTime, ZipWriter};


/// Entries above this size need zip64 headers.
const LARGE_FILE_THRESHOLD: u64 = u32::MAX as u64;

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub directories: usize,
    pub files: usize,
    /// Uncompressed bytes copied into the archive.
    pub bytes: u64,
}

impl From<Compression> for CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

/// Write `entries` into a zip archive at `output`, naming each entry
/// relative to `base_dir`.
///
/// `on_entry` is called with the archive-relative name of every entry as it
/// is added.
///
/// # Returns
///
/// * `Ok(ArchiveSummary)` - All entries were written and the archive closed
/// * `Err(ChangepackError::Archive)` - Create, stat, header, or copy failure
pub fn build_archive<F>(
    output: &Path,
    base_dir: &Path,
    entries: &[PathEntry],
    compression: Compression,
    mut on_entry: F,
) -> Result<ArchiveSummary>
where
    F: FnMut(&str),
{
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ChangepackError::Archive(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(output).map_err(|e| {
        ChangepackError::Archive(format!(
            "failed to create '{}': {}",
            output.display(),
            e
        ))
    })?;
    let mut zip = ZipWriter::new(file);
    let mut summary = ArchiveSummary::default();

    for entry in entries {
        let name = entry.archive_name(base_dir)?;
        match entry.kind {
            EntryKind::Directory => {
                add_directory(&mut zip, &name)?;
                summary.directories += 1;
            }
            EntryKind::File => {
                summary.bytes += add_file(&mut zip, &entry.path, &name, compression)?;
                summary.files += 1;
            }
        }
        on_entry(&name);
    }

    zip.finish().map_err(|e| {
        ChangepackError::Archive(format!(
            "failed to finalize '{}': {}",
            output.display(),
            e
        ))
    })?;

    debug!(
        output = %output.display(),
        directories = summary.directories,
        files = summary.files,
        bytes = summary.bytes,
        "archive written"
    );
    Ok(summary)
}

fn add_directory(zip: &mut ZipWriter<File>, name: &str) -> Result<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.add_directory(name, options).map_err(|e| {
        ChangepackError::Archive(format!("failed to add directory '{}': {}", name, e))
    })
}

/// Stream one file into the archive, returning the number of bytes copied.
fn add_file(
    zip: &mut ZipWriter<File>,
    path: &Path,
    name: &str,
    compression: Compression,
) -> Result<u64> {
    let metadata = fs::metadata(path).map_err(|e| {
        ChangepackError::Archive(format!("failed to stat '{}': {}", path.display(), e))
    })?;
    // Directories and submodule checkouts show up as changed paths too.
    if !metadata.is_file() {
        return Err(ChangepackError::Archive(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    let mut source = File::open(path).map_err(|e| {
        ChangepackError::Archive(format!("failed to open '{}': {}", path.display(), e))
    })?;

    zip.start_file(name, file_options(&metadata, compression))
        .map_err(|e| {
            ChangepackError::Archive(format!("failed to write header for '{}': {}", name, e))
        })?;

    match io::copy(&mut source, &mut *zip) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            // Drop the half-written entry so the archive holds only complete files.
            if let Err(abort) = zip.abort_file() {
                debug!(name, error = %abort, "failed to discard partial entry");
            }
            Err(ChangepackError::Archive(format!(
                "failed to write '{}' to archive: {}",
                name, e
            )))
        }
    }
}

fn file_options(metadata: &Metadata, compression: Compression) -> SimpleFileOptions {
    let mut options = SimpleFileOptions::default()
        .compression_method(compression.into())
        .large_file(metadata.len() >= LARGE_FILE_THRESHOLD);

    if let Some(modified) = modified_time(metadata) {
        options = options.last_modified_time(modified);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options = options.unix_permissions(metadata.permissions().mode());
    }

    options
}

/// File modification time in local time, if it fits the zip date range.
fn modified_time(metadata: &Metadata) -> Option<ZipDateTime> {
    let modified: DateTime<Local> = metadata.modified().ok()?.into();
    to_zip_datetime(&modified)
}

fn to_zip_datetime(time: &DateTime<Local>) -> Option<ZipDateTime> {
    ZipDateTime::from_date_and_time(
        u16::try_from(time.year()).ok()?,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .ok()
}
