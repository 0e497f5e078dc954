//! Single-entry zip archives for services that want a compressed upload.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::errors::{ReleaseError, Result};

/// Compress `source` into `dest` as a single entry named after the source
/// file, using maximum deflate compression. The source is streamed, never
/// read fully into memory. Returns `dest`.
pub fn zip_single(source: &Path, dest: &Path) -> Result<PathBuf> {
    let entry_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ReleaseError::NotAFile(source.to_path_buf()))?;

    if dest == source {
        return Err(ReleaseError::io(
            dest,
            io::Error::new(io::ErrorKind::InvalidInput, "archive would overwrite its source"),
        ));
    }

    info!(source = %source.display(), dest = %dest.display(), "Compressing");

    let input = File::open(source).map_err(|e| ReleaseError::io(source, e))?;
    let output = File::create(dest).map_err(|e| ReleaseError::io(dest, e))?;

    let mut zip = ZipWriter::new(BufWriter::new(output));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .large_file(true);
    zip.start_file(entry_name, options)?;
    io::copy(&mut BufReader::new(input), &mut zip).map_err(|e| ReleaseError::io(source, e))?;
    zip.finish()?;

    Ok(dest.to_path_buf())
}

/// `<dir>/<stem>.zip` next to the given file, or `<dir>/<name>.zip` when the
/// file is already a zip.
pub fn sibling_zip_path(source: &Path) -> PathBuf {
    let is_zip = source
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if !is_zip {
        return source.with_extension("zip");
    }
    let mut name = source.file_name().map(OsString::from).unwrap_or_default();
    name.push(".zip");
    source.with_file_name(name)
}

/// Best-effort removal of a temporary archive.
pub fn remove_archive(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "Removed temporary archive"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Could not remove temporary archive"),
    }
}
