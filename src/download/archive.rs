//! Zip payload expansion

use crate::mirror::MirrorWriter;
use crate::MirrorError;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Whether a file name denotes a zip archive (case-insensitive `.zip` suffix)
pub fn is_archive_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".zip")
}

/// Expands a zip payload into `dest`
///
/// Members keep their relative layout. Every member path is claimed through
/// `writer`, so a member named like a file already written in this run lands
/// next to it as `name (2).ext` instead of replacing it. Entries whose path
/// would escape `dest` are skipped.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths of the extracted files
/// * `Err(MirrorError)` - The payload is not a readable archive, or writing failed
pub fn unpack_zip(
    body: &[u8],
    dest: &Path,
    writer: &mut MirrorWriter,
) -> Result<Vec<PathBuf>, MirrorError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(body))?;
    let mut extracted = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let out_path = match entry.enclosed_name() {
            Some(name) => dest.join(name),
            None => {
                tracing::warn!("Skipping archive entry with unsafe path: {}", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }

        let (Some(parent), Some(file_name)) = (out_path.parent(), out_path.file_name()) else {
            continue;
        };
        std::fs::create_dir_all(parent)?;
        let out_path = writer.claim_file_path(parent, &file_name.to_string_lossy());

        let mut out_file = std::fs::File::create(&out_path)?;
        std::io::copy(&mut entry, &mut out_file)?;
        tracing::debug!("Extracted {}", out_path.display());
        extracted.push(out_path);
    }

    Ok(extracted)
}
