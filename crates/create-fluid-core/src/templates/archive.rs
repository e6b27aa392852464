//! Zip packing and extraction for template sources
//!
//! Remote templates arrive as GitHub archives (`<repo>-<ref>/...`); local
//! templates are packed into the same layout so both go through [`extract`].

use std::io::{self, Cursor, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Extract an archive into `dest`, overwriting existing files
///
/// The archive's top-level directory is stripped. With `subdir`, only
/// entries below that path are written (relative to it). Entries whose path
/// would escape `dest` are skipped. Returns the number of files written.
pub fn extract(bytes: &[u8], subdir: Option<&str>, dest: &Path) -> io::Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(io::Error::other)?;
    let subdir = subdir.map(PathBuf::from);
    let mut written = 0;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(io::Error::other)?;

        let Some(enclosed) = file.enclosed_name() else {
            debug!(entry = file.name(), "Skipping archive entry outside the extraction root");
            continue;
        };

        // Strip the archive's top-level directory
        let mut components = enclosed.components();
        components.next();
        let relative = components.as_path();

        let relative = match &subdir {
            Some(prefix) => match relative.strip_prefix(prefix) {
                Ok(rest) => rest,
                Err(_) => continue,
            },
            None => relative,
        };

        if relative.as_os_str().is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            continue;
        }

        let target = dest.join(relative);
        if file.is_dir() {
            std::fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = std::fs::File::create(&target)?;
        io::copy(&mut file, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&target, std::fs::Permissions::from_mode(mode & 0o777))?;
        }

        written += 1;
    }

    Ok(written)
}

/// Pack a directory into an in-memory zip under a single top-level directory
pub fn pack_dir(source: &Path, top_level: &str) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::other)?;
            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(io::Error::other)?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let zip_path = format!("{}/{}", top_level, name);

            if entry.file_type().is_dir() {
                zip.add_directory(zip_path, options)
                    .map_err(io::Error::other)?;
            } else if entry.file_type().is_file() {
                let content = std::fs::read(entry.path())?;
                zip.start_file(zip_path, options)
                    .map_err(io::Error::other)?;
                zip.write_all(&content)?;
            }
        }

        zip.finish().map_err(io::Error::other)?;
    }
    Ok(buffer)
}
