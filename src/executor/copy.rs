//! Atomic file copy between two roots

use crate::types::{resolve_rel_path, SyncError};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy `src_root/rel` to `dst_root/rel`, overwriting any existing file
///
/// Steps:
/// 1. Create missing parent directories under `dst_root`
/// 2. Stream content into a sibling temporary file
/// 3. Flush to disk and copy permissions and mtime
/// 4. Rename the temporary file over the destination
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - source missing or destination unwritable
///
/// # Example
/// ```no_run
/// use orcasync::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("/local"), Path::new("/mirror"), "machine/printer.json")?;
/// # Ok::<(), orcasync::types::SyncError>(())
/// ```
pub fn copy_file(src_root: &Path, dst_root: &Path, rel: &str) -> Result<u64, SyncError> {
    let src = resolve_rel_path(src_root, rel);
    let dest = resolve_rel_path(dst_root, rel);
    copy_file_atomic(&src, &dest)
}

/// Copy a single file using the write-then-rename strategy
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }

    let part_path = part_path_for(dest);

    let result = write_part_file(src, &part_path)
        .and_then(|bytes| {
            fs::rename(&part_path, dest).map_err(|e| SyncError::io(dest, e))?;
            Ok(bytes)
        });

    if result.is_err() {
        let _ = fs::remove_file(&part_path);
    }

    result
}

fn write_part_file(src: &Path, part_path: &Path) -> Result<u64, SyncError> {
    let mut src_file = File::open(src).map_err(|e| SyncError::io(src, e))?;
    let mut part_file = File::create(part_path).map_err(|e| SyncError::io(part_path, e))?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file
            .read(&mut buffer)
            .map_err(|e| SyncError::io(src, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        part_file
            .write_all(&buffer[0..bytes_read])
            .map_err(|e| SyncError::io(part_path, e))?;
        total_bytes += bytes_read as u64;
    }

    part_file
        .sync_all()
        .map_err(|e| SyncError::io(part_path, e))?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src).map_err(|e| SyncError::io(src, e))?;

    fs::set_permissions(part_path, src_metadata.permissions())
        .map_err(|e| SyncError::io(part_path, e))?;

    let mtime = src_metadata.modified().map_err(|e| SyncError::io(src, e))?;
    filetime::set_file_mtime(part_path, filetime::FileTime::from_system_time(mtime))
        .map_err(|e| SyncError::io(part_path, e))?;

    Ok(total_bytes)
}

/// Temporary sibling path: `printer.json` → `.printer.json.orcasync-part`
fn part_path_for(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!(".{}.orcasync-part", name))
}
