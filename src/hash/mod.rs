//! Hashing utilities

use crate::types::SyncError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size of the read buffer used while streaming a file into the hasher
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Compute the Blake3 content fingerprint of a file as lowercase hex
///
/// The file is streamed in 64KB chunks so memory use stays bounded for large
/// files. The digest depends on content only, never on path, mtime or
/// permissions.
///
/// # Arguments
/// * `file_path` - Path to the file to hash
///
/// # Returns
/// * `Ok(String)` - 64-character hex digest
/// * `Err(SyncError)` - IO error (with path) if the file cannot be read
///
/// # Example
/// ```no_run
/// use orcasync::hash::compute_hash;
/// use std::path::Path;
///
/// let digest = compute_hash(Path::new("machine/printer.json"))?;
/// assert_eq!(digest.len(), 64);
/// # Ok::<(), orcasync::types::SyncError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<String, SyncError> {
    let mut file = File::open(file_path).map_err(|e| SyncError::io(file_path, e))?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| SyncError::io(file_path, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
