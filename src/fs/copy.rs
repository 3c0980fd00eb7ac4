use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Largest number of bytes handed to a single kernel copy call (30 MiB).
pub const FILE_COPY_CHUNK_SIZE: u64 = 30 * 1024 * 1024;

/// Copy `src` to a new file at `dest`.
///
/// Fails if `src` is missing or is a directory, or if `dest` already
/// exists. The source size is taken once before copying; if the source
/// shrinks meanwhile the copy stops at the first empty chunk and the
/// returned byte count is short.
///
/// On Linux `std::io::copy` between two files uses `copy_file_range`
/// (or `sendfile`), so the data never passes through user space.
///
/// # Returns
///
/// The number of bytes copied.
pub fn copy_file(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    let metadata = fs::metadata(src)
        .with_context(|| format!("Source file not found: {}", src.display()))?;
    if metadata.is_dir() {
        bail!("Source is a directory: {}", src.display());
    }
    if dest.exists() {
        bail!("Destination already exists: {}", dest.display());
    }

    let mut input =
        File::open(src).with_context(|| format!("Cannot open source: {}", src.display()))?;
    // create_new also rejects a destination created after the check above
    let mut output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .with_context(|| format!("Cannot create destination: {}", dest.display()))?;

    let size = input.metadata()?.len();
    let mut pos = 0u64;
    while pos < size {
        let count = (size - pos).min(FILE_COPY_CHUNK_SIZE);
        let copied = io::copy(&mut (&mut input).take(count), &mut output)
            .with_context(|| format!("Copy failed at offset {}: {}", pos, src.display()))?;
        if copied == 0 {
            break;
        }
        pos += copied;
    }

    Ok(pos)
}
