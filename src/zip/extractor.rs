use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use flate2::Crc;
use flate2::read::DeflateDecoder;

use crate::io::{LocalFileReader, ReadAt, SectionReader};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Size of the buffer entry data is streamed through.
pub const COPY_BUFFER_SIZE: usize = 4096;

/// ZIP file extractor
pub struct ZipExtractor<R: ReadAt> {
    parser: ZipParser<R>,
}

impl ZipExtractor<LocalFileReader> {
    /// Open an archive on the local filesystem
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(LocalFileReader::new(path)?))
    }
}

impl<R: ReadAt> ZipExtractor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all files in the archive
    pub fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files()
    }

    /// Decompress an entry into `out`, verifying its size and CRC-32.
    ///
    /// Returns the number of bytes written.
    pub fn extract_to_writer<W: Write>(&self, entry: &ZipFileEntry, out: &mut W) -> Result<u64> {
        if entry.is_encrypted() {
            bail!("Encrypted entries are not supported: {}", entry.file_name);
        }

        let data_offset = self.parser.get_data_offset(entry)?;
        let section = SectionReader::new(self.parser.reader(), data_offset, entry.compressed_size);

        let source: Box<dyn Read + '_> = match entry.compression_method {
            CompressionMethod::Stored => Box::new(section),
            CompressionMethod::Deflate => Box::new(DeflateDecoder::new(section)),
            CompressionMethod::Unknown(_) => bail!(
                "Unsupported compression method {} for {} (only STORED and DEFLATE are supported)",
                entry.compression_method.as_u16(),
                entry.file_name
            ),
        };
        // One byte past the declared size is enough to detect a mismatch
        let mut source = source.take(entry.uncompressed_size.saturating_add(1));

        let mut crc = Crc::new();
        let mut written = 0u64;
        let mut buf = [0u8; COPY_BUFFER_SIZE];
        loop {
            let n = source
                .read(&mut buf)
                .with_context(|| format!("Failed to read entry: {}", entry.file_name))?;
            if n == 0 {
                break;
            }
            crc.update(&buf[..n]);
            out.write_all(&buf[..n])?;
            written += n as u64;
        }

        if written != entry.uncompressed_size {
            bail!(
                "Size mismatch for {}: expected {} bytes, got {}",
                entry.file_name,
                entry.uncompressed_size,
                written
            );
        }
        if crc.sum() != entry.crc32 {
            bail!(
                "CRC-32 mismatch for {}: expected {:08x}, got {:08x}",
                entry.file_name,
                entry.crc32,
                crc.sum()
            );
        }

        Ok(written)
    }

    /// Extract file to disk, creating missing parent directories
    pub fn extract_to_file(&self, entry: &ZipFileEntry, output_path: &Path) -> Result<u64> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create directory: {}", parent.display()))?;
            }
        }

        let file = File::create(output_path)
            .with_context(|| format!("Cannot create file: {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        let written = self.extract_to_writer(entry, &mut writer)?;
        // Dropping a BufWriter discards flush errors
        writer.flush()?;

        Ok(written)
    }

    /// Extract every file entry under `target_dir`.
    ///
    /// Directory entries are skipped; directories only appear when a file
    /// entry needs them. Returns the paths written, in archive order.
    pub fn extract_all(&self, target_dir: &Path) -> Result<Vec<PathBuf>> {
        self.extract_all_with(target_dir, |_, _| {})
    }

    /// Like [`extract_all`](Self::extract_all), calling `on_entry` before
    /// each file is written.
    pub fn extract_all_with<F>(&self, target_dir: &Path, mut on_entry: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&ZipFileEntry, &Path),
    {
        let mut written = Vec::new();
        for entry in self.list_files()? {
            if entry.is_directory {
                continue;
            }
            let output_path = entry_path(target_dir, &entry.file_name)?;
            on_entry(&entry, &output_path);
            self.extract_to_file(&entry, &output_path)?;
            written.push(output_path);
        }
        Ok(written)
    }
}

/// Map an entry name onto a path under `target_dir`.
///
/// Both `/` and `\` separate segments. Empty and `.` segments are dropped;
/// anything that would leave `target_dir` is an error.
pub fn entry_path(target_dir: &Path, name: &str) -> Result<PathBuf> {
    let mut path = target_dir.to_path_buf();
    let mut pushed = false;

    for segment in name.split(['/', '\\']) {
        if segment.is_empty() || segment == "." {
            continue;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => {
                path.push(part);
                pushed = true;
            }
            _ => bail!("Entry escapes the target directory: {}", name),
        }
    }

    if !pushed {
        bail!("Invalid entry name: {:?}", name);
    }
    Ok(path)
}

/// Directory `unzip` extracts into: the archive path without its
/// extension (`site.zip` extracts into `site/`).
pub fn default_target_dir(zip_path: &Path) -> Result<PathBuf> {
    if zip_path.extension().is_none() {
        bail!(
            "Cannot derive a target directory from {}: no extension",
            zip_path.display()
        );
    }
    Ok(zip_path.with_extension(""))
}

/// Extract `zip_path` into a sibling directory named after the archive.
pub fn unzip(zip_path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let zip_path = zip_path.as_ref();
    unzip_to(zip_path, default_target_dir(zip_path)?)
}

/// Extract every file entry of `zip_path` under `target_dir`.
pub fn unzip_to(zip_path: impl AsRef<Path>, target_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    ZipExtractor::open(zip_path.as_ref())?.extract_all(target_dir.as_ref())
}
