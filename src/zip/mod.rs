//! ZIP archive parsing and extraction.
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`extractor`]: Extraction API, including [`unzip`] and [`unzip_to`]
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! ## Supported Features
//!
//! - STORED and DEFLATE entries, verified against their CRC-32
//! - ZIP64 extensions for files > 4GB
//! - Archive comments
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod extractor;
mod parser;
mod structures;

pub use extractor::{
    COPY_BUFFER_SIZE, ZipExtractor, default_target_dir, entry_path, unzip, unzip_to,
};
pub use parser::ZipParser;
pub use structures::*;
