//! # cmsfs
//!
//! Filesystem helpers for a web content-management application.
//!
//! ## Features
//!
//! - File suffix extraction and web-root relative paths
//! - File copy in bounded chunks, using kernel copies where available
//! - Whole-file text read/write in a configured encoding
//! - Zip extraction (STORED and DEFLATE, ZIP64), with CRC-32 checks
//!
//! Every operation returns [`anyhow::Result`]; nothing is swallowed, so an
//! empty file can always be told apart from a failure.
//!
//! ## Example
//!
//! ```no_run
//! use cmsfs::{FsConfig, copy_file, get_suffix, unzip};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = FsConfig::with_label("/var/www/site", "utf-8")?;
//!
//!     assert_eq!(get_suffix("theme.zip"), Some(".zip"));
//!     unzip("/var/www/site/templates/theme.zip")?;
//!
//!     copy_file("/var/www/site/logo.png", "/var/www/site/logo-old.png")?;
//!     let body = config.read_string("/var/www/site/templates/theme/index.html")?;
//!     println!("{}", config.remove_root_path("/var/www/site/templates/theme"));
//!     println!("{} bytes", body.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod fs;
pub mod io;
pub mod zip;

#[cfg(test)]
mod testutil;

pub use cli::Cli;
pub use config::FsConfig;
pub use fs::{copy_file, get_suffix, read_string, remove_prefix, remove_root_path, write_string};
pub use io::{LocalFileReader, ReadAt};
pub use zip::{ZipExtractor, ZipFileEntry, unzip, unzip_to};
