//! Main entry point for the cmsfs CLI application.
//!
//! A thin driver over the library: each subcommand maps onto one helper.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::Path;

use cmsfs::cli::Command;
use cmsfs::zip::default_target_dir;
use cmsfs::{Cli, FsConfig, ZipExtractor, copy_file, get_suffix};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let web_root = match &cli.web_root {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };
    let config = FsConfig::with_label(web_root, &cli.encoding)?;

    match &cli.command {
        Command::Suffix { name } => {
            if let Some(suffix) = get_suffix(name) {
                println!("{}", suffix);
            }
        }
        Command::Relative { path } => println!("{}", config.remove_root_path(path)),
        Command::Copy { src, dest } => {
            let copied = copy_file(src, dest)?;
            if !cli.is_quiet() {
                println!(
                    "  copied: {} -> {} ({})",
                    src.display(),
                    dest.display(),
                    format_size(copied)
                );
            }
        }
        Command::Cat { file } => {
            let text = config.read_string(file)?;
            std::io::stdout().write_all(text.as_bytes())?;
        }
        Command::Write { file, text } => {
            let text = match text {
                Some(text) => text.clone(),
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            config.write_string(file, &text)?;
        }
        Command::Unzip { zip, extract_dir } => {
            let target_dir = match extract_dir {
                Some(dir) => dir.clone(),
                None => default_target_dir(zip).context("Use -d to choose a directory")?,
            };
            unzip_verbose(zip, &target_dir, &cli)?;
        }
        Command::List { zip, verbose } => {
            let extractor = ZipExtractor::open(zip)?;
            list_files(&extractor, *verbose)?;
        }
    }

    Ok(())
}

/// [`cmsfs::unzip_to`] with a line per extracted entry unless quiet.
fn unzip_verbose(zip: &Path, target_dir: &Path, cli: &Cli) -> Result<()> {
    let extractor = ZipExtractor::open(zip)?;

    if !cli.is_very_quiet() {
        println!("Archive:  {}", zip.display());
    }

    extractor.extract_all_with(target_dir, |entry, _| {
        if !cli.is_quiet() {
            println!("  extracting: {}", entry.file_name);
        }
    })?;

    Ok(())
}

/// List files in the ZIP archive.
///
/// Supports two output formats:
/// - Simple format: Just file names, one per line
/// - Verbose format (`-v`): Detailed table with size, compression ratio, and timestamps
fn list_files<R: cmsfs::ReadAt>(extractor: &ZipExtractor<R>, verbose: bool) -> Result<()> {
    let entries = extractor.list_files()?;

    if verbose {
        println!(
            "{:>10}  {:>10}  {:>5}  {:>10}  {:>5}  Name",
            "Length", "Size", "Cmpr", "Date", "Time"
        );
        println!("{}", "-".repeat(70));
    }

    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;
    let mut file_count = 0usize;

    for entry in &entries {
        if !verbose {
            println!("{}", entry.file_name);
            continue;
        }

        let (year, month, day) = entry.mod_date();
        let (hour, minute, _second) = entry.mod_time();

        println!(
            "{:>10}  {:>10}  {}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            entry.uncompressed_size,
            entry.compressed_size,
            ratio(entry.compressed_size, entry.uncompressed_size),
            year,
            month,
            day,
            hour,
            minute,
            entry.file_name
        );

        if !entry.is_directory {
            total_uncompressed = total_uncompressed.saturating_add(entry.uncompressed_size);
            total_compressed = total_compressed.saturating_add(entry.compressed_size);
            file_count += 1;
        }
    }

    if verbose {
        println!("{}", "-".repeat(70));
        println!(
            "{:>10}  {:>10}  {}  {:>21}  {} files",
            total_uncompressed,
            total_compressed,
            ratio(total_compressed, total_uncompressed),
            "",
            file_count
        );
    }

    Ok(())
}

/// Percentage saved by compression, right-aligned to five columns.
fn ratio(compressed: u64, uncompressed: u64) -> String {
    if uncompressed > 0 && compressed <= uncompressed {
        // u128 so ZIP64 sizes cannot overflow the multiplication
        let kept = compressed as u128 * 100 / uncompressed as u128;
        format!("{:>4}%", 100 - kept)
    } else {
        "   0%".to_string()
    }
}

/// Format a byte size into a human-readable string.
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
