use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cmsfs")]
#[command(version)]
#[command(about = "Filesystem helpers for web content management", long_about = None)]
#[command(after_help = "Examples:\n  \
  cmsfs unzip theme.zip              extract theme.zip into ./theme\n  \
  cmsfs copy logo.png logo-old.png   copy a file, refusing to overwrite\n  \
  cmsfs --encoding gbk cat post.txt  print a GBK-encoded file")]
pub struct Cli {
    /// Web-root directory stripped by `relative`
    #[arg(long, global = true, env = "CMSFS_WEB_ROOT", value_name = "DIR")]
    pub web_root: Option<PathBuf>,

    /// Text encoding for `cat` and `write` (WHATWG label)
    #[arg(
        long,
        global = true,
        env = "CMSFS_ENCODING",
        default_value = "UTF-8",
        value_name = "LABEL"
    )]
    pub encoding: String,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the suffix of a file name, including the dot
    Suffix { name: String },

    /// Print a path relative to the web root
    Relative { path: String },

    /// Copy a file; the destination must not exist
    Copy { src: PathBuf, dest: PathBuf },

    /// Print a text file decoded with the configured encoding
    Cat { file: PathBuf },

    /// Overwrite a text file with TEXT (or stdin) in the configured encoding
    Write { file: PathBuf, text: Option<String> },

    /// Extract a ZIP archive
    Unzip {
        /// ZIP file path
        #[arg(value_name = "FILE")]
        zip: PathBuf,

        /// Extract files into exdir (default: archive path without extension)
        #[arg(short = 'd', value_name = "DIR")]
        extract_dir: Option<PathBuf>,
    },

    /// List the entries of a ZIP archive
    List {
        /// ZIP file path
        #[arg(value_name = "FILE")]
        zip: PathBuf,

        /// List verbosely
        #[arg(short = 'v')]
        verbose: bool,
    },
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }
}
