use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use encoding_rs::Encoding;

use crate::fs;

/// Settings the helpers would otherwise read from the hosting application:
/// its web-root directory and its text encoding.
#[derive(Debug, Clone)]
pub struct FsConfig {
    web_root: PathBuf,
    encoding: &'static Encoding,
}

impl FsConfig {
    pub fn new(web_root: impl Into<PathBuf>, encoding: &'static Encoding) -> Self {
        Self {
            web_root: web_root.into(),
            encoding,
        }
    }

    /// Build a config from a WHATWG encoding label such as `utf-8` or `gbk`.
    ///
    /// Encodings that cannot be written (UTF-16, `replacement`) are rejected.
    pub fn with_label(web_root: impl Into<PathBuf>, label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding: {}", label))?;
        if encoding.output_encoding() != encoding {
            bail!("Encoding {} cannot be used for writing", encoding.name());
        }
        Ok(Self::new(web_root, encoding))
    }

    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn remove_root_path<'a>(&self, s: &'a str) -> &'a str {
        fs::remove_root_path(s, &self.web_root)
    }

    pub fn read_string(&self, path: impl AsRef<Path>) -> Result<String> {
        fs::read_string(path, self.encoding)
    }

    pub fn write_string(&self, path: impl AsRef<Path>, text: &str) -> Result<()> {
        fs::write_string(path, text, self.encoding)
    }
}
