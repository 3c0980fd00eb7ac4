use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;

/// Read the whole file at `path` and decode it with `encoding`.
///
/// Malformed input is an error, not replacement characters. A byte order
/// mark is kept as ordinary content.
pub fn read_string(path: impl AsRef<Path>, encoding: &'static Encoding) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;

    match encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => Ok(text.into_owned()),
        None => bail!("{} is not valid {}", path.display(), encoding.name()),
    }
}

/// Create or truncate `path` and write `text` encoded with `encoding`.
///
/// Nothing is written if `text` has characters `encoding` cannot represent.
pub fn write_string(path: impl AsRef<Path>, text: &str, encoding: &'static Encoding) -> Result<()> {
    let path = path.as_ref();
    let (bytes, used, unmappable) = encoding.encode(text);
    if unmappable || used != encoding {
        bail!(
            "Text cannot be represented in {}: {}",
            encoding.name(),
            path.display()
        );
    }

    fs::write(path, &bytes).with_context(|| format!("Cannot write {}", path.display()))
}
