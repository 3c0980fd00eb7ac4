//! Path, copy and text helpers.

mod copy;
mod path;
mod text;

pub use copy::{FILE_COPY_CHUNK_SIZE, copy_file};
pub use path::{get_suffix, remove_prefix, remove_root_path};
pub use text::{read_string, write_string};
