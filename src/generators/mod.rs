//! One module per generator family. Each generator reads its inputs and
//! renders a file body into a [`CppWriter`]; `main` wraps and writes it.

use std::path::Path;

use anyhow::{Context, Result};

use crate::emit::CppWriter;
use crate::status::Status;

pub mod authors;
pub mod certs;
pub mod embed;
pub mod encryption;
pub mod license;
pub mod platform;
pub mod templates;
pub mod version;

pub trait Generator {
    /// Name shown when generation fails.
    fn name(&self) -> &'static str;

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()>;
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// The file name without its extension.
fn file_stem(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))
}
