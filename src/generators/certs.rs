use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::emit::{CppWriter, Escaped};
use crate::status::Status;

/// Embeds the TLS certificate bundle, zlib-compressed.
pub struct CertsGenerator {
    bundle: PathBuf,
    builtin: bool,
    system_path: Option<String>,
}

impl CertsGenerator {
    /// `system_path` is the distribution's certificate store, preferred by the
    /// editor when set. The bundle is only embedded when `builtin` is on.
    pub fn new(bundle: PathBuf, builtin: bool, system_path: Option<String>) -> Self {
        Self {
            bundle,
            builtin,
            system_path,
        }
    }
}

impl super::Generator for CertsGenerator {
    fn name(&self) -> &'static str {
        "certs"
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let data = super::read_bytes(&self.bundle)?;
        let system_path = self.system_path.as_deref().unwrap_or_default();
        writeln!(out, "#define _SYSTEM_CERTS_PATH \"{}\"", Escaped(system_path))?;

        if !self.builtin {
            return Ok(());
        }

        let compressed = compress(&data)?;
        status.detail(format!(
            "certificates: {} bytes, {} compressed",
            data.len(),
            compressed.len()
        ));

        let bytes = out.bytes(&compressed, 1);
        writeln!(
            out,
            "#define BUILTIN_CERTS_ENABLED\n\n\
             inline constexpr int _certs_compressed_size = {};\n\
             inline constexpr int _certs_uncompressed_size = {};\n\
             inline constexpr unsigned char _certs_compressed[] = {{\n\t{bytes}\n}};",
            compressed.len(),
            data.len()
        )?;
        Ok(())
    }
}

/// zlib stream at the best compression level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
