use std::fmt::Write;

use anyhow::{bail, Result};

use crate::emit::cpp::identifier;
use crate::emit::CppWriter;
use crate::status::Status;

/// Registration hooks for every enabled platform's scripting API.
pub struct PlatformApisGenerator {
    platforms: Vec<String>,
}

impl PlatformApisGenerator {
    pub fn new(platforms: Vec<String>) -> Self {
        Self { platforms }
    }
}

impl super::Generator for PlatformApisGenerator {
    fn name(&self) -> &'static str {
        "platform-apis"
    }

    fn generate(&self, out: &mut CppWriter, _status: &Status) -> Result<()> {
        for platform in &self.platforms {
            // Names are pasted into include paths and function names.
            if identifier(platform)? != *platform {
                bail!("invalid platform name `{platform}`");
            }
        }

        writeln!(out, "#include \"register_platform_apis.h\"\n")?;
        for platform in &self.platforms {
            writeln!(out, "#include \"{platform}/api/api.h\"")?;
        }

        writeln!(out, "\nvoid register_platform_apis() {{")?;
        for platform in &self.platforms {
            writeln!(out, "\tregister_{platform}_api();")?;
        }
        writeln!(out, "}}\n\nvoid unregister_platform_apis() {{")?;
        for platform in &self.platforms {
            writeln!(out, "\tunregister_{platform}_api();")?;
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}
