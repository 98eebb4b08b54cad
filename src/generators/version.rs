use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;

use crate::emit::{CppWriter, Escaped};
use crate::status::Status;

/// Commit the engine is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GitInfo {
    pub hash: String,
    /// Commit time, seconds since the Unix epoch.
    pub timestamp: u64,
}

impl GitInfo {
    /// Query `git` for the checked-out commit. `None` outside a repository or
    /// when git is unavailable.
    pub fn from_repo(repo: &Path) -> Option<Self> {
        let hash = git(repo, &["rev-parse", "HEAD"])?;
        let timestamp = git(repo, &["log", "-1", "--format=%ct", "HEAD"])?
            .parse()
            .ok()?;
        Some(GitInfo { hash, timestamp })
    }
}

fn git(repo: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git").arg("-C").arg(repo).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

pub struct VersionHashGenerator {
    repo: PathBuf,
}

impl VersionHashGenerator {
    pub fn new(repo: PathBuf) -> Self {
        Self { repo }
    }
}

impl super::Generator for VersionHashGenerator {
    fn name(&self) -> &'static str {
        "version-hash"
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let info = GitInfo::from_repo(&self.repo).unwrap_or_else(|| {
            status.warn(format!(
                "no git metadata in {}, version hash left empty",
                self.repo.display()
            ));
            GitInfo::default()
        });
        write_version(out, &info)
    }
}

pub fn write_version(out: &mut CppWriter, info: &GitInfo) -> Result<()> {
    writeln!(
        out,
        "#include \"core/version.h\"\n\n\
         const char *const REDOT_VERSION_HASH = \"{}\";\n\
         const uint64_t REDOT_VERSION_TIMESTAMP = {};",
        Escaped(&info.hash),
        info.timestamp
    )?;
    Ok(())
}
