use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

/// Status lines on stderr, honoring `--verbose` and `--quiet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Status {
    verbose: bool,
    quiet: bool,
}

impl Status {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Status { verbose, quiet }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Report a generated file.
    pub fn wrote(&self, path: &Path, bytes: usize) {
        if !self.quiet {
            eprintln!(
                "  {} wrote {} ({} bytes)",
                "→".cyan(),
                path.display(),
                bytes
            );
        }
    }

    /// Per-step detail, shown only with `--verbose`.
    pub fn detail(&self, msg: impl Display) {
        if self.is_verbose() {
            eprintln!("  {} {}", "·".dimmed(), msg);
        }
    }

    pub fn warn(&self, msg: impl Display) {
        if !self.quiet {
            eprintln!("  {} {}", "⚠".yellow(), msg);
        }
    }
}
