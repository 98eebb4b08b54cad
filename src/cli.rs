use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "engine-builders",
    about = "Generate C++ sources embedding engine data: licenses, authors, assets, keys",
    version
)]
pub struct Cli {
    /// Config file [default: ./.engine-builders/config.toml, fallback ~/.config/engine-builders/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show per-step detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print nothing but errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copyright tables and license texts from a Debian copyright manifest
    License {
        out: PathBuf,
        copyright: PathBuf,
        license: PathBuf,
    },
    /// Engine contributors by role
    Authors { out: PathBuf, source: PathBuf },
    /// Fork contributors by role
    RedotAuthors { out: PathBuf, source: PathBuf },
    /// Donors by tier
    Donors { out: PathBuf, source: PathBuf },
    /// Script encryption key, read from the configured environment variable
    EncryptionKey { out: PathBuf },
    /// Compressed TLS certificate bundle
    Certs {
        out: PathBuf,
        bundle: PathBuf,
        /// Embed the bundle in the binary
        builtin: Toggle,
        /// System certificate store path
        system_path: Option<String>,
    },
    /// Commit hash and timestamp of the current git checkout
    VersionHash { out: PathBuf },
    /// Boot splash image
    Splash { out: PathBuf, source: PathBuf },
    /// Editor boot splash image
    SplashEditor { out: PathBuf, source: PathBuf },
    /// Application icon
    AppIcon { out: PathBuf, source: PathBuf },
    /// ICU data file
    IcuData { out: PathBuf, source: PathBuf },
    /// Default theme fonts
    Fonts {
        out: PathBuf,
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
    /// Default theme icons
    ThemeIcons {
        out: PathBuf,
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
    /// A platform's export icon
    ExportIcon { out: PathBuf, source: PathBuf },
    /// Registration of platform scripting APIs
    PlatformApis {
        out: PathBuf,
        #[arg(required = true)]
        platforms: Vec<String>,
    },
    /// Built-in script templates
    Templates {
        out: PathBuf,
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
}

/// Build-system style switch.
#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum Toggle {
    #[value(name = "ON", alias = "on")]
    On,
    #[value(name = "OFF", alias = "off")]
    Off,
}
