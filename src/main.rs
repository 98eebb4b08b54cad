//! `engine-builders` — generate the C++ sources that embed engine data.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load output config ([`config::load_config`]).
//! 3. Pick the generator for the subcommand ([`generators`]).
//! 4. Render its body into a [`emit::CppWriter`], which adds the banner
//!    and header guard and escapes literals as they are written.
//! 5. Write the file and report it on stderr ([`status`]).

mod cli;
mod config;
mod emit;
mod generators;
mod manifest;
mod models;
mod status;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command, Toggle};
use config::load_config;
use emit::CppWriter;
use generators::authors::{Roster, RosterGenerator};
use generators::certs::CertsGenerator;
use generators::embed::{
    BlobGenerator, BlobKind, ExportIconGenerator, FontsGenerator, ThemeIconsGenerator,
};
use generators::encryption::EncryptionKeyGenerator;
use generators::license::LicenseGenerator;
use generators::platform::PlatformApisGenerator;
use generators::templates::TemplatesGenerator;
use generators::version::VersionHashGenerator;
use generators::Generator;
use status::Status;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let status = Status::new(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir().context("failed to resolve the working directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let (out, generator): (PathBuf, Box<dyn Generator>) = match cli.command {
        Command::License {
            out,
            copyright,
            license,
        } => (out, Box::new(LicenseGenerator::new(copyright, license))),
        Command::Authors { out, source } => {
            (out, Box::new(RosterGenerator::new(Roster::Authors, source)))
        }
        Command::RedotAuthors { out, source } => (
            out,
            Box::new(RosterGenerator::new(Roster::RedotAuthors, source)),
        ),
        Command::Donors { out, source } => {
            (out, Box::new(RosterGenerator::new(Roster::Donors, source)))
        }
        Command::EncryptionKey { out } => {
            let key_env = config.encryption.key_env.clone();
            let key = std::env::var(&key_env).ok();
            (out, Box::new(EncryptionKeyGenerator::new(key, key_env)))
        }
        Command::Certs {
            out,
            bundle,
            builtin,
            system_path,
        } => (
            out,
            Box::new(CertsGenerator::new(bundle, builtin == Toggle::On, system_path)),
        ),
        Command::VersionHash { out } => (out, Box::new(VersionHashGenerator::new(cwd.clone()))),
        Command::Splash { out, source } => {
            (out, Box::new(BlobGenerator::new(BlobKind::Splash, source)))
        }
        Command::SplashEditor { out, source } => (
            out,
            Box::new(BlobGenerator::new(BlobKind::SplashEditor, source)),
        ),
        Command::AppIcon { out, source } => {
            (out, Box::new(BlobGenerator::new(BlobKind::AppIcon, source)))
        }
        Command::IcuData { out, source } => {
            (out, Box::new(BlobGenerator::new(BlobKind::IcuData, source)))
        }
        Command::Fonts { out, sources } => (out, Box::new(FontsGenerator::new(sources))),
        Command::ThemeIcons { out, sources } => {
            (out, Box::new(ThemeIconsGenerator::new(sources)))
        }
        Command::ExportIcon { out, source } => (out, Box::new(ExportIconGenerator::new(source))),
        Command::PlatformApis { out, platforms } => {
            (out, Box::new(PlatformApisGenerator::new(platforms)))
        }
        Command::Templates { out, sources } => (out, Box::new(TemplatesGenerator::new(sources))),
    };

    let mut writer = CppWriter::new(&config.output);
    generator
        .generate(&mut writer, &status)
        .with_context(|| format!("{} generator failed", generator.name()))?;

    let contents = writer.finish(&out);
    fs::write(&out, &contents).with_context(|| format!("failed to write {}", out.display()))?;
    status.wrote(&out, contents.len());

    Ok(())
}
