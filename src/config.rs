use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.engine-builders/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Layout of the generated C++ files.
    #[serde(default)]
    pub output: OutputConfig,
    /// Where the script encryption key comes from.
    #[serde(default)]
    pub encryption: EncryptionConfig,
}

/// Controls how generated files are laid out.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Largest raw string literal, in bytes, before text is split into
    /// several adjacent literals. Defaults to 16 KiB (the MSVC limit).
    #[serde(default = "default_max_literal")]
    pub max_literal: usize,
    /// Column at which embedded byte arrays wrap. Defaults to 120.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    /// Comment written at the top of every generated file.
    #[serde(default = "default_banner")]
    pub banner: String,
}

fn default_max_literal() -> usize {
    16 * 1024
}

fn default_wrap_width() -> usize {
    120
}

fn default_banner() -> String {
    "/* THIS FILE IS GENERATED. EDITS WILL BE LOST. */".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            max_literal: default_max_literal(),
            wrap_width: default_wrap_width(),
            banner: default_banner(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionConfig {
    /// Environment variable holding the 64-hex-digit AES-256 key.
    #[serde(default = "default_key_env")]
    pub key_env: String,
}

fn default_key_env() -> String {
    "SCRIPT_AES256_ENCRYPTION_KEY".to_string()
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        EncryptionConfig {
            key_env: default_key_env(),
        }
    }
}

impl Config {
    /// Reject settings that would produce unusable output.
    pub fn validate(&self) -> Result<()> {
        if self.output.max_literal < 64 {
            bail!(
                "output.max_literal must be at least 64 bytes, got {}",
                self.output.max_literal
            );
        }
        if self.output.wrap_width < 16 {
            bail!(
                "output.wrap_width must be at least 16 columns, got {}",
                self.output.wrap_width
            );
        }
        Ok(())
    }
}

/// Load the generator configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.engine-builders/config.toml`
/// 3. `~/.config/engine-builders/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = config_override {
        read_config(path)?
    } else {
        let project_config = project_path.join(".engine-builders").join("config.toml");
        let home_config = dirs::home_dir().map(|home| {
            home.join(".config")
                .join("engine-builders")
                .join("config.toml")
        });

        if project_config.exists() {
            read_config(&project_config)?
        } else if let Some(home_config) = home_config.filter(|p| p.exists()) {
            read_config(&home_config)?
        } else {
            Config::default()
        }
    };

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
