use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::emit::cpp::identifier;
use crate::emit::{CppWriter, Escaped};
use crate::status::Status;

/// Single binary assets embedded as byte arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlobKind {
    Splash,
    SplashEditor,
    AppIcon,
    IcuData,
}

pub struct BlobGenerator {
    kind: BlobKind,
    source: PathBuf,
}

impl BlobGenerator {
    pub fn new(kind: BlobKind, source: PathBuf) -> Self {
        Self { kind, source }
    }
}

impl super::Generator for BlobGenerator {
    fn name(&self) -> &'static str {
        match self.kind {
            BlobKind::Splash => "splash",
            BlobKind::SplashEditor => "splash-editor",
            BlobKind::AppIcon => "app-icon",
            BlobKind::IcuData => "icu-data",
        }
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let data = super::read_bytes(&self.source)?;
        status.detail(format!("{}: {} bytes", self.source.display(), data.len()));
        let bytes = out.bytes(&data, 1);

        match self.kind {
            // Neutral gray to fit most projects.
            BlobKind::Splash => writeln!(
                out,
                "static const Color boot_splash_bg_color = Color(0.14, 0.14, 0.14);\n\
                 inline constexpr const unsigned char boot_splash_png[] = {{\n\t{bytes}\n}};"
            )?,
            // Matches the default editor theme background.
            BlobKind::SplashEditor => writeln!(
                out,
                "static const Color boot_splash_editor_bg_color = Color(0.125, 0.145, 0.192);\n\
                 inline constexpr const unsigned char boot_splash_editor_png[] = {{\n\t{bytes}\n}};"
            )?,
            BlobKind::AppIcon => writeln!(
                out,
                "inline constexpr const unsigned char app_icon_png[] = {{\n\t{bytes}\n}};"
            )?,
            BlobKind::IcuData => writeln!(
                out,
                "/* (C) 2016 and later: Unicode, Inc. and others. */\n\
                 /* License & terms of use: https://www.unicode.org/copyright.html */\n\n\
                 #include <unicode/utypes.h>\n\
                 #include <unicode/udata.h>\n\
                 #include <unicode/uversion.h>\n\n\
                 extern \"C\" U_EXPORT const size_t U_ICUDATA_SIZE = {};\n\
                 extern \"C\" U_EXPORT const unsigned char U_ICUDATA_ENTRY_POINT[] = {{\n\t{bytes}\n}};",
                data.len()
            )?,
        }
        Ok(())
    }
}

/// Font files embedded uncompressed; FreeType reads them in place.
pub struct FontsGenerator {
    sources: Vec<PathBuf>,
}

impl FontsGenerator {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self { sources }
    }
}

impl super::Generator for FontsGenerator {
    fn name(&self) -> &'static str {
        "fonts"
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        for source in &self.sources {
            let data = super::read_bytes(source)?;
            let name = identifier(super::file_stem(source)?)?;
            status.detail(format!("font {name}: {} bytes", data.len()));

            let bytes = out.bytes(&data, 1);
            writeln!(
                out,
                "inline constexpr int _font_{name}_size = {};\n\
                 inline constexpr unsigned char _font_{name}[] = {{\n\t{bytes}\n}};\n",
                data.len()
            )?;
        }
        Ok(())
    }
}

/// SVG icons of the default theme, as raw strings plus their names.
pub struct ThemeIconsGenerator {
    sources: Vec<PathBuf>,
}

impl ThemeIconsGenerator {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self { sources }
    }
}

impl super::Generator for ThemeIconsGenerator {
    fn name(&self) -> &'static str {
        "theme-icons"
    }

    fn generate(&self, out: &mut CppWriter, _status: &Status) -> Result<()> {
        let mut names = Vec::with_capacity(self.sources.len());
        let mut svgs = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            names.push(super::file_stem(source)?);
            svgs.push(super::read_text(source)?);
        }

        writeln!(
            out,
            "#include \"modules/modules_enabled.gen.h\"\n\n\
             inline constexpr int default_theme_icons_count = {};\n\
             inline constexpr const char *default_theme_icons_sources[] = {{",
            names.len()
        )?;
        for svg in &svgs {
            let raw = out.raw(svg);
            writeln!(out, "\t{raw},")?;
        }
        writeln!(out, "}};\n\ninline constexpr const char *default_theme_icons_names[] = {{")?;
        for name in &names {
            writeln!(out, "\t\"{}\",", Escaped(name))?;
        }
        writeln!(out, "}};")?;
        Ok(())
    }
}

/// A platform's export icon, found at `platform/<name>/export/<icon>.svg`.
pub struct ExportIconGenerator {
    source: PathBuf,
}

impl ExportIconGenerator {
    pub fn new(source: PathBuf) -> Self {
        Self { source }
    }
}

impl super::Generator for ExportIconGenerator {
    fn name(&self) -> &'static str {
        "export-icon"
    }

    fn generate(&self, out: &mut CppWriter, _status: &Status) -> Result<()> {
        let platform = platform_of(&self.source)?;
        let name = identifier(super::file_stem(&self.source)?)?;
        let svg = super::read_text(&self.source)?;

        let raw = out.raw(&svg);
        writeln!(out, "inline constexpr const char *_{platform}_{name}_svg = {raw};")?;
        Ok(())
    }
}

fn platform_of(source: &Path) -> Result<String> {
    let dir = source
        .parent()
        .and_then(Path::parent)
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("{} is not inside platform/<name>/export/", source.display()))?;
    identifier(dir)
}
