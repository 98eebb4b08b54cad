use std::fmt::Write;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::emit::{join_lines, CppWriter, Escaped};
use crate::manifest::{flatten, parse_manifest};
use crate::models::CopyrightTables;
use crate::status::Status;

const STRUCT_DEFINITIONS: &str = "\
struct ComponentCopyrightPart {
\tconst char *license;
\tconst char *const *files;
\tconst char *const *copyright_statements;
\tint file_count;
\tint copyright_count;
};

struct ComponentCopyright {
\tconst char *name;
\tconst ComponentCopyrightPart *parts;
\tint part_count;
};
";

/// Embeds the copyright manifest and the engine license text.
pub struct LicenseGenerator {
    copyright: PathBuf,
    license: PathBuf,
}

impl LicenseGenerator {
    pub fn new(copyright: PathBuf, license: PathBuf) -> Self {
        Self { copyright, license }
    }
}

impl super::Generator for LicenseGenerator {
    fn name(&self) -> &'static str {
        "license"
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let file = File::open(&self.copyright)
            .with_context(|| format!("failed to open {}", self.copyright.display()))?;
        let manifest = parse_manifest(BufReader::new(file))
            .with_context(|| format!("failed to read {}", self.copyright.display()))?;

        for line in &manifest.dropped {
            status.detail(format!(
                "{}:{}: paragraph has no Comment and is not a standalone license, dropped",
                self.copyright.display(),
                line
            ));
        }

        let tables = flatten(&manifest)
            .with_context(|| format!("invalid manifest {}", self.copyright.display()))?;
        status.detail(format!(
            "{} projects, {} parts, {} standalone licenses",
            manifest.projects.len(),
            manifest.part_count(),
            manifest.licenses.len()
        ));

        let license_text = super::read_text(&self.license)?;
        write_tables(out, &tables, &license_text)
    }
}

/// Write the license text and every copyright table.
pub fn write_tables(out: &mut CppWriter, tables: &CopyrightTables, license_text: &str) -> Result<()> {
    let text = out.raw(license_text);
    writeln!(out, "inline constexpr const char *GODOT_LICENSE_TEXT = {{\n{text}\n}};\n")?;
    writeln!(out, "{STRUCT_DEFINITIONS}")?;

    writeln!(out, "inline constexpr const char *COPYRIGHT_INFO_DATA[] = {{")?;
    for line in &tables.data {
        writeln!(out, "\t\"{}\",", Escaped(line))?;
    }
    writeln!(out, "}};\n")?;

    writeln!(out, "inline constexpr ComponentCopyrightPart COPYRIGHT_PROJECT_PARTS[] = {{")?;
    for part in &tables.parts {
        writeln!(
            out,
            "\t{{ \"{}\", &COPYRIGHT_INFO_DATA[{}], &COPYRIGHT_INFO_DATA[{}], {}, {} }},",
            Escaped(&part.license_name),
            part.files_offset,
            part.copyright_offset,
            part.files_count,
            part.copyright_count
        )?;
    }
    writeln!(out, "}};\n")?;

    writeln!(out, "inline constexpr int COPYRIGHT_INFO_COUNT = {};", tables.projects.len())?;
    writeln!(out, "inline constexpr ComponentCopyright COPYRIGHT_INFO[] = {{")?;
    for project in &tables.projects {
        writeln!(
            out,
            "\t{{ \"{}\", &COPYRIGHT_PROJECT_PARTS[{}], {} }},",
            Escaped(&project.name),
            project.parts_offset,
            project.parts_count
        )?;
    }
    writeln!(out, "}};\n")?;

    writeln!(out, "inline constexpr int LICENSE_COUNT = {};", tables.licenses.len())?;
    writeln!(out, "inline constexpr const char *LICENSE_NAMES[] = {{")?;
    for license in &tables.licenses {
        writeln!(out, "\t\"{}\",", Escaped(&license.name))?;
    }
    writeln!(out, "}};\n")?;

    writeln!(out, "inline constexpr const char *LICENSE_BODIES[] = {{\n")?;
    for license in &tables.licenses {
        let body = join_lines(&license.body);
        let body = out.raw(&body);
        writeln!(out, "{body},\n")?;
    }
    writeln!(out, "}};")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::generators::testing::{render, write_file};
    use crate::generators::Generator;

    const MANIFEST: &str = "\
Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/

Files: a.cpp a.h
Copyright: 2020 Alice
License: MIT
Comment: libfoo

License: Apache-2.0
 Full text line 1
 .
 Full text line 2
";

    fn generate(manifest: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let copyright = write_file(dir.path(), "COPYRIGHT.txt", manifest);
        let license = write_file(dir.path(), "LICENSE.txt", "Engine license \"text\".\n");
        render(&LicenseGenerator::new(copyright, license), "core/license.gen.h")
    }

    #[test]
    fn test_end_to_end_tables() {
        let out = generate(MANIFEST);

        assert!(out.starts_with("/* THIS FILE IS GENERATED. EDITS WILL BE LOST. */\n\n#pragma once\n"));
        assert!(out.contains(
            "inline constexpr const char *GODOT_LICENSE_TEXT = {\nR\"<!>(Engine license \"text\".\n)<!>\"\n};"
        ));
        assert!(out.contains(
            "inline constexpr const char *COPYRIGHT_INFO_DATA[] = {\n\t\"a.cpp a.h\",\n\t\"2020 Alice\",\n};"
        ));
        assert!(out.contains(
            "\t{ \"MIT\", &COPYRIGHT_INFO_DATA[0], &COPYRIGHT_INFO_DATA[1], 1, 1 },"
        ));
        assert!(out.contains("inline constexpr int COPYRIGHT_INFO_COUNT = 1;"));
        assert!(out.contains("\t{ \"libfoo\", &COPYRIGHT_PROJECT_PARTS[0], 1 },"));
        assert!(out.contains("inline constexpr int LICENSE_COUNT = 1;"));
        assert!(out.contains("inline constexpr const char *LICENSE_NAMES[] = {\n\t\"Apache-2.0\",\n};"));
        assert!(out.contains(
            "inline constexpr const char *LICENSE_BODIES[] = {\n\nR\"<!>(Full text line 1\n\nFull text line 2\n)<!>\",\n\n};"
        ));
        assert!(out.ends_with("};\n"));
    }

    #[test]
    fn test_table_order_in_output() {
        let out = generate(MANIFEST);
        let order = [
            "GODOT_LICENSE_TEXT",
            "COPYRIGHT_INFO_DATA[] =",
            "COPYRIGHT_PROJECT_PARTS[] =",
            "COPYRIGHT_INFO_COUNT =",
            "COPYRIGHT_INFO[] =",
            "LICENSE_COUNT =",
            "LICENSE_NAMES[] =",
            "LICENSE_BODIES[] =",
        ];
        let positions: Vec<usize> = order.iter().map(|name| out.find(name).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_license_names_and_bodies_share_order() {
        let out = generate(
            "License: Zlib\n zlib body\n\n\
             Files: a\nCopyright: b\nLicense: Zlib\nComment: p\n\n\
             License: Expat\n expat body\n",
        );
        assert!(out.contains("inline constexpr int LICENSE_COUNT = 2;"));
        assert!(out.contains("LICENSE_NAMES[] = {\n\t\"Zlib\",\n\t\"Expat\",\n};"));
        assert!(out.contains(
            "LICENSE_BODIES[] = {\n\nR\"<!>(zlib body\n)<!>\",\n\nR\"<!>(expat body\n)<!>\",\n\n};"
        ));
    }

    #[test]
    fn test_values_are_escaped() {
        let out = generate("Files: \"quoted\".c\nCopyright: A\\B\nLicense: MIT\nComment: q\"p\n");
        assert!(out.contains("\t\"\\\"quoted\\\".c\","));
        assert!(out.contains("\t\"A\\\\B\","));
        assert!(out.contains("\t{ \"q\\\"p\", &COPYRIGHT_PROJECT_PARTS[0], 1 },"));
    }

    #[test]
    fn test_missing_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        let license = write_file(dir.path(), "LICENSE.txt", "x");
        let generator = LicenseGenerator::new(dir.path().join("missing.txt"), license);
        let mut out = CppWriter::new(&OutputConfig::default());
        let err = generator.generate(&mut out, &Status::default()).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
