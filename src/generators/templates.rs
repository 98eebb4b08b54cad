use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::emit::{CppWriter, Escaped};
use crate::status::Status;

/// Marker the engine expands back into the user's indentation.
const INDENT_MARKER: &str = "_TS_";

/// A script template with its `meta-` header lines extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptTemplate {
    /// Class the template extends: the name of its parent directory.
    pub inherits: String,
    pub name: String,
    pub description: String,
    pub version: String,
    /// Body with indentation replaced by [`INDENT_MARKER`], left-trimmed.
    pub script: String,
}

/// Parse one template. `delimiter` is the language's line comment marker;
/// header lines look like `# meta-name: Node2D`.
pub fn parse_template(inherits: &str, source: &Path, text: &str, delimiter: &str) -> Result<ScriptTemplate> {
    let meta_prefix = format!("{delimiter} meta-");
    let mut template = ScriptTemplate {
        inherits: inherits.to_string(),
        name: String::new(),
        description: String::new(),
        version: String::new(),
        script: String::new(),
    };
    let mut space_indent = "4".to_string();

    for line in text.split_inclusive('\n') {
        let Some(meta) = line.strip_prefix(&meta_prefix) else {
            template.script.push_str(line);
            continue;
        };
        // The key is followed by one separator character, usually `:`.
        let value = |key: &str| meta.get(key.len() + 1..).unwrap_or_default().trim().to_string();
        if meta.starts_with("name") {
            template.name = value("name");
        } else if meta.starts_with("description") {
            template.description = value("description");
        } else if meta.starts_with("version") {
            template.version = value("version");
        } else if meta.starts_with("space-indent") {
            space_indent = value("space-indent");
        }
    }

    if !space_indent.is_empty() {
        let width: usize = space_indent
            .parse()
            .with_context(|| format!("{}: invalid meta-space-indent `{}`", source.display(), space_indent))?;
        if width > 0 {
            template.script = template.script.replace(&" ".repeat(width), INDENT_MARKER);
        }
    }
    template.script = template
        .script
        .trim_start()
        .replace('\t', INDENT_MARKER);

    if template.name.is_empty() {
        let stem = super::file_stem(source)?;
        template.name = title_case(&stem.replace('_', " "));
    }

    Ok(template)
}

/// Capitalize the first letter of every word and lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Built-in script templates, grouped by the class directory they live in.
pub struct TemplatesGenerator {
    sources: Vec<PathBuf>,
}

impl TemplatesGenerator {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self { sources }
    }

    /// C# templates use `//` comments, everything else `#`.
    fn delimiter(&self) -> &'static str {
        let is_csharp = self
            .sources
            .first()
            .and_then(|p| p.extension())
            .is_some_and(|ext| ext == "cs");
        if is_csharp {
            "//"
        } else {
            "#"
        }
    }
}

impl super::Generator for TemplatesGenerator {
    fn name(&self) -> &'static str {
        "templates"
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let delimiter = self.delimiter();
        let mut templates = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let inherits = source
                .parent()
                .and_then(Path::file_name)
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            let text = super::read_text(source)?;
            let template = parse_template(inherits, source, &text, delimiter)?;
            status.detail(format!(
                "template `{}` for {} (version {})",
                template.name,
                template.inherits,
                if template.version.is_empty() { "-" } else { &template.version }
            ));
            templates.push(template);
        }

        writeln!(
            out,
            "#include \"core/object/object.h\"\n\
             #include \"core/object/script_language.h\"\n\n\
             inline constexpr int TEMPLATES_ARRAY_SIZE = {};\n\
             static const struct ScriptLanguage::ScriptTemplate TEMPLATES[TEMPLATES_ARRAY_SIZE] = {{",
            templates.len()
        )?;
        for t in &templates {
            writeln!(
                out,
                "\t{{ String(\"{}\"), String(\"{}\"), String(\"{}\"), String(\"{}\") }},",
                Escaped(&t.inherits),
                Escaped(&t.name),
                Escaped(&t.description),
                Escaped(&t.script)
            )?;
        }
        writeln!(out, "}};")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{render, write_file};

    const GD_TEMPLATE: &str = "\
# meta-description: Base template for Node with default engine cycle methods
# meta-version: 4
extends _BASE_

func _ready() -> void:
    print(\"ready\")
";

    #[test]
    fn test_parse_gdscript_template() {
        let t = parse_template("Node", Path::new("Node/default.gd"), GD_TEMPLATE, "#").unwrap();
        assert_eq!(t.inherits, "Node");
        assert_eq!(t.name, "Default");
        assert_eq!(t.description, "Base template for Node with default engine cycle methods");
        assert_eq!(t.version, "4");
        assert_eq!(
            t.script,
            "extends _BASE_\n\nfunc _ready() -> void:\n_TS_print(\"ready\")\n"
        );
    }

    #[test]
    fn test_explicit_name_and_indent() {
        let text = "# meta-name: Custom\n# meta-space-indent: 2\nfunc f():\n  pass\n\tpass\n";
        let t = parse_template("Object", Path::new("Object/x.gd"), text, "#").unwrap();
        assert_eq!(t.name, "Custom");
        assert_eq!(t.script, "func f():\n_TS_pass\n_TS_pass\n");
    }

    #[test]
    fn test_invalid_indent() {
        let text = "# meta-space-indent: four\n";
        assert!(parse_template("Node", Path::new("Node/a.gd"), text, "#").is_err());
    }

    #[test]
    fn test_title_case_from_stem() {
        assert_eq!(title_case("character body 2d"), "Character Body 2D");
        assert_eq!(title_case("empty"), "Empty");
    }

    #[test]
    fn test_csharp_delimiter_and_output() {
        let dir = tempfile::tempdir().unwrap();
        let cs = write_file(
            dir.path(),
            "Node/empty.cs",
            "// meta-description: Empty\nusing _BINDINGS_NAMESPACE_;\n",
        );
        let out = render(&TemplatesGenerator::new(vec![cs]), "templates.gen.h");
        assert!(out.contains("inline constexpr int TEMPLATES_ARRAY_SIZE = 1;"));
        assert!(out.contains(
            "\t{ String(\"Node\"), String(\"Empty\"), String(\"Empty\"), String(\"using _BINDINGS_NAMESPACE_;\\n\") },"
        ));
    }
}
