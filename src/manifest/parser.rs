use std::io::BufRead;

use anyhow::Result;

use super::reader::{ManifestReader, Tag};
use crate::models::{CopyrightManifest, Part, StandaloneLicense};

/// Manifest fields the parser acts on. Any other tag is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Files,
    Copyright,
    License,
    Comment,
}

impl Field {
    fn from_tag(name: &str) -> Option<Self> {
        match name {
            "Files" => Some(Field::Files),
            "Copyright" => Some(Field::Copyright),
            "License" => Some(Field::License),
            "Comment" => Some(Field::Comment),
            _ => None,
        }
    }
}

/// The paragraph being assembled.
///
/// A `Comment` attaches the paragraph to a project right away (fixing the
/// project's position), but fields that follow it in the same paragraph still
/// belong to the attached part, so the part is only copied into its projects
/// when the paragraph ends.
#[derive(Default)]
struct Paragraph {
    part: Part,
    attached: Vec<usize>,
}

impl Paragraph {
    fn apply(&mut self, tag: Tag, manifest: &mut CopyrightManifest) {
        match Field::from_tag(&tag.name) {
            Some(Field::Files) => self.part.files = Some(tag.values),
            Some(Field::Copyright) => self.part.copyright = Some(tag.values),
            Some(Field::License) => self.part.license = Some(tag.values),
            Some(Field::Comment) if !self.part.is_empty() => {
                let idx = manifest.project_index(&tag.values[0]);
                self.attached.push(idx);
            }
            Some(Field::Comment) | None => {}
        }
    }

    fn finish(self, manifest: &mut CopyrightManifest, line_num: usize) {
        if !self.attached.is_empty() {
            for idx in self.attached {
                manifest.projects[idx].parts.push(self.part.clone());
            }
        } else if let Some(license) = self.part.license.as_deref().filter(|_| self.part.is_standalone_license()) {
            manifest.licenses.push(StandaloneLicense::from_field(license));
        } else if !self.part.is_empty() {
            // Neither attached nor standalone: dropped, and remembered for reporting.
            manifest.dropped.push(line_num);
        }
    }
}

/// Parse a copyright manifest in a single pass.
///
/// Paragraphs named by a `Comment` become parts of that project; paragraphs
/// with a `License` but no `Files` become standalone licenses. Anything else is
/// dropped, its ending line recorded in [`CopyrightManifest::dropped`].
pub fn parse_manifest<R: BufRead>(input: R) -> Result<CopyrightManifest> {
    let mut reader = ManifestReader::new(input)?;
    let mut manifest = CopyrightManifest::default();
    let mut paragraph = Paragraph::default();

    while reader.current().is_some() {
        let tag = reader.read_next_tag()?;
        let boundary = tag.is_none() || reader.current().is_none();
        if let Some(tag) = tag {
            paragraph.apply(tag, &mut manifest);
        }

        if boundary {
            std::mem::take(&mut paragraph).finish(&mut manifest, reader.line_num());
            reader.advance()?;
        }
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> CopyrightManifest {
        parse_manifest(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_project_and_standalone_license() {
        let manifest = parse(
            "Files: a.cpp a.h\n\
             Copyright: 2020 Alice\n\
             License: MIT\n\
             Comment: libfoo\n\
             \n\
             License: Apache-2.0\n \
             Full text line 1\n \
             .\n \
             Full text line 2\n",
        );

        assert_eq!(manifest.projects.len(), 1);
        let project = &manifest.projects[0];
        assert_eq!(project.name, "libfoo");
        assert_eq!(
            project.parts,
            vec![Part {
                files: Some(vec!["a.cpp a.h".to_string()]),
                copyright: Some(vec!["2020 Alice".to_string()]),
                license: Some(vec!["MIT".to_string()]),
            }]
        );

        assert_eq!(
            manifest.licenses,
            vec![StandaloneLicense {
                name: "Apache-2.0".to_string(),
                body: vec![
                    "Full text line 1".to_string(),
                    String::new(),
                    "Full text line 2".to_string(),
                ],
            }]
        );
        assert!(manifest.dropped.is_empty());
    }

    #[test]
    fn test_fields_after_comment_stay_with_part() {
        let manifest = parse(
            "Files: *\n\
             Comment: Engine\n\
             Copyright: 2014-present, contributors.\n \
             2007-2014, founders.\n\
             License: Expat\n",
        );
        let part = &manifest.projects[0].parts[0];
        assert_eq!(part.files.as_deref(), Some(&["*".to_string()][..]));
        assert_eq!(part.copyright.as_ref().map(Vec::len), Some(2));
        assert_eq!(part.license_name(), Some("Expat"));
    }

    #[test]
    fn test_parts_accumulate_in_first_appearance_order() {
        let manifest = parse(
            "Files: a/*\nCopyright: A\nLicense: MIT\nComment: alpha\n\n\
             Files: b/*\nCopyright: B\nLicense: Zlib\nComment: beta\n\n\
             Files: a/extra/*\nCopyright: A2\nLicense: BSD-3-clause\nComment: alpha\n",
        );
        let names: Vec<_> = manifest.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        let alpha: Vec<_> = manifest.projects[0]
            .parts
            .iter()
            .filter_map(Part::license_name)
            .collect();
        assert_eq!(alpha, vec!["MIT", "BSD-3-clause"]);
    }

    #[test]
    fn test_trailing_paragraph_without_comment_is_dropped() {
        let manifest = parse(
            "Files: a.cpp\nCopyright: Alice\nLicense: MIT\nComment: kept\n\n\
             Files: orphan.cpp\nCopyright: Bob\nLicense: MIT\n",
        );
        assert_eq!(manifest.projects.len(), 1);
        assert_eq!(manifest.part_count(), 1);
        assert!(manifest.licenses.is_empty());
        assert_eq!(manifest.dropped.len(), 1);
    }

    #[test]
    fn test_comment_before_fields_is_ignored() {
        let manifest = parse("Comment: nothing yet\nFiles: x\nCopyright: y\nLicense: MIT\n");
        assert!(manifest.projects.is_empty());
        assert_eq!(manifest.dropped.len(), 1);
    }

    #[test]
    fn test_header_paragraph_and_comments_ignored() {
        let manifest = parse(
            "# Generated from upstream\n\
             Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/\n\
             Upstream-Name: Engine\n\
             \n\
             License: Zlib\n \
             This software is provided 'as-is'.\n",
        );
        assert!(manifest.projects.is_empty());
        assert!(manifest.dropped.is_empty());
        assert_eq!(manifest.licenses.len(), 1);
        assert_eq!(manifest.licenses[0].name, "Zlib");
    }

    #[test]
    fn test_attached_license_paragraph_is_not_standalone() {
        let manifest = parse("License: OFL-1.1\nComment: Fonts\n");
        assert_eq!(manifest.projects.len(), 1);
        assert!(manifest.licenses.is_empty());
    }

    #[test]
    fn test_multiple_blank_lines() {
        let manifest = parse("\n\n\nLicense: MIT\n text\n\n\n");
        assert_eq!(manifest.licenses.len(), 1);
        assert_eq!(manifest.licenses[0].body, vec!["text"]);
    }

    #[test]
    fn test_stray_separator_line_ends_paragraph() {
        let manifest =
            parse("License: MIT\n text\n: stray\nFiles: x\nCopyright: y\nLicense: Zlib\nComment: p\n");
        assert_eq!(manifest.licenses.len(), 1);
        assert_eq!(manifest.licenses[0].name, "MIT");
        assert_eq!(manifest.projects[0].parts[0].license_name(), Some("Zlib"));
    }
}
