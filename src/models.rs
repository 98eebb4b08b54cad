use std::collections::HashMap;

/// One manifest paragraph: the `Files`, `Copyright` and `License` fields it carried.
///
/// Each field keeps its value lines verbatim (trimmed), in manifest order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Part {
    pub files: Option<Vec<String>>,
    pub copyright: Option<Vec<String>>,
    pub license: Option<Vec<String>>,
}

impl Part {
    pub fn is_empty(&self) -> bool {
        self.files.is_none() && self.copyright.is_none() && self.license.is_none()
    }

    /// The license short name, i.e. the first line of the `License` field.
    pub fn license_name(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|lines| lines.first())
            .map(String::as_str)
    }

    /// A paragraph declaring a license body without any file list.
    pub fn is_standalone_license(&self) -> bool {
        self.license.is_some() && self.files.is_none()
    }
}

/// A named component: every part whose paragraph carried `Comment: <name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub parts: Vec<Part>,
}

/// A license declared on its own, with its full text.
#[derive(Debug, Clone, PartialEq)]
pub struct StandaloneLicense {
    pub name: String,
    pub body: Vec<String>,
}

impl StandaloneLicense {
    /// Build from the value lines of a `License` field.
    ///
    /// A body line holding a single `.` stands for an empty line.
    pub fn from_field(lines: &[String]) -> Self {
        let name = lines.first().cloned().unwrap_or_default();
        let body = lines
            .iter()
            .skip(1)
            .map(|line| {
                if line == "." {
                    String::new()
                } else {
                    line.clone()
                }
            })
            .collect();
        StandaloneLicense { name, body }
    }
}

/// Parsed copyright manifest.
///
/// Projects keep the order in which their name first appeared; `index` maps a
/// project name to its position in `projects`.
#[derive(Debug, Clone, Default)]
pub struct CopyrightManifest {
    pub projects: Vec<Project>,
    pub licenses: Vec<StandaloneLicense>,
    /// Line numbers of paragraphs that ended without being attached or kept.
    pub dropped: Vec<usize>,
    index: HashMap<String, usize>,
}

impl CopyrightManifest {
    /// Position of the project called `name`, appending it if it is new.
    pub fn project_index(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.projects.len();
        self.projects.push(Project {
            name: name.to_string(),
            parts: Vec::new(),
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn part_count(&self) -> usize {
        self.projects.iter().map(|p| p.parts.len()).sum()
    }
}

/// A part as emitted: its license name and its ranges in the flat string table.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    pub license_name: String,
    pub files_offset: usize,
    pub files_count: usize,
    pub copyright_offset: usize,
    pub copyright_count: usize,
}

/// A project as emitted: its name and its range in the parts table.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub name: String,
    pub parts_offset: usize,
    pub parts_count: usize,
}

/// The manifest flattened into offset-indexed tables.
#[derive(Debug, Clone, Default)]
pub struct CopyrightTables {
    pub data: Vec<String>,
    pub parts: Vec<PartRecord>,
    pub projects: Vec<ProjectRecord>,
    pub licenses: Vec<StandaloneLicense>,
}
