use anyhow::{Context, Result};

use crate::models::{CopyrightManifest, CopyrightTables, PartRecord, ProjectRecord};

/// Flatten the manifest into one string table plus offset-indexed records.
///
/// For every part, in project order, its `Files` lines are appended to the
/// table followed by its `Copyright` lines. A missing `Files` or `Copyright`
/// field is an empty range; a missing `License` is an error, since every
/// emitted record names its license.
pub fn flatten(manifest: &CopyrightManifest) -> Result<CopyrightTables> {
    let mut tables = CopyrightTables {
        licenses: manifest.licenses.clone(),
        ..Default::default()
    };

    for project in &manifest.projects {
        let parts_offset = tables.parts.len();

        for (n, part) in project.parts.iter().enumerate() {
            let license_name = part.license_name().with_context(|| {
                format!("part {} of project `{}` has no License field", n + 1, project.name)
            })?;
            let files = part.files.as_deref().unwrap_or_default();
            let copyright = part.copyright.as_deref().unwrap_or_default();

            let files_offset = tables.data.len();
            tables.data.extend_from_slice(files);
            let copyright_offset = tables.data.len();
            tables.data.extend_from_slice(copyright);

            tables.parts.push(PartRecord {
                license_name: license_name.to_string(),
                files_offset,
                files_count: files.len(),
                copyright_offset,
                copyright_count: copyright.len(),
            });
        }

        tables.projects.push(ProjectRecord {
            name: project.name.clone(),
            parts_offset,
            parts_count: project.parts.len(),
        });
    }

    Ok(tables)
}
