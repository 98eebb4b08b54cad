use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::emit::{CppWriter, Escaped};
use crate::status::Status;

/// Markdown name lists turned into null-terminated C string arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roster {
    Authors,
    RedotAuthors,
    Donors,
}

impl Roster {
    /// The array emitted for a `## <heading>` section, if the roster knows it.
    pub fn section_identifier(self, heading: &str) -> Option<&'static str> {
        let id = match (self, heading) {
            (Roster::Authors, "Project Founders") => "AUTHORS_FOUNDERS",
            (Roster::Authors, "Lead Developer") => "AUTHORS_LEAD_DEVELOPERS",
            (Roster::Authors, "Project Manager") => "AUTHORS_PROJECT_MANAGERS",
            (Roster::Authors, "Developers") => "AUTHORS_DEVELOPERS",

            (Roster::RedotAuthors, "Project Founders") => "REDOT_AUTHORS_FOUNDERS",
            (Roster::RedotAuthors, "Lead Developer") => "REDOT_AUTHORS_LEAD_DEVELOPERS",
            (Roster::RedotAuthors, "Project Manager") => "REDOT_AUTHORS_PROJECT_MANAGERS",
            (Roster::RedotAuthors, "Developers") => "REDOT_AUTHORS_DEVELOPERS",

            (Roster::Donors, "Patrons") => "DONORS_PATRONS",
            (Roster::Donors, "Platinum sponsors") => "DONORS_SPONSORS_PLATINUM",
            (Roster::Donors, "Gold sponsors") => "DONORS_SPONSORS_GOLD",
            (Roster::Donors, "Silver sponsors") => "DONORS_SPONSORS_SILVER",
            (Roster::Donors, "Diamond members") => "DONORS_MEMBERS_DIAMOND",
            (Roster::Donors, "Titanium members") => "DONORS_MEMBERS_TITANIUM",
            (Roster::Donors, "Platinum members") => "DONORS_MEMBERS_PLATINUM",
            (Roster::Donors, "Gold members") => "DONORS_MEMBERS_GOLD",

            _ => return None,
        };
        Some(id)
    }

    /// Whether an unknown section heading aborts generation. Donor lists
    /// carry tiers the engine does not display, which are skipped.
    fn is_strict(self) -> bool {
        !matches!(self, Roster::Donors)
    }
}

pub struct RosterGenerator {
    roster: Roster,
    source: PathBuf,
}

impl RosterGenerator {
    pub fn new(roster: Roster, source: PathBuf) -> Self {
        Self { roster, source }
    }
}

impl super::Generator for RosterGenerator {
    fn name(&self) -> &'static str {
        match self.roster {
            Roster::Authors => "authors",
            Roster::RedotAuthors => "redot-authors",
            Roster::Donors => "donors",
        }
    }

    fn generate(&self, out: &mut CppWriter, status: &Status) -> Result<()> {
        let text = super::read_text(&self.source)?;
        let sections = write_roster(out, self.roster, &text)?;
        status.detail(format!("{} sections from {}", sections, self.source.display()));
        Ok(())
    }
}

/// Emit one array per known `## ` section; names are the lines indented by
/// four spaces that follow it. Returns the number of arrays written.
pub fn write_roster(out: &mut CppWriter, roster: Roster, text: &str) -> Result<usize> {
    let mut reading = false;
    let mut sections = 0;

    for (n, line) in text.lines().enumerate() {
        if reading && line.starts_with("    ") {
            writeln!(out, "\t\"{}\",", Escaped(line.trim()))?;
        } else if let Some(heading) = line.strip_prefix("## ") {
            if reading {
                close_section(out)?;
                reading = false;
            }
            let heading = heading.trim();
            match roster.section_identifier(heading) {
                Some(id) => {
                    writeln!(out, "inline constexpr const char *{id}[] = {{")?;
                    reading = true;
                    sections += 1;
                }
                None if roster.is_strict() => {
                    bail!("line {}: unknown section `{}`", n + 1, heading)
                }
                None => {}
            }
        }
    }

    if reading {
        close_section(out)?;
    }
    Ok(sections)
}

fn close_section(out: &mut CppWriter) -> Result<()> {
    writeln!(out, "\tnullptr,\n}};\n")?;
    Ok(())
}
