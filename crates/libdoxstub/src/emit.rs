use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::matcher::match_section;
use crate::render::render_member;
use crate::section::{SectionKind, Visibility, locate_section};
use crate::source::DocSource;

/// Package line emitted at the top of every stub.
const PACKAGE_LINE: &str = "package generated;";

/// Assembles one complete stub per catalog entry from a documentation source.
pub struct Emitter<'a, S: DocSource> {
    source: &'a S,
}

impl<'a, S: DocSource> Emitter<'a, S> {
    /// Creates an emitter reading pages from `source`.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Generates the full stub text for `entry`.
    ///
    /// Every (kind, visibility) pair is located and matched independently,
    /// each scan restarting from the top of the page: section order on real
    /// pages is not guaranteed, and a shared cursor could drop sections that
    /// appear out of the assumed order. If the page cannot be loaded, no
    /// partial text is produced.
    pub fn generate(&self, entry: &CatalogEntry) -> Result<String> {
        let lines = self.source.document(entry.kind, &entry.page_id)?;
        let mut out = header(&entry.display_name);
        for kind in SectionKind::ALL {
            for visibility in Visibility::ALL {
                let heading = kind.heading(visibility);
                let start = locate_section(&lines, &heading);
                let (found, _) = match_section(&lines, start, kind);
                for descriptor in &found {
                    out.push_str(&render_member(descriptor, kind, visibility));
                }
                if kind.separates_group() && !found.is_empty() {
                    out.push('\n');
                }
            }
        }
        out.push_str(FOOTER);
        Ok(out)
    }
}

fn header(display_name: &str) -> String {
    format!("{PACKAGE_LINE}\n\npublic class {display_name} {{\n\n")
}

const FOOTER: &str = "}\n";
