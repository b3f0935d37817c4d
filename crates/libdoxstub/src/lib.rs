//! libdoxstub generates class skeletons from Doxygen HTML documentation.
//!
//! Given a directory of generated documentation, it scans the index page for
//! every class and struct, extracts each type's members from its page, and
//! writes one stub source file per type with all member bodies left empty.
//! The stubs bootstrap a wrapper library when the original source is not
//! available.

mod catalog;
mod emit;
mod error;
mod matcher;
mod render;
mod section;
mod source;

pub use crate::catalog::{Catalog, CatalogEntry, PageKind, scan_catalog};
pub use crate::emit::Emitter;
pub use crate::error::{DoxstubError, Result};
pub use crate::matcher::{MemberDescriptor, match_section, strip_markup};
pub use crate::render::render_member;
pub use crate::section::{SectionKind, Visibility, locate_section};
pub use crate::source::{DirSink, DirSource, DocSource, INDEX_PAGE, StubSink};

use std::path::PathBuf;

use tracing::{info, warn};

/// What a generation run produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of stub files written.
    pub generated: usize,
    /// Display names of entries skipped because their page could not be
    /// read or their stub could not be written.
    pub skipped: Vec<String>,
}

/// Doxstub turns a tree of Doxygen HTML documentation into a directory of
/// stub class declarations, one file per documented class or struct.
#[derive(Debug, Clone)]
pub struct Doxstub {
    docs_dir: PathBuf,
    output_dir: PathBuf,
}

impl Doxstub {
    /// Creates an instance reading documentation from `docs_dir`, writing
    /// stubs to `stubs` in the current directory unless reconfigured.
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            output_dir: PathBuf::from("stubs"),
        }
    }

    /// Sets the directory generated stubs are written to.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Scans the catalog and generates every listed stub.
    ///
    /// An unreadable index page fails the whole run. A failure confined to
    /// one entry (unreadable page, failed write) skips that entry with a
    /// diagnostic and continues; each entry's text is fully assembled before
    /// anything is written, so other entries are never affected.
    pub fn generate_all(&self) -> Result<RunSummary> {
        let source = DirSource::new(&self.docs_dir);
        let sink = DirSink::new(&self.output_dir);
        self.run(&source, &sink)
    }

    /// Runs generation against explicit source and sink collaborators.
    pub fn run(&self, source: &impl DocSource, sink: &impl StubSink) -> Result<RunSummary> {
        let catalog = scan_catalog(&source.index_page()?);
        let emitter = Emitter::new(source);
        let mut summary = RunSummary::default();
        for entry in catalog.entries() {
            match emitter
                .generate(entry)
                .and_then(|text| sink.write_stub(&entry.display_name, &text))
            {
                Ok(()) => {
                    info!("generated {}", entry.display_name);
                    summary.generated += 1;
                }
                Err(err) => {
                    warn!("skipping {}: {err}", entry.display_name);
                    summary.skipped.push(entry.display_name.clone());
                }
            }
        }
        Ok(summary)
    }
}
