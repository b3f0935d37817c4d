use std::fs;
use std::path::PathBuf;

use crate::catalog::PageKind;
use crate::error::{DoxstubError, Result};

/// File name of the index page listing every class and struct.
pub const INDEX_PAGE: &str = "annotated.html";

/// Where documentation pages come from. The extraction core only ever sees
/// text; fetching is a boundary concern behind this trait.
pub trait DocSource {
    /// Returns the full text of the index page.
    fn index_page(&self) -> Result<String>;

    /// Returns one entry's documentation page as a sequence of lines.
    fn document(&self, kind: PageKind, page_id: &str) -> Result<Vec<String>>;
}

/// Where assembled stubs go.
pub trait StubSink {
    /// Writes one stub, keyed by the entry's display name.
    fn write_stub(&self, display_name: &str, text: &str) -> Result<()>;
}

/// Reads documentation pages from a directory holding the generated HTML.
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DocSource for DirSource {
    fn index_page(&self) -> Result<String> {
        fs::read_to_string(self.base.join(INDEX_PAGE)).map_err(DoxstubError::IndexRead)
    }

    fn document(&self, kind: PageKind, page_id: &str) -> Result<Vec<String>> {
        let page = format!("{}{}.html", kind.page_prefix(), page_id);
        let text = fs::read_to_string(self.base.join(&page))
            .map_err(|source| DoxstubError::DocumentRead { page, source })?;
        Ok(text.lines().map(str::to_owned).collect())
    }
}

/// Writes stubs as `<DisplayName>.java` files under an output directory,
/// creating the directory on first use.
#[derive(Debug, Clone)]
pub struct DirSink {
    out_dir: PathBuf,
}

impl DirSink {
    /// Creates a sink rooted at `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl StubSink for DirSink {
    fn write_stub(&self, display_name: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.out_dir).map_err(|source| DoxstubError::StubWrite {
            path: self.out_dir.clone(),
            source,
        })?;
        let path = self.out_dir.join(format!("{display_name}.java"));
        fs::write(&path, text).map_err(|source| DoxstubError::StubWrite { path, source })
    }
}
