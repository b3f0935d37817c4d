use once_cell::sync::Lazy;
use regex::Regex;

/// Which page family a catalog entry's documentation lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A `class<ID>.html` page.
    Class,
    /// A `struct<ID>.html` page.
    Struct,
}

impl PageKind {
    /// File-name prefix of documentation pages for this kind.
    pub fn page_prefix(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
        }
    }
}

/// One row of the documentation index: a type to generate a stub for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Name shown in the index, used for the generated declaration and file.
    pub display_name: String,
    /// Identifier embedded in the page file name.
    pub page_id: String,
    /// Page family the entry's documentation lives in.
    pub kind: PageKind,
}

/// All classes and structs listed on the index page, in document order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Class entries.
    pub classes: Vec<CatalogEntry>,
    /// Struct entries.
    pub structs: Vec<CatalogEntry>,
}

impl Catalog {
    /// Iterates all entries, classes first.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.classes.iter().chain(self.structs.iter())
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.classes.len() + self.structs.len()
    }

    /// Whether the catalog lists nothing at all.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.structs.is_empty()
    }
}

static CLASS_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="class([A-Za-z0-9_]+)\.html">([^<]+)</a>"#).unwrap());

static STRUCT_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="struct([A-Za-z0-9_]+)\.html">([^<]+)</a>"#).unwrap());

fn scan_rows(index_text: &str, pattern: &Regex, kind: PageKind) -> Vec<CatalogEntry> {
    pattern
        .captures_iter(index_text)
        .map(|caps| CatalogEntry {
            display_name: caps[2].trim().to_string(),
            page_id: caps[1].to_string(),
            kind,
        })
        .collect()
}

/// Extracts the class and struct listings from the index page text. A page
/// with no rows of a kind yields an empty list, not an error.
pub fn scan_catalog(index_text: &str) -> Catalog {
    Catalog {
        classes: scan_rows(index_text, &CLASS_ROW, PageKind::Class),
        structs: scan_rows(index_text, &STRUCT_ROW, PageKind::Struct),
    }
}
