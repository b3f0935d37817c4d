use once_cell::sync::Lazy;
use regex::Regex;

/// Member visibility levels, in the order sections are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Publicly visible members.
    Public,
    /// Members visible to subclasses.
    Protected,
    /// Members private to the type.
    Private,
}

impl Visibility {
    /// All visibility levels in emission order.
    pub const ALL: [Self; 3] = [Self::Public, Self::Protected, Self::Private];

    /// The keyword used in generated declarations.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }

    /// The capitalized form used in section headings.
    pub fn heading_word(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Protected => "Protected",
            Self::Private => "Private",
        }
    }
}

/// The five member-section categories a class page can carry, in the order
/// they are emitted into the stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Nested enums and classes.
    NestedType,
    /// Static data members.
    StaticField,
    /// Static member functions.
    StaticFunction,
    /// Instance data members.
    Field,
    /// Instance member functions.
    Function,
}

impl SectionKind {
    /// All section kinds in emission order.
    pub const ALL: [Self; 5] = [
        Self::NestedType,
        Self::StaticField,
        Self::StaticFunction,
        Self::Field,
        Self::Function,
    ];

    /// The section heading for this kind at the given visibility, as it
    /// appears on the documentation page.
    pub fn heading(self, visibility: Visibility) -> String {
        let vis = visibility.heading_word();
        match self {
            Self::NestedType => format!("{vis} Types"),
            Self::StaticField => format!("Static {vis} Attributes"),
            Self::StaticFunction => format!("Static {vis} Member Functions"),
            Self::Field => format!("{vis} Attributes"),
            Self::Function => format!("{vis} Member Functions"),
        }
    }

    /// Whether declarations in this section carry the `static` keyword.
    pub fn is_static(self) -> bool {
        matches!(self, Self::StaticField | Self::StaticFunction)
    }

    /// Whether a non-empty group of this kind is followed by a blank-line
    /// separator. Function stubs already embed blank lines per entry.
    pub fn separates_group(self) -> bool {
        matches!(self, Self::NestedType | Self::StaticField | Self::Field)
    }
}

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<h2[^>]*>\s*([^<]+?)\s*</h2>").unwrap());

/// Returns the index of the first line after the heading line for `heading`,
/// or `lines.len()` when the page has no such section. An absent section is
/// not an error; the matcher simply scans an exhausted range.
pub fn locate_section(lines: &[String], heading: &str) -> usize {
    for (idx, line) in lines.iter().enumerate() {
        if let Some(caps) = SECTION_HEADING.captures(line)
            && &caps[1] == heading
        {
            return idx + 1;
        }
    }
    lines.len()
}
