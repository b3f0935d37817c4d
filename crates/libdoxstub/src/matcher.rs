use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::section::SectionKind;

/// One extracted member, decoded from a documentation table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberDescriptor {
    /// A member function, static or not.
    Function {
        /// Return type text, markup stripped.
        return_type: String,
        /// Member name.
        name: String,
        /// Parenthesized parameter list, markup stripped.
        params: String,
    },
    /// A data member, static or not.
    Field {
        /// Modifier tokens preceding the type (`const`, `volatile`, ...).
        modifiers: String,
        /// Type text.
        ty: String,
        /// Member name.
        name: String,
        /// Initializer text following `=`, when present.
        initializer: Option<String>,
    },
    /// A nested enum or class together with its member list.
    NestedType {
        /// Type keyword (`enum`, `class`, ...).
        ty: String,
        /// Type name.
        name: String,
        /// Member list text, markup stripped, line structure preserved.
        members: String,
    },
}

/// Marker that closes a member table. Scanning stops when a line carries it.
pub const BLOCK_END: &str = "</table>";

static FUNCTION_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<td class="memItemLeft"[^>]*>(?P<left>.*?)</td>\s*<td class="memItemRight"[^>]*><a[^>]*>(?P<name>[^<]+)</a>\s*(?P<params>\(.*\))\s*</td>"#,
    )
    .unwrap()
});

static FIELD_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<td class="memItemLeft"[^>]*>(?P<left>.*?)</td>\s*<td class="memItemRight"[^>]*><a[^>]*>(?P<name>[^<]+)</a>\s*(?:=\s*(?P<init>.*?))?\s*</td>"#,
    )
    .unwrap()
});

static NESTED_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<td class="memItemLeft"[^>]*>(?P<left>.*?)</td>\s*<td class="memItemRight"[^>]*><a[^>]*>(?P<name>[^<]+)</a>\s*\{(?P<members>.*?)\}\s*</td>"#,
    )
    .unwrap()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static HSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Removes tags and decodes the handful of entities the documentation tool
/// emits. Tags vanish without leaving a space: token separation comes from
/// the `&nbsp;`/`&#160;` entities the tool puts between cells, and a closing
/// tag often abuts punctuation. Horizontal whitespace collapses to single
/// spaces; line structure survives so multi-line member lists keep their
/// shape.
pub fn strip_markup(text: &str) -> String {
    let text = TAG.replace_all(text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    text.lines()
        .map(|line| HSPACE.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops a leading `static` token. Static sections repeat the keyword in the
/// row text; the renderer re-adds it from the section kind.
fn without_static(text: &str) -> String {
    text.strip_prefix("static ").unwrap_or(text).to_string()
}

fn decode_function(caps: &Captures, kind: SectionKind) -> MemberDescriptor {
    let mut return_type = strip_markup(&caps["left"]);
    if kind.is_static() {
        return_type = without_static(&return_type);
    }
    MemberDescriptor::Function {
        return_type,
        name: caps["name"].trim().to_string(),
        params: strip_markup(&caps["params"]),
    }
}

fn decode_field(caps: &Captures, kind: SectionKind) -> MemberDescriptor {
    let mut left = strip_markup(&caps["left"]);
    if kind.is_static() {
        left = without_static(&left);
    }
    let mut tokens: Vec<&str> = left.split_whitespace().collect();
    let ty = tokens.pop().unwrap_or_default().to_string();
    MemberDescriptor::Field {
        modifiers: tokens.join(" "),
        ty,
        name: caps["name"].trim().to_string(),
        initializer: caps
            .name("init")
            .map(|m| strip_markup(m.as_str()))
            .filter(|init| !init.is_empty()),
    }
}

fn decode_nested(caps: &Captures, _kind: SectionKind) -> MemberDescriptor {
    MemberDescriptor::NestedType {
        ty: strip_markup(&caps["left"]),
        name: caps["name"].trim().to_string(),
        members: strip_markup(&caps["members"]),
    }
}

/// One declarative extraction rule: the row pattern for a section kind and
/// the decoder that turns a pattern match into a descriptor.
struct MemberRule {
    pattern: &'static Lazy<Regex>,
    decode: fn(&Captures, SectionKind) -> MemberDescriptor,
}

impl SectionKind {
    fn rule(self) -> MemberRule {
        match self {
            Self::NestedType => MemberRule {
                pattern: &NESTED_ROW,
                decode: decode_nested,
            },
            Self::StaticField | Self::Field => MemberRule {
                pattern: &FIELD_ROW,
                decode: decode_field,
            },
            Self::StaticFunction | Self::Function => MemberRule {
                pattern: &FUNCTION_ROW,
                decode: decode_function,
            },
        }
    }
}

enum ScanState {
    Scanning,
    Terminated,
}

/// Scans a located section and returns its descriptors in document order
/// along with the position the scan stopped at. Non-matching lines are
/// skipped silently; the block terminator or the end of the page ends the
/// scan.
pub fn match_section(
    lines: &[String],
    start: usize,
    kind: SectionKind,
) -> (Vec<MemberDescriptor>, usize) {
    match kind {
        SectionKind::NestedType => match_accumulating(lines, start, kind),
        _ => match_single_line(lines, start, kind),
    }
}

fn match_single_line(
    lines: &[String],
    start: usize,
    kind: SectionKind,
) -> (Vec<MemberDescriptor>, usize) {
    let rule = kind.rule();
    let mut found = Vec::new();
    let mut idx = start;
    let mut state = ScanState::Scanning;
    while idx < lines.len() {
        if let ScanState::Terminated = state {
            break;
        }
        let line = &lines[idx];
        if let Some(caps) = rule.pattern.captures(line) {
            found.push((rule.decode)(&caps, kind));
        } else if line.contains(BLOCK_END) {
            state = ScanState::Terminated;
            continue;
        }
        idx += 1;
    }
    (found, idx)
}

/// Nested-type rows can span several physical lines, so the scan accumulates
/// lines into a buffer and re-attempts the match against the whole buffer
/// after each append, clearing it once a row completes.
fn match_accumulating(
    lines: &[String],
    start: usize,
    kind: SectionKind,
) -> (Vec<MemberDescriptor>, usize) {
    let rule = kind.rule();
    let mut found = Vec::new();
    let mut buffer = String::new();
    let mut idx = start;
    let mut state = ScanState::Scanning;
    while idx < lines.len() {
        if let ScanState::Terminated = state {
            break;
        }
        let line = &lines[idx];
        buffer.push_str(line);
        buffer.push('\n');
        if let Some(caps) = rule.pattern.captures(&buffer) {
            found.push((rule.decode)(&caps, kind));
            buffer.clear();
        }
        // The terminator is honored only after the buffer has had its
        // chance to complete a row: the row's closing markup and the
        // terminator can share a physical line.
        if line.contains(BLOCK_END) {
            state = ScanState::Terminated;
            continue;
        }
        idx += 1;
    }
    (found, idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| (*l).to_string()).collect()
    }

    #[test]
    fn strips_tags_and_entities() {
        assert_eq!(
            strip_markup("<a class=\"el\" href=\"x.html\">Foo</a>&nbsp;&amp; bar"),
            "Foo & bar"
        );
        assert_eq!(strip_markup("std::vector&lt;int&gt;&#160;"), "std::vector<int>");
    }

    #[test]
    fn removed_tags_leave_no_space_before_punctuation() {
        assert_eq!(strip_markup("<a>kOne</a>, <a>kTwo</a>"), "kOne, kTwo");
    }

    #[test]
    fn strip_markup_preserves_line_structure() {
        assert_eq!(
            strip_markup(" <a>kRaw</a>,\n  <a>kRate</a>\n "),
            "kRaw,\nkRate"
        );
    }

    #[test]
    fn decodes_one_function_row() {
        let lines = page(&[
            r#"<tr><td class="memItemLeft" align="right" valign="top">int&#160;</td><td class="memItemRight" valign="bottom"><a class="el" href="classCounter.html#a3">Get</a> (void)</td></tr>"#,
            "</table>",
        ]);
        let (found, stop) = match_section(&lines, 0, SectionKind::Function);
        assert_eq!(
            found,
            vec![MemberDescriptor::Function {
                return_type: "int".to_string(),
                name: "Get".to_string(),
                params: "(void)".to_string(),
            }]
        );
        assert_eq!(stop, 1);
    }

    #[test]
    fn static_keyword_is_dropped_from_row_text() {
        let lines = page(&[
            r#"<tr><td class="memItemLeft" align="right" valign="top">static int&nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="classCounter.html#a1">Foo</a> (int bar)</td></tr>"#,
        ]);
        let (found, _) = match_section(&lines, 0, SectionKind::StaticFunction);
        assert_eq!(
            found,
            vec![MemberDescriptor::Function {
                return_type: "int".to_string(),
                name: "Foo".to_string(),
                params: "(int bar)".to_string(),
            }]
        );
    }

    #[test]
    fn decodes_field_with_initializer() {
        let lines = page(&[
            r#"<tr><td class="memItemLeft" align="right" valign="top">static const int&nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="classCounter.html#a7">kLimit</a> = 42</td></tr>"#,
        ]);
        let (found, _) = match_section(&lines, 0, SectionKind::StaticField);
        assert_eq!(
            found,
            vec![MemberDescriptor::Field {
                modifiers: "const".to_string(),
                ty: "int".to_string(),
                name: "kLimit".to_string(),
                initializer: Some("42".to_string()),
            }]
        );
    }

    #[test]
    fn decodes_field_without_initializer() {
        let lines = page(&[
            r#"<tr><td class="memItemLeft" align="right" valign="top">double&nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="classCounter.html#a8">m_period</a></td></tr>"#,
        ]);
        let (found, _) = match_section(&lines, 0, SectionKind::Field);
        assert_eq!(
            found,
            vec![MemberDescriptor::Field {
                modifiers: String::new(),
                ty: "double".to_string(),
                name: "m_period".to_string(),
                initializer: None,
            }]
        );
    }

    #[test]
    fn nested_type_row_spanning_lines_is_accumulated() {
        let lines = page(&[
            r##"<tr><td class="memItemLeft" align="right" valign="top">enum &nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="classCounter.html#a9">Mode</a> { <a class="el" href="#aa">kRaw</a>,"##,
            r##"<a class="el" href="#ab">kRate</a>"##,
            r#" }</td></tr>"#,
            "</table>",
        ]);
        let (found, stop) = match_section(&lines, 0, SectionKind::NestedType);
        assert_eq!(
            found,
            vec![MemberDescriptor::NestedType {
                ty: "enum".to_string(),
                name: "Mode".to_string(),
                members: "kRaw,\nkRate".to_string(),
            }]
        );
        assert_eq!(stop, 3);
    }

    #[test]
    fn nested_row_closing_on_terminator_line_is_kept() {
        let lines = page(&[
            r##"<tr><td class="memItemLeft" align="right" valign="top">enum &nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="#a9">Mode</a> { <a class="el" href="#aa">kRaw</a>,"##,
            r##"<a class="el" href="#ab">kRate</a>"##,
            " }</td></tr></table>",
        ]);
        let (found, stop) = match_section(&lines, 0, SectionKind::NestedType);
        assert_eq!(
            found,
            vec![MemberDescriptor::NestedType {
                ty: "enum".to_string(),
                name: "Mode".to_string(),
                members: "kRaw,\nkRate".to_string(),
            }]
        );
        assert_eq!(stop, 2);
    }

    #[test]
    fn noise_between_rows_is_skipped() {
        let lines = page(&[
            "<tr><td colspan=\"2\"><br></td></tr>",
            r##"<tr><td class="memItemLeft" align="right" valign="top">void&nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="#a1">Reset</a> ()</td></tr>"##,
            "<tr><td colspan=\"2\">&nbsp;</td></tr>",
            r##"<tr><td class="memItemLeft" align="right" valign="top">void&nbsp;</td><td class="memItemRight" valign="bottom"><a class="el" href="#a2">Start</a> ()</td></tr>"##,
            "</table>",
        ]);
        let (found, _) = match_section(&lines, 0, SectionKind::Function);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn scan_stops_at_block_end() {
        let lines = page(&[
            "</table>",
            r##"<tr><td class="memItemLeft">int&nbsp;</td><td class="memItemRight"><a href="#a1">AfterEnd</a> ()</td></tr>"##,
        ]);
        let (found, stop) = match_section(&lines, 0, SectionKind::Function);
        assert!(found.is_empty());
        assert_eq!(stop, 0);
    }

    #[test]
    fn exhausted_range_yields_no_descriptors() {
        let lines = page(&["<html>", "</html>"]);
        let (found, stop) = match_section(&lines, lines.len(), SectionKind::Field);
        assert!(found.is_empty());
        assert_eq!(stop, lines.len());
    }
}
