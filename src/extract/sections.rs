//! Member tables
//!
//! Doxygen groups members into tables headed by an anchored heading row:
//!
//! ```text
//! <tr class="heading"><td><h2><a id="pub-static-methods"></a>Static Public Member Functions</h2></td></tr>
//! <tr class="memitem:a1b2"><td class="memItemLeft">static void</td><td class="memItemRight"><a href="#a1b2">init</a> (int x)</td></tr>
//! <tr class="memdesc:a1b2"><td class="mdescRight">Brief text. <a href="#a1b2">More...</a></td></tr>
//! ```
//!
//! The anchor decides what kind of member a row is and whether it is static.

use crate::extract::page::{collapse_whitespace, element_text, has_class, select_in, AnchorIndex};
use crate::model::{Member, MemberKind, Scope};
use crate::signature::format_signature;
use scraper::ElementRef;

/// Maps one section anchor to the members it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub anchor: &'static str,
    pub kind: MemberKind,
    pub scope: Scope,
}

impl SectionSpec {
    pub const fn new(anchor: &'static str, kind: MemberKind, scope: Scope) -> Self {
        Self {
            anchor,
            kind,
            scope,
        }
    }
}

/// Sections read from every detail page
pub const DEFAULT_SECTIONS: &[SectionSpec] = &[
    SectionSpec::new("pub-methods", MemberKind::Method, Scope::Instance),
    SectionSpec::new("pub-static-methods", MemberKind::Method, Scope::Static),
    SectionSpec::new("properties", MemberKind::Property, Scope::Instance),
    SectionSpec::new("pub-static-properties", MemberKind::Property, Scope::Static),
    SectionSpec::new("pub-attribs", MemberKind::Field, Scope::Instance),
    SectionSpec::new("pub-static-attribs", MemberKind::Field, Scope::Static),
];

/// Modifier word marking static members in the type column
const STATIC_MODIFIER: &str = "static";

/// Extracts every member row of one section
///
/// A section missing from the page, or a heading with no enclosing table,
/// yields no members.
pub fn extract_section(anchors: &AnchorIndex<'_>, spec: &SectionSpec) -> Vec<Member> {
    let Some(heading_anchor) = anchors.get(spec.anchor) else {
        return Vec::new();
    };

    let Some(table) = heading_anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "table")
    else {
        tracing::debug!("Section anchor {} is not inside a table", spec.anchor);
        return Vec::new();
    };

    let mut members: Vec<Member> = Vec::new();
    let mut row_keys: Vec<String> = Vec::new();
    let mut in_section = false;
    let mut inherited_from: Option<String> = None;

    for row in select_in(table, "tr") {
        if has_class(row, "heading") {
            in_section = heading_anchor.ancestors().any(|node| node.id() == row.id());
            inherited_from = None;
            continue;
        }

        if !in_section {
            continue;
        }

        if has_class(row, "inherit_header") {
            inherited_from = select_in(row, "a")
                .into_iter()
                .next()
                .map(element_text)
                .filter(|s| !s.is_empty());
            continue;
        }

        if let Some(key) = row_key(row, "memitem:") {
            if let Some(mut member) = parse_member_row(row, spec, anchors) {
                if has_class(row, "inherit") {
                    member.inherited_from = inherited_from.clone();
                }
                members.push(member);
                row_keys.push(key);
            }
        } else if let Some(key) = row_key(row, "memdesc:") {
            let position = row_keys.iter().position(|k| *k == key);
            if let Some(member) = position.and_then(|i| members.get_mut(i)) {
                member.summary = brief_summary(row, &key);
            }
        }
    }

    members
}

/// Returns the key of a `memitem:KEY` / `memdesc:KEY` row class
fn row_key(row: ElementRef<'_>, prefix: &str) -> Option<String> {
    row.value()
        .classes()
        .find_map(|class| class.strip_prefix(prefix))
        .map(str::to_string)
}

fn parse_member_row(
    row: ElementRef<'_>,
    spec: &SectionSpec,
    anchors: &AnchorIndex<'_>,
) -> Option<Member> {
    let right = select_in(row, "td.memItemRight").into_iter().next()?;
    let right_text = element_text(right);

    let left_text = select_in(row, "td.memItemLeft")
        .into_iter()
        .next()
        .map(element_text)
        .unwrap_or_default();

    let link = select_in(right, "a").into_iter().next();

    let name = link
        .map(element_text)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| name_from_text(&right_text));

    let anchor = link
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| href.split_once('#'))
        .map(|(_, fragment)| fragment.to_string())
        .filter(|s| !s.is_empty());

    // Only a static section strips the modifier; a type merely named like
    // it in an instance section stays intact.
    let declared_type = match spec.scope {
        Scope::Static => strip_modifier(&left_text, STATIC_MODIFIER),
        Scope::Instance => left_text,
    };

    let accessors = if spec.kind == MemberKind::Property {
        accessor_group(&right_text)
    } else {
        None
    };

    let description = anchor
        .as_deref()
        .and_then(|a| detail_description(anchors, a));

    Some(Member {
        name,
        kind: spec.kind,
        scope: spec.scope,
        declared_type,
        declaration: format_signature(&right_text),
        anchor,
        summary: None,
        description,
        accessors,
        inherited_from: None,
    })
}

/// Falls back to the text before any initializer or accessor list
fn name_from_text(text: &str) -> String {
    let end = text.find(|c: char| c == '=' || c == '[').unwrap_or(text.len());
    text[..end].trim().to_string()
}

/// Removes every whole-word occurrence of `modifier`
pub fn strip_modifier(type_text: &str, modifier: &str) -> String {
    type_text
        .split_whitespace()
        .filter(|word| *word != modifier)
        .collect::<Vec<_>>()
        .join(" ")
}

fn accessor_group(text: &str) -> Option<String> {
    let start = text.find('[')?;
    let end = start + text[start..].find(']')?;
    Some(text[start..=end].to_string())
}

/// Brief text of a `memdesc` row
///
/// The trailing link back to the member's detail block ("More...",
/// "詳解...") is recognised by its fragment, not its label.
fn brief_summary(row: ElementRef<'_>, key: &str) -> Option<String> {
    let cell = select_in(row, "td.mdescRight").into_iter().next()?;

    let text = cell
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != cell.id())
                .filter_map(ElementRef::wrap)
                .any(|ancestor| links_to_anchor(ancestor, key))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| collapse_whitespace(text))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!text.is_empty()).then_some(text)
}

fn links_to_anchor(element: ElementRef<'_>, key: &str) -> bool {
    element.value().name() == "a"
        && element
            .value()
            .attr("href")
            .and_then(|href| href.split_once('#'))
            .is_some_and(|(_, fragment)| fragment == key)
}

/// Resolves a member anchor to the paragraph text of its detail block
///
/// The block is the first `div.memitem` after the anchor element, as long as
/// no other anchor comes first.
fn detail_description(anchors: &AnchorIndex<'_>, anchor: &str) -> Option<String> {
    let target = anchors.get(anchor)?;

    let block = target
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|element| element.value().attr("id").is_none())
        .find(|element| element.value().name() == "div" && has_class(*element, "memitem"))?;

    let doc = select_in(block, "div.memdoc").into_iter().next()?;
    let paragraphs: Vec<String> = select_in(doc, "p")
        .into_iter()
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect();

    let text = if paragraphs.is_empty() {
        element_text(doc)
    } else {
        paragraphs.join("\n")
    };

    (!text.is_empty()).then_some(text)
}
