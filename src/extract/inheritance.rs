use crate::extract::page::{element_text, select_in, DocPage};
use scraper::ElementRef;

/// Heading texts introducing an inheritance diagram
const DIAGRAM_TITLES: [&str; 2] = ["Inheritance diagram", "継承図"];

/// Collects base type names from both inheritance sources
///
/// 1. links inside `inherit_header` blocks ("... inherited from Base")
/// 2. links in the block following an inheritance diagram heading
///
/// A link whose text equals the page title, or one of `own_names`, refers
/// to the entity itself and is skipped. Names keep their first-seen order
/// and appear once.
pub fn extract_base_types(page: &DocPage, own_names: &[&str]) -> Vec<String> {
    let title = page.title();
    let mut bases: Vec<String> = Vec::new();

    let mut push = |name: String| {
        if name.is_empty() || bases.contains(&name) {
            return;
        }
        bases.push(name);
    };

    for header in page.select_all(".inherit_header") {
        for link in select_in(header, "a") {
            push(element_text(link));
        }
    }

    for heading in page.select_all("h2, h3, div.dynheader") {
        let heading_text = element_text(heading);
        if !DIAGRAM_TITLES.iter().any(|t| heading_text.contains(t)) {
            continue;
        }

        let Some(block) = heading.next_siblings().find_map(ElementRef::wrap) else {
            continue;
        };

        for name in diagram_links(block) {
            let is_self = title.as_deref() == Some(name.as_str()) || own_names.contains(&name.as_str());
            if !is_self {
                push(name);
            }
        }
    }

    bases
}

/// Link texts of a diagram block: `a.el` links plus image-map `area` alts
fn diagram_links(block: ElementRef<'_>) -> Vec<String> {
    let mut names: Vec<String> = select_in(block, "a.el")
        .into_iter()
        .map(element_text)
        .collect();

    names.extend(
        select_in(block, "area[alt]")
            .into_iter()
            .filter_map(|area| area.value().attr("alt"))
            .map(|alt| alt.trim().to_string()),
    );

    names
}
