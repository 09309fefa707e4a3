use crate::extract::page::{element_text, select_in, DocPage};
use crate::locator::LocatorScheme;
use crate::model::EntityDescriptor;
use scraper::ElementRef;
use std::collections::HashSet;

/// Parses the site's class listing page into entity descriptors
///
/// Entity links live in `div.directory`; each link's summary is the text
/// of the table cell after the one holding the link. Links whose locator
/// has no known kind prefix (namespaces, files) are skipped, as are repeats
/// of an already listed qualified name. Listing order is preserved.
pub fn parse_listing(html: &str, scheme: &LocatorScheme) -> Vec<EntityDescriptor> {
    let page = DocPage::parse(html);
    let mut entities = Vec::new();

    let Some(directory) = page.select_all("div.directory").into_iter().next() else {
        tracing::warn!("Could not find directory block in listing page");
        return entities;
    };

    let mut seen = HashSet::new();

    for link in select_in(directory, "a[href]") {
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let Some(decoded) = scheme.decode(href) else {
            continue;
        };

        if !seen.insert(decoded.qualified_name.clone()) {
            tracing::debug!("Skipping repeated listing entry {}", decoded.qualified_name);
            continue;
        }

        let summary = link_summary(link);
        let descriptor = decoded.into_descriptor(href, &summary);
        tracing::debug!("Found {}: {}", descriptor.kind, descriptor.full_name);
        entities.push(descriptor);
    }

    tracing::info!("Extracted {} entities from listing page", entities.len());
    entities
}

fn link_summary(link: ElementRef<'_>) -> String {
    link.parent()
        .and_then(ElementRef::wrap)
        .filter(|cell| cell.value().name() == "td")
        .and_then(|cell| {
            cell.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "td")
        })
        .map(element_text)
        .unwrap_or_default()
}
