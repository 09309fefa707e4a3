//! Extraction of API reference data from Doxygen pages
//!
//! - `parse_listing`: the class listing page → entity descriptors
//! - `MemberExtractor`: one detail page → `EntityDetail`
//!
//! Pages vary in which blocks they carry. A missing description, diagram
//! or member section is an empty contribution, never an error.

mod inheritance;
mod listing;
mod page;
mod sections;

pub use inheritance::extract_base_types;
pub use listing::parse_listing;
pub use page::{element_text, DocPage};
pub use sections::{strip_modifier, SectionSpec, DEFAULT_SECTIONS};

use crate::model::{EntityDescriptor, EntityDetail};
use sections::extract_section;

/// Builds `EntityDetail` values from detail pages
#[derive(Debug, Clone)]
pub struct MemberExtractor {
    sections: Vec<SectionSpec>,
}

impl Default for MemberExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SECTIONS.to_vec())
    }
}

impl MemberExtractor {
    /// Creates an extractor reading the given sections, in order
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Extracts everything known about one entity from its page
    ///
    /// # Example
    ///
    /// ```
    /// use doxygen_harvest::extract::{DocPage, MemberExtractor};
    /// use doxygen_harvest::model::{EntityDescriptor, EntityKind};
    ///
    /// let descriptor = EntityDescriptor {
    ///     name: "Sound".to_string(),
    ///     full_name: "SharpKmyAudio.Sound".to_string(),
    ///     namespace: "SharpKmyAudio".to_string(),
    ///     kind: EntityKind::Class,
    ///     locator: "class_sharp_kmy_audio_1_1_sound.html".to_string(),
    ///     summary: String::new(),
    /// };
    /// let page = DocPage::parse(r#"<div class="textblock"><p>Plays audio.</p></div>"#);
    /// let detail = MemberExtractor::default().extract(&page, &descriptor);
    /// assert_eq!(detail.description, "Plays audio.");
    /// assert!(detail.methods.is_empty());
    /// ```
    pub fn extract(&self, page: &DocPage, descriptor: &EntityDescriptor) -> EntityDetail {
        let mut detail = EntityDetail::empty(descriptor.clone());

        detail.description = page
            .select_all("div.textblock")
            .into_iter()
            .next()
            .map(element_text)
            .unwrap_or_default();

        detail.base_types = extract_base_types(
            page,
            &[descriptor.name.as_str(), descriptor.full_name.as_str()],
        );

        let anchors = page.anchors();
        for spec in &self.sections {
            let members = extract_section(&anchors, spec);
            if !members.is_empty() {
                tracing::debug!(
                    "{}: {} members in section {}",
                    descriptor.full_name,
                    members.len(),
                    spec.anchor
                );
            }
            detail.members_mut(spec.kind).extend(members);
        }

        detail
    }

    /// Parses page HTML and extracts from it
    pub fn extract_html(&self, html: &str, descriptor: &EntityDescriptor) -> EntityDetail {
        self.extract(&DocPage::parse(html), descriptor)
    }
}
