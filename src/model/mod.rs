//! Data model shared by extraction, progress tracking and rendering
//!
//! - `EntityDescriptor`: one documented type as listed on the site index
//! - `EntityDetail`: everything extracted from that type's own page
//! - `Member`: one method, property or field row

mod kind;

pub use kind::{EntityKind, MemberKind, Scope};

use serde::{Deserialize, Serialize};

/// A documented entity as discovered on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Simple name (e.g. "Sound")
    pub name: String,

    /// Qualified name (e.g. "SharpKmyAudio.Sound"); unique within a crawl
    pub full_name: String,

    /// Namespace part of the qualified name; empty for global types
    pub namespace: String,

    pub kind: EntityKind,

    /// Page locator relative to the site base (e.g. "class_sharp_kmy_audio_1_1_sound.html")
    pub locator: String,

    /// One-line summary from the listing page
    #[serde(default)]
    pub summary: String,
}

/// One member row extracted from a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    pub scope: Scope,

    /// Left column text: return type for methods, value type otherwise
    pub declared_type: String,

    /// Right column text with type/identifier spacing repaired
    pub declaration: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Property accessor list such as "[get, set]"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessors: Option<String>,

    /// Base type this member was inherited from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}

impl Member {
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

/// Full extraction result for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDetail {
    pub descriptor: EntityDescriptor,
    pub description: String,
    pub base_types: Vec<String>,
    pub methods: Vec<Member>,
    pub properties: Vec<Member>,
    pub fields: Vec<Member>,
}

impl EntityDetail {
    /// Creates a detail with no extracted content
    pub fn empty(descriptor: EntityDescriptor) -> Self {
        Self {
            descriptor,
            description: String::new(),
            base_types: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Returns the member collection for a kind
    pub fn members(&self, kind: MemberKind) -> &[Member] {
        match kind {
            MemberKind::Method => &self.methods,
            MemberKind::Property => &self.properties,
            MemberKind::Field => &self.fields,
        }
    }

    pub(crate) fn members_mut(&mut self, kind: MemberKind) -> &mut Vec<Member> {
        match kind {
            MemberKind::Method => &mut self.methods,
            MemberKind::Property => &mut self.properties,
            MemberKind::Field => &mut self.fields,
        }
    }

    /// Total number of members across all collections
    pub fn member_count(&self) -> usize {
        self.methods.len() + self.properties.len() + self.fields.len()
    }
}
