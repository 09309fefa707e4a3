//! JSON rendering of entities

use crate::model::{EntityDescriptor, EntityDetail, Member, Scope};
use serde::Serialize;

/// JSON document written for each entity
#[derive(Debug, Serialize)]
pub struct EntityDocument<'a> {
    pub entity: EntityBlock<'a>,
    pub description: &'a str,
    pub base_types: &'a [String],
    pub methods: ScopedMembers<'a>,
    pub properties: &'a [Member],
    pub fields: &'a [Member],
}

#[derive(Debug, Serialize)]
pub struct EntityBlock<'a> {
    #[serde(flatten)]
    pub descriptor: &'a EntityDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<&'a str>,
}

/// Methods split by scope
#[derive(Debug, Serialize)]
pub struct ScopedMembers<'a> {
    pub instance: Vec<&'a Member>,
    #[serde(rename = "static")]
    pub static_members: Vec<&'a Member>,
}

impl<'a> ScopedMembers<'a> {
    fn split(members: &'a [Member]) -> Self {
        let (static_members, instance): (Vec<&Member>, Vec<&Member>) =
            members.iter().partition(|m| m.scope == Scope::Static);
        Self {
            instance,
            static_members,
        }
    }
}

impl<'a> EntityDocument<'a> {
    pub fn new(detail: &'a EntityDetail, document_url: Option<&'a str>) -> Self {
        Self {
            entity: EntityBlock {
                descriptor: &detail.descriptor,
                document_url,
            },
            description: &detail.description,
            base_types: &detail.base_types,
            methods: ScopedMembers::split(&detail.methods),
            properties: &detail.properties,
            fields: &detail.fields,
        }
    }
}

/// Renders one entity as pretty-printed JSON
pub fn format_entity_json(
    detail: &EntityDetail,
    document_url: Option<&str>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&EntityDocument::new(detail, document_url))
}
