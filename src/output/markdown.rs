//! Markdown rendering of entities and the entity index

use crate::model::{EntityDescriptor, EntityDetail, EntityKind, Member, Scope};
use std::collections::BTreeMap;

/// Heading used for entities without a namespace
pub const GLOBAL_NAMESPACE: &str = "Global";

/// Formats one entity as a Markdown page
pub fn format_entity_markdown(detail: &EntityDetail, document_url: Option<&str>) -> String {
    let info = &detail.descriptor;
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", info.full_name));

    md.push_str("## Information\n\n");
    md.push_str(&format!("- **Kind**: {}\n", info.kind));
    md.push_str(&format!("- **Namespace**: {}\n", namespace_label(info)));
    md.push_str(&format!("- **Full Name**: {}\n", info.full_name));
    if let Some(url) = document_url {
        md.push_str(&format!("- **Documentation**: {}\n", url));
    }
    md.push('\n');

    if !detail.description.is_empty() {
        md.push_str("## Description\n\n");
        md.push_str(&detail.description);
        md.push_str("\n\n");
    } else if !info.summary.is_empty() {
        md.push_str("## Description\n\n");
        md.push_str(&info.summary);
        md.push_str("\n\n");
    }

    if !detail.base_types.is_empty() {
        md.push_str("## Inheritance\n\n");
        for base in &detail.base_types {
            md.push_str(&format!("- `{}`\n", base));
        }
        md.push('\n');
    }

    if !detail.properties.is_empty() {
        md.push_str("## Properties\n\n");
        for property in own(&detail.properties) {
            md.push_str(&format!("### {}\n\n", property.name));
            md.push_str(&format!("- **Type**: `{}`\n", property.declared_type));
            if property.scope == Scope::Static {
                md.push_str("- **Static**: yes\n");
            }
            if let Some(accessors) = &property.accessors {
                md.push_str(&format!("- **Accessors**: {}\n", accessors));
            }
            if let Some(text) = member_text(property) {
                md.push_str(&format!("- **Description**: {}\n", text));
            }
            md.push('\n');
        }
        push_inherited(&mut md, "Inherited Properties", &detail.properties);
    }

    if !detail.methods.is_empty() {
        md.push_str("## Methods\n\n");
        for scope in [Scope::Instance, Scope::Static] {
            let methods: Vec<&Member> = own(&detail.methods)
                .filter(|m| m.scope == scope)
                .collect();
            if methods.is_empty() {
                continue;
            }
            if scope == Scope::Static {
                md.push_str("### Static Methods\n\n");
            }
            for method in methods {
                push_method(&mut md, method);
            }
        }
        push_inherited(&mut md, "Inherited Methods", &detail.methods);
    }

    if !detail.fields.is_empty() {
        md.push_str("## Fields\n\n");
        let mut any_own = false;
        for field in own(&detail.fields) {
            let marker = if field.scope == Scope::Static { " (static)" } else { "" };
            md.push_str(&format!(
                "- `{} {}`{}",
                field.declared_type, field.name, marker
            ));
            if let Some(text) = member_text(field) {
                md.push_str(&format!(": {}", text));
            }
            md.push('\n');
            any_own = true;
        }
        if any_own {
            md.push('\n');
        }
        push_inherited(&mut md, "Inherited Fields", &detail.fields);
    }

    md
}

/// Formats the index of all entities
///
/// Entities are grouped by namespace (sorted), then by kind, then sorted by
/// simple name. Each entry links to `<classes_link>/<full_name>.md`.
pub fn format_index_markdown(entities: &[EntityDescriptor], classes_link: &str) -> String {
    let mut md = String::new();
    md.push_str("# API Reference Index\n\n");
    md.push_str(&format!("{} documented types.\n\n", entities.len()));

    let mut by_namespace: BTreeMap<&str, Vec<&EntityDescriptor>> = BTreeMap::new();
    for entity in entities {
        by_namespace
            .entry(namespace_label(entity))
            .or_default()
            .push(entity);
    }

    for (namespace, members) in by_namespace {
        md.push_str(&format!("## {}\n\n", namespace));

        for kind in EntityKind::all() {
            let mut of_kind: Vec<&EntityDescriptor> =
                members.iter().copied().filter(|e| e.kind == kind).collect();
            if of_kind.is_empty() {
                continue;
            }
            of_kind.sort_by(|a, b| a.name.cmp(&b.name));

            md.push_str(&format!("### {}\n\n", kind_heading(kind)));
            for entity in of_kind {
                md.push_str(&format!(
                    "- [{}]({}/{}.md)",
                    entity.full_name,
                    classes_link,
                    super::file_stem(&entity.full_name)
                ));
                if !entity.summary.is_empty() {
                    md.push_str(&format!(" - {}", entity.summary));
                }
                md.push('\n');
            }
            md.push('\n');
        }
    }

    md
}

fn namespace_label(entity: &EntityDescriptor) -> &str {
    if entity.namespace.is_empty() {
        GLOBAL_NAMESPACE
    } else {
        &entity.namespace
    }
}

fn kind_heading(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Class => "Classes",
        EntityKind::Interface => "Interfaces",
        EntityKind::Struct => "Structs",
        EntityKind::Enum => "Enums",
    }
}

fn own(members: &[Member]) -> impl Iterator<Item = &Member> {
    members.iter().filter(|m| !m.is_inherited())
}

/// Long description if present, otherwise the brief summary
fn member_text(member: &Member) -> Option<&str> {
    member
        .description
        .as_deref()
        .or(member.summary.as_deref())
}

fn push_method(md: &mut String, method: &Member) {
    md.push_str(&format!("#### {}\n\n", method.name));
    let line = format!("{} {}", method.declared_type, method.declaration);
    md.push_str(&format!("```\n{}\n```\n\n", line.trim()));
    if let Some(text) = member_text(method) {
        md.push_str(text);
        md.push_str("\n\n");
    }
}

fn push_inherited(md: &mut String, heading: &str, members: &[Member]) {
    let inherited: Vec<&Member> = members.iter().filter(|m| m.is_inherited()).collect();
    if inherited.is_empty() {
        return;
    }

    md.push_str(&format!("### {}\n\n", heading));
    for member in inherited {
        md.push_str(&format!(
            "- `{}` (from `{}`)\n",
            member.name,
            member.inherited_from.as_deref().unwrap_or_default()
        ));
    }
    md.push('\n');
}
