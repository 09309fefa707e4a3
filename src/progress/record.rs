use crate::model::{EntityDescriptor, EntityKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Column names of the progress file, in file order
pub const HEADERS: [&str; 8] = [
    "full_name",
    "name",
    "locator",
    "kind",
    "namespace",
    "summary",
    "completed",
    "last_updated",
];

/// One row of the progress file
///
/// Field order matches `HEADERS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub full_name: String,
    pub name: String,
    pub locator: String,
    pub kind: EntityKind,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub summary: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub completed: bool,
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub last_updated: Option<DateTime<Utc>>,
}

impl CrawlRecord {
    /// A fresh pending record for an entity
    pub fn pending(descriptor: &EntityDescriptor) -> Self {
        Self {
            full_name: descriptor.full_name.clone(),
            name: descriptor.name.clone(),
            locator: descriptor.locator.clone(),
            kind: descriptor.kind,
            namespace: descriptor.namespace.clone(),
            summary: descriptor.summary.clone(),
            completed: false,
            last_updated: None,
        }
    }

    pub fn to_descriptor(&self) -> EntityDescriptor {
        EntityDescriptor {
            name: self.name.clone(),
            full_name: self.full_name.clone(),
            namespace: self.namespace.clone(),
            kind: self.kind,
            locator: self.locator.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// Accepts the boolean spellings found in hand-edited or older files
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid completed value: {other:?}"
        ))),
    }
}

fn serialize_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
        None => serializer.serialize_str(""),
    }
}

/// Reads RFC 3339, or a zone-less ISO timestamp taken as UTC
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| serde::de::Error::custom(format!("invalid last_updated {raw:?}: {e}")))
}
