/// Kinds of documented entities and their members
///
/// These are the tags stored in the progress table and written to rendered
/// output, so their string forms are part of the on-disk format.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a documented entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Interface,
    Struct,
    Enum,
}

impl EntityKind {
    /// Returns the lowercase tag used in storage and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Struct => "struct",
            Self::Enum => "enum",
        }
    }

    /// Parses a stored tag
    ///
    /// Returns None if the string doesn't match any known kind.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "interface" => Some(Self::Interface),
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    /// Returns all kinds, in index rendering order
    pub fn all() -> [Self; 4] {
        [Self::Class, Self::Interface, Self::Struct, Self::Enum]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which collection of an entity a member lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Property,
    Field,
}

/// Whether a member belongs to instances or to the type itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Instance,
    Static,
}

impl Scope {
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static)
    }
}
