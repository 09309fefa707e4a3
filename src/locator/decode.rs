use crate::model::{EntityDescriptor, EntityKind};

/// Describes how a site encodes qualified names into page locators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorScheme {
    /// Kind prefixes, tried in order; the first match wins
    pub prefixes: Vec<(String, EntityKind)>,

    /// Token standing in for the namespace delimiter (Doxygen: "_1_1")
    pub namespace_token: String,

    /// Delimiter used in qualified names
    pub namespace_delimiter: char,

    /// Separator placed before each encoded uppercase letter
    pub word_separator: char,

    /// Page file extension
    pub extension: String,
}

impl Default for LocatorScheme {
    fn default() -> Self {
        Self {
            prefixes: vec![
                ("class_".to_string(), EntityKind::Class),
                ("struct_".to_string(), EntityKind::Struct),
                ("interface_".to_string(), EntityKind::Interface),
                ("enum_".to_string(), EntityKind::Enum),
            ],
            namespace_token: "_1_1".to_string(),
            namespace_delimiter: '.',
            word_separator: '_',
            extension: ".html".to_string(),
        }
    }
}

/// A qualified name recovered from a locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub kind: EntityKind,
    pub qualified_name: String,
    pub namespace: String,
    pub simple_name: String,
}

impl DecodedName {
    /// Builds a descriptor for this name
    pub fn into_descriptor(self, locator: &str, summary: &str) -> EntityDescriptor {
        EntityDescriptor {
            name: self.simple_name,
            full_name: self.qualified_name,
            namespace: self.namespace,
            kind: self.kind,
            locator: locator.to_string(),
            summary: summary.to_string(),
        }
    }
}

impl LocatorScheme {
    /// Decodes a locator into a qualified name
    ///
    /// Returns None when the locator does not start with a known kind prefix,
    /// meaning it does not reference an entity page (namespace pages, file
    /// pages and so on). Any other input decodes to a best-effort name; this
    /// never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use doxygen_harvest::locator::LocatorScheme;
    ///
    /// let decoded = LocatorScheme::default()
    ///     .decode("class_sharp_kmy_audio_1_1_sound.html")
    ///     .unwrap();
    /// assert_eq!(decoded.qualified_name, "SharpKmyAudio.Sound");
    /// assert_eq!(decoded.namespace, "SharpKmyAudio");
    /// assert_eq!(decoded.simple_name, "Sound");
    /// ```
    pub fn decode(&self, locator: &str) -> Option<DecodedName> {
        let locator = locator.split('#').next().unwrap_or(locator);
        let stem = locator.strip_suffix(self.extension.as_str()).unwrap_or(locator);

        let (encoded, kind) = self
            .prefixes
            .iter()
            .find_map(|(prefix, kind)| stem.strip_prefix(prefix.as_str()).map(|rest| (rest, *kind)))?;

        let delimiter = self.namespace_delimiter.to_string();
        let path = if self.namespace_token.is_empty() {
            encoded.to_string()
        } else {
            encoded.replace(self.namespace_token.as_str(), &delimiter)
        };

        let segments: Vec<String> = path
            .split(self.namespace_delimiter)
            .map(|segment| self.camel_case(segment))
            .collect();

        let qualified_name = segments.join(&delimiter);
        let (simple_name, namespace) = match segments.split_last() {
            Some((last, rest)) => (last.clone(), rest.join(&delimiter)),
            None => (String::new(), String::new()),
        };

        Some(DecodedName {
            kind,
            qualified_name,
            namespace,
            simple_name,
        })
    }

    /// Joins separator-delimited words, capitalizing each one
    fn camel_case(&self, segment: &str) -> String {
        segment
            .split(self.word_separator)
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect()
    }
}

/// Decodes a locator with the default Doxygen scheme
pub fn decode_locator(locator: &str) -> Option<DecodedName> {
    LocatorScheme::default().decode(locator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
