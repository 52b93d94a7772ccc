//! Object model of the API description documents being filtered.
//!
//! Only the parts of an OpenAPI/Swagger document that filtering needs are typed:
//! the `paths` tree, the operations it holds and the top-level `tags` list.
//! Every other key is kept verbatim so that a filtered document has the same
//! shape as its input.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// The tag an operation without tags is considered to carry.
pub const DEFAULT_TAG: &str = "default";

/// Keys of a path item that hold an operation.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Returns `true` if the path item key names an HTTP method.
#[must_use]
pub fn is_http_method(key: &str) -> bool {
    HTTP_METHODS
        .iter()
        .any(|method| method.eq_ignore_ascii_case(key))
}

/// An OpenAPI/Swagger document.
///
/// Serialized keys come in a canonical order: the verbatim keys in their input
/// order, then `tags`, then `paths`.
///
/// # Example
///
/// ```rust
/// use specsieve_core::Document;
///
/// let document: Document = serde_json::from_value(serde_json::json!({
///     "swagger": "2.0",
///     "paths": {
///         "/pet": { "get": { "tags": ["pet"] } }
///     }
/// }))?;
///
/// assert_eq!(document.operation_count(), 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Every top-level key other than `tags` and `paths`, kept verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,

    /// Top-level tag declarations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagDeclaration>>,

    /// Path templates and their operations, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

impl Document {
    /// Iterates over every operation as `(path, method, operation)`.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations
                .iter()
                .map(move |(method, operation)| (path.as_str(), method.as_str(), operation))
        })
    }

    /// Number of operations across all paths.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations.len()).sum()
    }

    /// Names of the top-level tag declarations, in declaration order.
    pub fn declared_tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .flatten()
            .map(|declaration| declaration.name.as_str())
    }

    /// Removes a top-level key that is neither `paths` nor `tags`.
    pub fn remove_top_level(&mut self, key: &str) -> Option<Value> {
        self.other.shift_remove(key)
    }
}

/// The operations available on a single path.
///
/// Keys naming an HTTP method are parsed as [`Operation`]s, any other key
/// (`parameters`, `$ref`, `servers`, `x-*`, ...) is kept in [`PathItem::other`].
/// These other keys are serialized first, then the operations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct PathItem {
    /// Operations keyed by their method token.
    pub operations: IndexMap<String, Operation>,

    /// Keys that are not operations.
    pub other: Map<String, Value>,
}

impl PathItem {
    /// Returns `true` if no operation is left on this path.
    #[must_use]
    pub fn has_no_operation(&self) -> bool {
        self.operations.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut item = Self::default();
        for (key, value) in map {
            if is_http_method(&key) {
                let operation = serde_json::from_value(value)?;
                item.operations.insert(key, operation);
            } else {
                item.other.insert(key, value);
            }
        }
        Ok(item)
    }
}

impl Serialize for PathItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.operations.len() + self.other.len()))?;
        for (key, value) in &self.other {
            map.serialize_entry(key, value)?;
        }
        for (method, operation) in &self.operations {
            map.serialize_entry(method, operation)?;
        }
        map.end()
    }
}

/// A single API operation.
///
/// `tags`, `summary` and `description` are serialized first, then the other keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Tags declared on the operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Every other key, kept verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Operation {
    /// Tags used when matching this operation.
    ///
    /// These are the declared tags, or [`DEFAULT_TAG`] alone when the operation
    /// declares none (absent or empty list). The operation itself is never modified.
    ///
    /// ```rust
    /// use specsieve_core::Operation;
    ///
    /// let untagged = Operation::default();
    /// assert_eq!(untagged.effective_tags().collect::<Vec<_>>(), ["default"]);
    /// assert!(untagged.tags.is_none());
    /// ```
    pub fn effective_tags(&self) -> impl Iterator<Item = &str> {
        let declared = self.tags.as_deref().unwrap_or_default();
        let fallback = declared.is_empty().then_some(DEFAULT_TAG);
        declared.iter().map(String::as_str).chain(fallback)
    }

    /// Returns `true` if `name` is one of the [effective tags](Self::effective_tags).
    #[must_use]
    pub fn has_effective_tag(&self, name: &str) -> bool {
        self.effective_tags().any(|tag| tag == name)
    }
}

/// A top-level tag declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDeclaration {
    /// The tag name.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Every other key (`externalDocs`, `x-*`, ...), kept verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl TagDeclaration {
    /// Creates a declaration with a name and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
