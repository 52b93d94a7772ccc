//! Loading and structural validation of source documents.
//!
//! Filtering works on a validated [`Document`]. A [`Validator`] turns a
//! [`SchemaSource`] into one; the [`StructuralValidator`] shipped here checks the
//! shape needed by the filters and nothing more. Plug a stricter implementation
//! through [`run_with`](crate::run_with) when full schema validation is required.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::Document;
use crate::options::is_yaml_path;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum SchemaSource {
    /// A document already parsed as JSON.
    Value(Value),
    /// A document already typed, for instance the output of a previous run.
    Document(Document),
    /// A JSON or YAML file.
    File(PathBuf),
}

impl From<&Path> for SchemaSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// Errors raised while loading or validating a source document.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ValidationError {
    /// The file cannot be read.
    #[display("Cannot read '{}': {error}", path.display())]
    #[from(skip)]
    Io {
        /// The file path.
        path: PathBuf,
        /// The I/O error.
        error: std::io::Error,
    },

    /// The JSON text cannot be parsed.
    #[display("Invalid JSON: {_0}")]
    Json(serde_json::Error),

    /// The YAML text cannot be parsed.
    #[cfg(feature = "yaml")]
    #[display("Invalid YAML: {_0}")]
    Yaml(serde_saphyr::Error),

    /// The file extension names a format that is not supported.
    #[display("Unsupported document format for '{}'", path.display())]
    #[from(skip)]
    UnsupportedFormat {
        /// The file path.
        path: PathBuf,
    },

    /// The document root is not an object.
    #[display("The document root must be an object")]
    NotAnObject,

    /// Neither a `swagger` nor an `openapi` version is given.
    #[display("The document must declare a 'swagger' or 'openapi' version")]
    MissingVersion,

    /// No `paths` object is given.
    #[display("The document must declare a 'paths' object")]
    MissingPaths,

    /// The document does not fit the expected structure.
    #[display("Invalid document structure: {_0}")]
    Structure(serde_path_to_error::Error<serde_json::Error>),
}

/// Turns a source into a validated document.
pub trait Validator {
    /// Loads and validates the source.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the source cannot be loaded or is invalid.
    fn validate(&self, source: SchemaSource) -> Result<Document, ValidationError>;
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, source: SchemaSource) -> Result<Document, ValidationError> {
        (**self).validate(source)
    }
}

/// Checks the document has a version and a `paths` object, and that every
/// operation has the expected shape.
///
/// It does not validate against the OpenAPI or Swagger schema, nor resolve `$ref`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    fn read(path: &Path) -> Result<Value, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|error| ValidationError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "document read");

        if is_yaml_path(path) {
            #[cfg(feature = "yaml")]
            return Ok(serde_saphyr::from_str(&content)?);
            #[cfg(not(feature = "yaml"))]
            return Err(ValidationError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn check(value: Value) -> Result<Document, ValidationError> {
        let root = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let has_version = ["swagger", "openapi"]
            .into_iter()
            .any(|key| root.get(key).is_some_and(Value::is_string));
        if !has_version {
            return Err(ValidationError::MissingVersion);
        }
        if !root.get("paths").is_some_and(Value::is_object) {
            return Err(ValidationError::MissingPaths);
        }

        let document = serde_path_to_error::deserialize(value)?;
        Ok(document)
    }
}

impl Validator for StructuralValidator {
    fn validate(&self, source: SchemaSource) -> Result<Document, ValidationError> {
        match source {
            SchemaSource::Document(document) => Ok(document),
            SchemaSource::Value(value) => Self::check(value),
            SchemaSource::File(path) => Self::check(Self::read(&path)?),
        }
    }
}
