//! YAML serialization support using serde-saphyr.
//!
//! This module is only available when the `yaml` feature is enabled.
//!
//! # Example
//!
//! ```rust
//! use specsieve_core::{FilterOptions, ToYaml, run};
//!
//! let source = serde_json::json!({ "openapi": "3.0.3", "paths": {} });
//! let document = run(source, &FilterOptions::default())?;
//!
//! let yaml = document.to_yaml()?;
//! assert!(yaml.starts_with("openapi: 3.0.3"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::Serialize;

/// Error type for YAML serialization operations.
pub type YamlError = serde_saphyr::ser_error::Error;

/// Extension trait for serializing types to YAML.
///
/// This trait is implemented for all types that implement [`Serialize`],
/// filtered [`Document`](crate::Document)s in particular.
pub trait ToYaml: Serialize + Sized {
    /// Serializes this value to a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`YamlError`] if serialization fails.
    fn to_yaml(&self) -> Result<String, YamlError> {
        serde_saphyr::to_string(self)
    }
}

impl<T: Serialize + Sized> ToYaml for T {}
