//! # Specsieve Core
//!
//! Produce a reduced copy of an OpenAPI/Swagger document, keeping only the
//! operations that satisfy declarative include/exclude criteria.
//!
//! A run goes through three phases:
//! 1. **validation**: the source is loaded and checked by a [`Validator`],
//!    and the top-level `definitions` key is removed
//! 2. **filtering**: five stages narrow the `paths` tree, always in this order:
//!    `http`, `paths`, `tags`, `summary`, `description`
//! 3. **cleanup**: top-level tag declarations no longer referenced are removed
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use specsieve_core::{Criterion, FilterOptions, Filters, run};
//!
//! let source = json!({
//!     "swagger": "2.0",
//!     "tags": [{ "name": "pet" }, { "name": "store" }],
//!     "paths": {
//!         "/pet": {
//!             "post": { "tags": ["pet"], "summary": "Add a new pet to the store" }
//!         },
//!         "/store/inventory": {
//!             "get": { "tags": ["store"], "summary": "Returns pet inventories by status" }
//!         }
//!     }
//! });
//!
//! let options = FilterOptions::new(
//!     Filters::default().with_tags(Criterion::include(["/^pet$/i"])),
//! );
//! let document = run(source, &options)?;
//!
//! assert_eq!(document.paths.keys().collect::<Vec<_>>(), ["/pet"]);
//! assert_eq!(document.declared_tag_names().collect::<Vec<_>>(), ["pet"]);
//! # Ok::<(), specsieve_core::SieveError>(())
//! ```
//!
//! ## Filter stages
//!
//! Each stage accepts either an `include` list (keep what matches at least one
//! entry) or an `exclude` list (keep what matches none), never both:
//!
//! | Stage         | Matches                     | Entries                     |
//! |---------------|-----------------------------|-----------------------------|
//! | `http`        | method token                | literal, case-insensitive   |
//! | `paths`       | path template               | `/body/flags` [`Pattern`]   |
//! | `tags`        | operation tags              | `/body/flags` [`Pattern`]   |
//! | `summary`     | operation summary           | `/body/flags` [`Pattern`]   |
//! | `description` | operation description       | `/body/flags` [`Pattern`]   |
//!
//! Operations without tags match as if tagged `default`. Operations without a
//! summary (resp. description) are dropped by an active `summary`
//! (resp. `description`) stage. Paths left without operations are dropped.
//!
//! ## Loading configuration
//!
//! [`FilterOptions`] deserialize from JSON, or YAML with the `yaml` feature:
//!
//! ```rust
//! use specsieve_core::FilterOptions;
//!
//! let options = FilterOptions::from_json_str(r#"{
//!     "filters": {
//!         "http": { "include": ["get", "delete"] },
//!         "paths": { "exclude": ["//pet/findByStatus/"] }
//!     }
//! }"#)?;
//! # Ok::<(), specsieve_core::SieveError>(())
//! ```

mod cleanup;
mod error;
pub mod filter;
mod model;
mod options;
mod pattern;
mod pipeline;
pub mod validate;

#[cfg(feature = "yaml")]
mod yaml;

pub use self::cleanup::prune_tags;
pub use self::error::{ERROR_INCLUDE_EXCLUDE, SieveError};
pub use self::model::{
    DEFAULT_TAG, Document, HTTP_METHODS, Operation, PathItem, TagDeclaration, is_http_method,
};
pub use self::options::{Criterion, FilterOptions, Filters, Stage, is_yaml_path};
pub use self::pattern::Pattern;
pub use self::pipeline::{Phase, STRIPPED_KEY, Sieve, run, run_with, sieve};
pub use self::validate::{SchemaSource, StructuralValidator, ValidationError, Validator};

#[cfg(feature = "yaml")]
pub use self::yaml::{ToYaml, YamlError};
