//! The filter stages.
//!
//! Every stage narrows a [`Document`] with the same rule: an `include` list keeps
//! what matches at least one entry, an `exclude` list keeps what matches none.
//! Stages only differ in what they look at (method token, path template, tags,
//! summary or description) and how an entry is matched.
//!
//! # Example
//!
//! ```rust
//! use specsieve_core::filter::{DocumentFilterExt, HttpFilter};
//! use specsieve_core::{Criterion, Document};
//!
//! let document: Document = serde_json::from_value(serde_json::json!({
//!     "swagger": "2.0",
//!     "paths": {
//!         "/pet": { "get": {}, "post": {} },
//!         "/store/inventory": { "get": {} }
//!     }
//! }))?;
//!
//! let filter = HttpFilter::new(&Criterion::include(["POST"]));
//! let document = document.filter_with(&filter);
//!
//! assert_eq!(document.paths.keys().collect::<Vec<_>>(), ["/pet"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::{debug, trace};

use crate::options::{Criterion, Stage};
use crate::{Document, Operation, Pattern, SieveError};

mod field;
mod http;
mod path;
mod tag;

pub use self::field::{FieldFilter, TextField};
pub use self::http::HttpFilter;
pub use self::path::PathFilter;
pub use self::tag::TagFilter;

/// A compiled include/exclude criterion.
#[derive(Debug, Clone)]
pub enum Rule<M> {
    /// No list given: everything is kept.
    Pass,
    /// Keep what matches at least one entry.
    Include(Vec<M>),
    /// Keep what matches no entry.
    Exclude(Vec<M>),
}

impl<M> Default for Rule<M> {
    fn default() -> Self {
        Self::Pass
    }
}

impl Rule<String> {
    /// Reads the active list of a criterion.
    ///
    /// Empty lists give [`Rule::Pass`]. When both lists are present the include
    /// list wins; the pipeline rejects that configuration beforehand.
    #[must_use]
    pub fn from_criterion(criterion: &Criterion) -> Self {
        match (criterion.include.as_deref(), criterion.exclude.as_deref()) {
            (Some(include), _) if !include.is_empty() => Self::Include(include.to_vec()),
            (_, Some(exclude)) if !exclude.is_empty() => Self::Exclude(exclude.to_vec()),
            _ => Self::Pass,
        }
    }

    /// Compiles every entry as a `/body/flags` [`Pattern`].
    ///
    /// # Errors
    ///
    /// Returns the error of the first entry that is not a valid pattern.
    pub fn into_patterns(self) -> Result<Rule<Pattern>, SieveError> {
        self.try_map(|entry| Pattern::parse(&entry))
    }
}

impl<M> Rule<M> {
    /// Converts every entry, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `convert`.
    pub fn try_map<N, E, F>(self, convert: F) -> Result<Rule<N>, E>
    where
        F: FnMut(M) -> Result<N, E>,
    {
        let rule = match self {
            Self::Pass => Rule::Pass,
            Self::Include(entries) => {
                Rule::Include(entries.into_iter().map(convert).collect::<Result<_, _>>()?)
            }
            Self::Exclude(entries) => {
                Rule::Exclude(entries.into_iter().map(convert).collect::<Result<_, _>>()?)
            }
        };
        Ok(rule)
    }

    /// Returns `true` if the rule keeps everything.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Decides whether an item is kept, `matches` telling if it matches one entry.
    pub fn keeps<F>(&self, matches: F) -> bool
    where
        F: FnMut(&M) -> bool,
    {
        match self {
            Self::Pass => true,
            Self::Include(entries) => entries.iter().any(matches),
            Self::Exclude(entries) => !entries.iter().any(matches),
        }
    }
}

/// A stage narrowing a document.
pub trait DocumentFilter {
    /// The stage implemented by this filter.
    fn stage(&self) -> Stage;

    /// Narrows the document.
    fn filter(&self, document: Document) -> Document;
}

/// Extension trait for applying a filter to a document.
pub trait DocumentFilterExt {
    /// Narrows this document with `filter`.
    #[must_use]
    fn filter_with<F: DocumentFilter + ?Sized>(self, filter: &F) -> Self;
}

impl DocumentFilterExt for Document {
    fn filter_with<F: DocumentFilter + ?Sized>(self, filter: &F) -> Self {
        filter.filter(self)
    }
}

/// Drops the operations failing `keep`, then the paths left without operation.
pub(crate) fn retain_operations<F>(stage: Stage, mut document: Document, mut keep: F) -> Document
where
    F: FnMut(&str, &str, &Operation) -> bool,
{
    let operations_before = document.operation_count();
    let paths_before = document.paths.len();

    for (path, item) in &mut document.paths {
        item.operations.retain(|method, operation| {
            let kept = keep(path, method, operation);
            if !kept {
                trace!(%stage, %path, %method, "operation removed");
            }
            kept
        });
    }
    document.paths.retain(|_, item| !item.has_no_operation());

    debug!(
        %stage,
        operations = operations_before - document.operation_count(),
        paths = paths_before - document.paths.len(),
        "stage removed operations"
    );
    document
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    use crate::Document;

    /// A reduced Petstore with every case the stages care about.
    pub(crate) fn document() -> Document {
        serde_json::from_value(json!({
            "swagger": "2.0",
            "tags": [
                { "name": "pet" },
                { "name": "store" },
                { "name": "user" }
            ],
            "paths": {
                "/pet": {
                    "post": { "tags": ["pet"], "summary": "Add a new pet to the store" },
                    "put": { "tags": ["pet"], "summary": "Update an existing pet" }
                },
                "/pet/{petId}": {
                    "parameters": [{ "name": "petId", "in": "path", "required": true }],
                    "x-owner": "pets-team",
                    "get": {
                        "tags": ["pet"],
                        "summary": "Find pet by ID",
                        "description": "Returns a single pet"
                    },
                    "delete": { "tags": ["pet"], "summary": "Deletes a pet" }
                },
                "/store/inventory": {
                    "get": {
                        "tags": ["store"],
                        "summary": "Returns pet inventories by status",
                        "description": "Returns a map of status codes to quantities"
                    }
                },
                "/user/logout": {
                    "get": { "summary": "Logs out current logged in user session" }
                },
                "/user/{username}": {
                    "put": { "tags": [], "description": "This can only be done by the logged in user." }
                }
            }
        }))
        .expect("valid document")
    }

    pub(crate) fn operations(document: &Document) -> Vec<String> {
        document
            .operations()
            .map(|(path, method, _)| format!("{method} {path}"))
            .collect()
    }
}
