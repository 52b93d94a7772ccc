//! Filter configuration.
//!
//! A configuration names up to five stages, each with either an `include` or an
//! `exclude` list:
//!
//! ```json
//! {
//!   "filters": {
//!     "http": { "include": ["get", "delete"] },
//!     "paths": { "exclude": ["//pet/findByStatus/"] },
//!     "tags": { "exclude": ["/^default$/i", "/Store/i"] },
//!     "summary": { "include": ["/Find pet by ID/"] },
//!     "description": { "include": ["/Returns a single pet/"] }
//!   }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SieveError;

/// The filter stages, in the order the pipeline runs them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum Stage {
    /// HTTP methods, matched literally.
    #[display("http")]
    Http,
    /// Path templates.
    #[display("paths")]
    Paths,
    /// Operation tags.
    #[display("tags")]
    Tags,
    /// Operation summaries.
    #[display("summary")]
    Summary,
    /// Operation descriptions.
    #[display("description")]
    Description,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Http,
        Self::Paths,
        Self::Tags,
        Self::Summary,
        Self::Description,
    ];
}

/// The include or exclude lists of one stage.
///
/// At most one of the two lists may be given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Keep only what matches at least one entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// Keep only what matches no entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl Criterion {
    /// A criterion keeping what matches one of `entries`.
    pub fn include<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Some(entries.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    /// A criterion keeping what matches none of `entries`.
    pub fn exclude<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: None,
            exclude: Some(entries.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns `true` if a non-empty list is given.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let non_empty = |list: &Option<Vec<String>>| list.as_ref().is_some_and(|it| !it.is_empty());
        non_empty(&self.include) || non_empty(&self.exclude)
    }

    /// Returns `false` if both lists are present, even when empty.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.include.is_none() || self.exclude.is_none()
    }
}

/// The per-stage criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// HTTP method tokens, compared case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<Criterion>,

    /// `/body/flags` patterns matched against path templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Criterion>,

    /// `/body/flags` patterns matched against operation tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Criterion>,

    /// `/body/flags` patterns matched against operation summaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Criterion>,

    /// `/body/flags` patterns matched against operation descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Criterion>,
}

impl Filters {
    /// Sets the HTTP method criterion.
    #[must_use]
    pub fn with_http(mut self, criterion: Criterion) -> Self {
        self.http = Some(criterion);
        self
    }

    /// Sets the path criterion.
    #[must_use]
    pub fn with_paths(mut self, criterion: Criterion) -> Self {
        self.paths = Some(criterion);
        self
    }

    /// Sets the tag criterion.
    #[must_use]
    pub fn with_tags(mut self, criterion: Criterion) -> Self {
        self.tags = Some(criterion);
        self
    }

    /// Sets the summary criterion.
    #[must_use]
    pub fn with_summary(mut self, criterion: Criterion) -> Self {
        self.summary = Some(criterion);
        self
    }

    /// Sets the description criterion.
    #[must_use]
    pub fn with_description(mut self, criterion: Criterion) -> Self {
        self.description = Some(criterion);
        self
    }

    /// The criterion configured for `stage`, if any.
    #[must_use]
    pub fn criterion(&self, stage: Stage) -> Option<&Criterion> {
        match stage {
            Stage::Http => self.http.as_ref(),
            Stage::Paths => self.paths.as_ref(),
            Stage::Tags => self.tags.as_ref(),
            Stage::Summary => self.summary.as_ref(),
            Stage::Description => self.description.as_ref(),
        }
    }

    /// Returns `true` if `stage` has a non-empty include or exclude list.
    #[must_use]
    pub fn is_filter_available(&self, stage: Stage) -> bool {
        self.criterion(stage).is_some_and(Criterion::is_active)
    }

    /// Returns `false` if `stage` declares both an include and an exclude list.
    #[must_use]
    pub fn check_include_exclude_validity(&self, stage: Stage) -> bool {
        self.criterion(stage).is_none_or(Criterion::is_exclusive)
    }

    /// Checks every stage, in pipeline order.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::IncludeExcludeConflict`] for the first stage declaring
    /// both lists.
    pub fn validate(&self) -> Result<(), SieveError> {
        match Stage::ALL
            .into_iter()
            .find(|stage| !self.check_include_exclude_validity(*stage))
        {
            Some(stage) => Err(SieveError::IncludeExcludeConflict { stage }),
            None => Ok(()),
        }
    }
}

/// Options of a filtering run.
///
/// Without `filters`, a run keeps every operation: it only strips `definitions`
/// and prunes the unused tag declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// The stage criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
}

impl FilterOptions {
    /// Options applying the given filters.
    #[must_use]
    pub fn new(filters: Filters) -> Self {
        Self {
            filters: Some(filters),
        }
    }

    /// Reads options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidOptions`] if the JSON does not describe options.
    pub fn from_json_str(json: &str) -> Result<Self, SieveError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(deserializer).map_err(|error| {
            SieveError::InvalidOptions {
                message: error.to_string(),
            }
        })
    }

    /// Reads options from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidOptions`] if the YAML does not describe options.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SieveError> {
        serde_saphyr::from_str(yaml).map_err(|error| SieveError::InvalidOptions {
            message: error.to_string(),
        })
    }

    /// Reads options from a file, YAML for `.yaml`/`.yml` extensions, JSON otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidOptions`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SieveError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|error| SieveError::InvalidOptions {
                message: format!("cannot read {}: {error}", path.display()),
            })?;

        if is_yaml_path(path) {
            #[cfg(feature = "yaml")]
            return Self::from_yaml_str(&content);
            #[cfg(not(feature = "yaml"))]
            return Err(SieveError::InvalidOptions {
                message: format!("cannot read {}: YAML support is disabled", path.display()),
            });
        }
        Self::from_json_str(&content)
    }
}

/// Returns `true` if the file extension is `yaml` or `yml`, ignoring case.
///
/// Files and outputs with another extension, or none, are treated as JSON.
#[must_use]
pub fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
