//! The filtering pipeline: validate, filter through the five stages, clean up.

use tracing::{debug, info_span, warn};

use crate::cleanup::prune_tags;
use crate::filter::{
    DocumentFilter, DocumentFilterExt, FieldFilter, HttpFilter, PathFilter, TagFilter,
};
use crate::options::{FilterOptions, Filters, Stage};
use crate::validate::{SchemaSource, StructuralValidator, Validator};
use crate::{Document, SieveError};

/// Top-level key removed from every validated document.
pub const STRIPPED_KEY: &str = "definitions";

/// Progress of a pipeline run, reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    /// Loading and validating the source document.
    #[display("validating")]
    Validating,
    /// Running the filter stages.
    #[display("filtering")]
    Filtering,
    /// Pruning unused tag declarations.
    #[display("cleaning-up")]
    CleaningUp,
    /// The filtered document is ready.
    #[display("done")]
    Done,
    /// The run was aborted, nothing is returned.
    #[display("failed")]
    Failed,
}

fn report_failure(error: &SieveError) {
    warn!(phase = %Phase::Failed, %error, "sieve aborted");
}

/// A validated and compiled filter configuration.
///
/// Building a `Sieve` checks every stage and compiles every pattern, so that a
/// configuration error never leaves a document half filtered. A `Sieve` can be
/// applied to any number of documents.
///
/// # Example
///
/// ```rust
/// use specsieve_core::{Criterion, FilterOptions, Filters, Sieve};
///
/// let options = FilterOptions::new(
///     Filters::default()
///         .with_http(Criterion::include(["get"]))
///         .with_tags(Criterion::exclude(["/^store$/i"])),
/// );
/// let sieve = Sieve::new(&options)?;
/// # Ok::<(), specsieve_core::SieveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Sieve {
    http: HttpFilter,
    paths: PathFilter,
    tags: TagFilter,
    summary: FieldFilter,
    description: FieldFilter,
}

impl Sieve {
    /// Validates and compiles the options.
    ///
    /// # Errors
    ///
    /// - [`SieveError::IncludeExcludeConflict`] if a stage declares both lists
    /// - a pattern error if an entry is not a valid `/body/flags` pattern
    pub fn new(options: &FilterOptions) -> Result<Self, SieveError> {
        let no_filters = Filters::default();
        let filters = options.filters.as_ref().unwrap_or(&no_filters);
        filters.validate()?;

        let criterion = |stage| filters.criterion(stage).cloned().unwrap_or_default();
        let sieve = Self {
            http: HttpFilter::new(&criterion(Stage::Http)),
            paths: PathFilter::new(&criterion(Stage::Paths))?,
            tags: TagFilter::new(&criterion(Stage::Tags))?,
            summary: FieldFilter::summary(&criterion(Stage::Summary))?,
            description: FieldFilter::description(&criterion(Stage::Description))?,
        };

        let active = Stage::ALL
            .into_iter()
            .filter(|stage| filters.is_filter_available(*stage))
            .collect::<Vec<_>>();
        debug!(?active, "filters compiled");
        Ok(sieve)
    }

    /// The filters, in pipeline order.
    fn stages(&self) -> [&dyn DocumentFilter; 5] {
        [
            &self.http,
            &self.paths,
            &self.tags,
            &self.summary,
            &self.description,
        ]
    }

    /// Filters the document through every stage, then prunes unused tags.
    #[must_use]
    pub fn apply(&self, document: Document) -> Document {
        let mut document = {
            let _span = info_span!("sieve", phase = %Phase::Filtering).entered();
            self.stages()
                .into_iter()
                .fold(document, |document, filter| document.filter_with(filter))
        };

        let _span = info_span!("sieve", phase = %Phase::CleaningUp).entered();
        prune_tags(&mut document);
        debug!(
            phase = %Phase::Done,
            paths = document.paths.len(),
            operations = document.operation_count(),
            "document filtered"
        );
        document
    }
}

/// Filters an already validated document.
///
/// The `definitions` key is removed whatever the options.
///
/// # Errors
///
/// Fails if the options are invalid; the document is then dropped untouched.
pub fn sieve(mut document: Document, options: &FilterOptions) -> Result<Document, SieveError> {
    let sieve = Sieve::new(options).inspect_err(report_failure)?;
    document.remove_top_level(STRIPPED_KEY);
    Ok(sieve.apply(document))
}

/// Validates the source with the [`StructuralValidator`], then filters it.
///
/// # Errors
///
/// Fails if the source is invalid or the options are invalid.
pub fn run(source: impl Into<SchemaSource>, options: &FilterOptions) -> Result<Document, SieveError> {
    run_with(&StructuralValidator, source, options)
}

/// Validates the source with `validator`, then filters it.
///
/// The source is validated first, so a document failing validation is reported
/// as such whatever the options. The options are then checked as a whole before
/// any stage runs.
///
/// # Errors
///
/// Fails with [`SieveError::Validation`] carrying the validator error unchanged,
/// or if the options are invalid.
pub fn run_with<V>(
    validator: &V,
    source: impl Into<SchemaSource>,
    options: &FilterOptions,
) -> Result<Document, SieveError>
where
    V: Validator + ?Sized,
{
    let mut document = {
        let _span = info_span!("sieve", phase = %Phase::Validating).entered();
        validator
            .validate(source.into())
            .map_err(SieveError::from)
            .inspect_err(report_failure)?
    };
    document.remove_top_level(STRIPPED_KEY);

    let sieve = Sieve::new(options).inspect_err(report_failure)?;
    Ok(sieve.apply(document))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::filter::fixtures;
    use crate::validate::ValidationError;
    use crate::{Criterion, Filters};

    fn conflict() -> Criterion {
        Criterion {
            include: Some(vec!["/a/".into()]),
            exclude: Some(vec!["/b/".into()]),
        }
    }

    #[test]
    fn should_only_prune_tags_without_filters() {
        let document = sieve(fixtures::document(), &FilterOptions::default()).expect("no filters");

        assert_eq!(document.paths, fixtures::document().paths);
        assert_eq!(document.other, fixtures::document().other);
        assert_eq!(
            document.declared_tag_names().collect::<Vec<_>>(),
            ["pet", "store"]
        );
    }

    #[test]
    fn should_match_no_filters_when_filters_keep_everything() {
        let everything = FilterOptions::new(
            Filters::default().with_http(Criterion::include(["get", "put", "post", "delete"])),
        );

        let filtered = sieve(fixtures::document(), &everything).expect("valid options");
        let unfiltered = sieve(fixtures::document(), &FilterOptions::default()).expect("no filters");

        assert_eq!(filtered, unfiltered);
    }

    #[test]
    fn should_strip_definitions_without_filters() {
        let mut input = fixtures::document();
        input
            .other
            .insert(STRIPPED_KEY.to_string(), json!({ "Pet": { "type": "object" } }));

        let document = sieve(input, &FilterOptions::default()).expect("no filters");

        assert!(!document.other.contains_key(STRIPPED_KEY));
        assert_eq!(document.paths, fixtures::document().paths);
    }

    #[test]
    fn should_reject_conflicting_stage_of_valid_document() {
        let options = FilterOptions::new(Filters::default().with_summary(conflict()));

        let result = run(fixtures::document(), &options);

        assert!(matches!(
            result,
            Err(SieveError::IncludeExcludeConflict {
                stage: Stage::Summary
            })
        ));
    }

    #[test]
    fn should_report_validation_error_before_configuration_error() {
        let options = FilterOptions::new(Filters::default().with_tags(conflict()));

        let result = run(json!({ "paths": {} }), &options);

        assert!(matches!(
            result,
            Err(SieveError::Validation(ValidationError::MissingVersion))
        ));
    }

    #[test]
    fn should_validate_source_before_compiling_options() {
        struct Counting(std::cell::Cell<usize>);
        impl Validator for Counting {
            fn validate(&self, source: SchemaSource) -> Result<Document, ValidationError> {
                self.0.set(self.0.get() + 1);
                StructuralValidator.validate(source)
            }
        }
        let validator = Counting(std::cell::Cell::new(0));
        let options = FilterOptions::new(Filters::default().with_paths(Criterion::include(["pet"])));

        let result = run_with(&validator, fixtures::document(), &options);

        assert_eq!(validator.0.get(), 1);
        assert!(matches!(result, Err(SieveError::InvalidPattern { .. })));
    }

    #[test]
    fn should_fail_on_malformed_pattern_in_later_stage() {
        let options = FilterOptions::new(
            Filters::default()
                .with_http(Criterion::include(["get"]))
                .with_description(Criterion::include(["Returns"])),
        );

        let result = Sieve::new(&options);

        assert!(matches!(result, Err(SieveError::InvalidPattern { .. })));
    }

    #[test]
    fn should_propagate_validation_errors() {
        let result = run(json!({ "paths": {} }), &FilterOptions::default());

        assert!(matches!(
            result,
            Err(SieveError::Validation(ValidationError::MissingVersion))
        ));
    }

    #[test]
    fn should_run_stages_in_order_and_prune_tags() {
        let options = FilterOptions::new(
            Filters::default()
                .with_http(Criterion::include(["get", "put"]))
                .with_paths(Criterion::exclude(["/logout/"]))
                .with_tags(Criterion::include(["/^pet$/", "/^default$/"]))
                .with_description(Criterion::exclude(["/map/"])),
        );

        let document = sieve(fixtures::document(), &options).expect("valid options");

        assert_eq!(
            fixtures::operations(&document),
            ["get /pet/{petId}", "put /user/{username}"]
        );
        assert_eq!(document.declared_tag_names().collect::<Vec<_>>(), ["pet"]);
    }

    #[test]
    fn should_be_idempotent() {
        let options = FilterOptions::new(
            Filters::default()
                .with_tags(Criterion::exclude(["/store/i"]))
                .with_summary(Criterion::include(["/pet/i"])),
        );
        let sieve = Sieve::new(&options).expect("valid options");

        let once = sieve.apply(fixtures::document());
        let twice = sieve.apply(once.clone());

        assert_eq!(twice, once);
    }

    #[test]
    fn should_skip_inactive_text_stages() {
        let options = FilterOptions::new(
            Filters::default()
                .with_summary(Criterion::include(Vec::<String>::new()))
                .with_description(Criterion::default()),
        );
        let sieve = Sieve::new(&options).expect("valid options");

        let document = sieve.apply(fixtures::document());

        assert_eq!(document.operation_count(), fixtures::document().operation_count());
    }
}
