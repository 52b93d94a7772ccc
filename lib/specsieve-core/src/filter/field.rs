use crate::options::{Criterion, Stage};
use crate::{Document, Operation, Pattern, SieveError};

use super::{DocumentFilter, Rule, retain_operations};

/// A free-text field of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TextField {
    /// The `summary` field.
    #[display("summary")]
    Summary,
    /// The `description` field.
    #[display("description")]
    Description,
}

impl TextField {
    /// The stage filtering on this field.
    #[must_use]
    pub fn stage(self) -> Stage {
        match self {
            Self::Summary => Stage::Summary,
            Self::Description => Stage::Description,
        }
    }

    /// The field value, `None` when absent or empty.
    #[must_use]
    pub fn value(self, operation: &Operation) -> Option<&str> {
        let value = match self {
            Self::Summary => operation.summary.as_deref(),
            Self::Description => operation.description.as_deref(),
        };
        value.filter(|text| !text.is_empty())
    }
}

/// Keeps the operations whose summary or description matches, or does not match,
/// the patterns.
///
/// An operation without the field is dropped whatever the mode: only operations
/// carrying the field are eligible.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    field: TextField,
    rule: Rule<Pattern>,
}

impl FieldFilter {
    /// Creates the filter for `field` from its criterion.
    ///
    /// # Errors
    ///
    /// Fails if an entry is not a valid `/body/flags` pattern.
    pub fn new(field: TextField, criterion: &Criterion) -> Result<Self, SieveError> {
        let rule = Rule::from_criterion(criterion).into_patterns()?;
        Ok(Self { field, rule })
    }

    /// Creates the `summary` filter.
    ///
    /// # Errors
    ///
    /// Fails if an entry is not a valid `/body/flags` pattern.
    pub fn summary(criterion: &Criterion) -> Result<Self, SieveError> {
        Self::new(TextField::Summary, criterion)
    }

    /// Creates the `description` filter.
    ///
    /// # Errors
    ///
    /// Fails if an entry is not a valid `/body/flags` pattern.
    pub fn description(criterion: &Criterion) -> Result<Self, SieveError> {
        Self::new(TextField::Description, criterion)
    }
}

impl DocumentFilter for FieldFilter {
    fn stage(&self) -> Stage {
        self.field.stage()
    }

    fn filter(&self, document: Document) -> Document {
        if self.rule.is_pass() {
            return document;
        }
        retain_operations(self.stage(), document, |_, _, operation| {
            self.field.value(operation).is_some_and(|text| {
                self.rule.keeps(|pattern| pattern.is_match(text))
            })
        })
    }
}
