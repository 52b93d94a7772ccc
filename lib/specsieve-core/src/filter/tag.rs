use crate::options::{Criterion, Stage};
use crate::{Document, Pattern, SieveError};

use super::{DocumentFilter, Rule, retain_operations};

/// Keeps the operations with a tag matching, or with no tag matching, the patterns.
///
/// Operations without tags are matched as if tagged [`DEFAULT_TAG`](crate::DEFAULT_TAG),
/// see [`Operation::effective_tags`](crate::Operation::effective_tags).
/// Kept operations are left as they were: no tag is added to them.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    rule: Rule<Pattern>,
}

impl TagFilter {
    /// Creates the filter from the `tags` criterion.
    ///
    /// # Errors
    ///
    /// Fails if an entry is not a valid `/body/flags` pattern.
    pub fn new(criterion: &Criterion) -> Result<Self, SieveError> {
        let rule = Rule::from_criterion(criterion).into_patterns()?;
        Ok(Self { rule })
    }
}

impl DocumentFilter for TagFilter {
    fn stage(&self) -> Stage {
        Stage::Tags
    }

    fn filter(&self, document: Document) -> Document {
        if self.rule.is_pass() {
            return document;
        }
        retain_operations(Stage::Tags, document, |_, _, operation| {
            self.rule.keeps(|pattern| {
                operation
                    .effective_tags()
                    .any(|tag| pattern.is_match(tag))
            })
        })
    }
}
