use tracing::debug;

use crate::options::{Criterion, Stage};
use crate::{Document, Pattern, SieveError};

use super::{DocumentFilter, Rule};

/// Keeps the paths whose template matches, or does not match, the patterns.
///
/// A dropped path takes all its operations with it.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    rule: Rule<Pattern>,
}

impl PathFilter {
    /// Creates the filter from the `paths` criterion.
    ///
    /// # Errors
    ///
    /// Fails if an entry is not a valid `/body/flags` pattern.
    pub fn new(criterion: &Criterion) -> Result<Self, SieveError> {
        let rule = Rule::from_criterion(criterion).into_patterns()?;
        Ok(Self { rule })
    }
}

impl DocumentFilter for PathFilter {
    fn stage(&self) -> Stage {
        Stage::Paths
    }

    fn filter(&self, mut document: Document) -> Document {
        if self.rule.is_pass() {
            return document;
        }
        let before = document.paths.len();
        document
            .paths
            .retain(|path, _| self.rule.keeps(|pattern| pattern.is_match(path)));

        debug!(
            stage = %Stage::Paths,
            paths = before - document.paths.len(),
            "stage removed paths"
        );
        document
    }
}
