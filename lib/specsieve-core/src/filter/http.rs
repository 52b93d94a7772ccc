use crate::Document;
use crate::options::{Criterion, Stage};

use super::{DocumentFilter, Rule, retain_operations};

/// Keeps the operations whose method token is, or is not, listed.
///
/// Method tokens are compared literally, ignoring ASCII case.
#[derive(Debug, Clone, Default)]
pub struct HttpFilter {
    rule: Rule<String>,
}

impl HttpFilter {
    /// Creates the filter from the `http` criterion.
    #[must_use]
    pub fn new(criterion: &Criterion) -> Self {
        Self {
            rule: Rule::from_criterion(criterion),
        }
    }
}

impl DocumentFilter for HttpFilter {
    fn stage(&self) -> Stage {
        Stage::Http
    }

    fn filter(&self, document: Document) -> Document {
        if self.rule.is_pass() {
            return document;
        }
        retain_operations(Stage::Http, document, |_, method, _| {
            self.rule
                .keeps(|listed| listed.eq_ignore_ascii_case(method))
        })
    }
}
