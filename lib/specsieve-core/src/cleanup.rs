//! Post-filter cleanup of the top-level tag declarations.

use std::collections::HashSet;

use tracing::debug;

use crate::Document;

/// Removes the tag declarations no remaining operation refers to.
///
/// Operations without tags refer to [`DEFAULT_TAG`](crate::DEFAULT_TAG).
/// Tags used by operations but never declared are left alone. A document without
/// a `tags` list is unchanged.
pub fn prune_tags(document: &mut Document) {
    let Some(declarations) = document.tags.as_mut() else {
        return;
    };

    let used = document
        .paths
        .values()
        .flat_map(|item| item.operations.values())
        .flat_map(|operation| operation.effective_tags())
        .collect::<HashSet<_>>();

    let before = declarations.len();
    declarations.retain(|declaration| used.contains(declaration.name.as_str()));

    debug!(
        removed = before - declarations.len(),
        kept = declarations.len(),
        "tag declarations pruned"
    );
}
