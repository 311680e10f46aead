//! Collection of marked classes from the analyzed forest.

use crate::ast::AstForest;
use crate::error::{Diagnostic, Diagnostics, WrenchResult};
use crate::marker::MarkerRule;
use crate::model::ClassRecord;
use std::collections::HashSet;
use tracing::{error, info};

/// Find every class opted in by `rule`, in traversal order.
///
/// A declaration matched a second time, or a different declaration reusing an
/// already matched class name, is reported as [`Diagnostic::DuplicateMatch`] and
/// dropped; the first occurrence wins. Fails without returning any class if
/// the forest cannot be traversed.
pub fn collect_classes(
    forest: &dyn AstForest,
    rule: &dyn MarkerRule,
    diagnostics: &mut Diagnostics,
) -> WrenchResult<Vec<ClassRecord>> {
    info!("Searching marked classes ({})...", rule.describe());

    let matches = forest
        .find_matches(&|record| rule.is_marked(forest, record))
        .inspect_err(|e| error!("Collecting marked classes failed: {e}"))?;

    let mut seen_decls = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut classes = Vec::new();

    for id in matches {
        let Some(record) = forest.record(id) else {
            continue;
        };
        let location = forest.source_location(id);

        if !seen_decls.insert(id) || !seen_names.insert(record.name.as_str()) {
            diagnostics.report(Diagnostic::DuplicateMatch {
                class: record.name.clone(),
                location,
            });
            continue;
        }

        info!(class = %record.name, location = %location, "Found marked class");
        classes.push(ClassRecord::stub(id, record.name.clone(), location));
    }

    Ok(classes)
}
