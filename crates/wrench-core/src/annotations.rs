//! Class annotation extraction from marker types.
//!
//! A marked class carries its annotations as the template arguments of its
//! marker, e.g. `friend tq::Torque<tq::Export, tq::Size<3, 7>>`. Each argument
//! must name a record in the reserved namespace; the record's name becomes the
//! annotation name and its own integral template arguments become the
//! annotation arguments.
//!
//! Extraction never fails the run. A malformed argument is reported and
//! skipped, and an unsupported annotation argument is reported while the
//! annotation is kept with the arguments decoded so far.

use crate::ast::{AstForest, TemplateArg, TypeInfo, TypeRef};
use crate::error::{Diagnostic, Diagnostics};
use crate::marker::MarkerRule;
use crate::model::{Annotation, ClassRecord};
use tracing::{debug, info};

/// Decodes annotations from the markers selected by a [`MarkerRule`]
pub struct AnnotationExtractor<'a> {
    forest: &'a dyn AstForest,
    rule: &'a dyn MarkerRule,
    namespace: &'a str,
}

impl<'a> AnnotationExtractor<'a> {
    /// `namespace` is the reserved namespace annotation records must live in
    pub fn new(forest: &'a dyn AstForest, rule: &'a dyn MarkerRule, namespace: &'a str) -> Self {
        Self {
            forest,
            rule,
            namespace,
        }
    }

    /// Annotations of `class` in source order
    pub fn extract(&self, class: &ClassRecord, diagnostics: &mut Diagnostics) -> Vec<Annotation> {
        let Some(record) = self.forest.record(class.decl) else {
            return Vec::new();
        };

        let mut annotations = Vec::new();
        for marker in self.rule.markers(self.forest, record) {
            self.extract_marker(class, marker, &mut annotations, diagnostics);
        }

        annotations
    }

    fn extract_marker(
        &self,
        class: &ClassRecord,
        marker: &TypeRef,
        annotations: &mut Vec<Annotation>,
        diagnostics: &mut Diagnostics,
    ) {
        let TypeInfo::Specialization { args, .. } = self.forest.type_info(marker) else {
            diagnostics.report(Diagnostic::AnnotationShape {
                class: class.name.clone(),
                annotation: self.forest.spelling(marker),
                reason: "is not a parametrized marker".to_string(),
            });
            return;
        };

        info!(class = %class.name, "Annotations:");
        for arg in args {
            if let Some(annotation) = self.extract_argument(class, arg, diagnostics) {
                annotations.push(annotation);
            }
        }
    }

    fn extract_argument(
        &self,
        class: &ClassRecord,
        arg: &TemplateArg,
        diagnostics: &mut Diagnostics,
    ) -> Option<Annotation> {
        let shape_error = |annotation: String, reason: String| Diagnostic::AnnotationShape {
            class: class.name.clone(),
            annotation,
            reason,
        };

        let ty = match arg {
            TemplateArg::Type { ty } => ty,
            other => {
                diagnostics.report(shape_error(
                    other.kind_name().to_string(),
                    "is not a type".to_string(),
                ));
                return None;
            }
        };

        let spelling = self.forest.spelling(ty);

        let TypeInfo::Record { decl, .. } = self.forest.resolve(ty) else {
            diagnostics.report(shape_error(spelling, "is not a record".to_string()));
            return None;
        };

        if decl.innermost_namespace() != Some(self.namespace) {
            diagnostics.report(shape_error(
                spelling,
                format!("is not in '{}' namespace", self.namespace),
            ));
            return None;
        }

        let mut annotation = Annotation::new(decl.name.clone());
        info!(class = %class.name, " - {spelling}");
        debug!("  - name: {}", annotation.name);

        for (index, template_arg) in decl.template_args.iter().flatten().enumerate() {
            match template_arg {
                TemplateArg::Integral { value } => {
                    debug!("   [{index}]: {value} (integral)");
                    annotation.arguments.push(value.to_string());
                }
                other => diagnostics.report(shape_error(
                    spelling.clone(),
                    format!(
                        "contains unexpected template argument kind: {}",
                        other.kind_name()
                    ),
                )),
            }
        }

        Some(annotation)
    }
}

#[cfg(test)]
#[path = "annotations/annotations_tests.rs"]
mod annotations_tests;
