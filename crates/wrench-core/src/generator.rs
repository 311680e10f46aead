//! Generation pipeline: collect, process, generate.
//!
//! Each stage runs over the whole ordered class list before the next one
//! starts. The list is owned by the caller and threaded through the stages by
//! value; no stage keeps state between runs.

use crate::annotations::AnnotationExtractor;
use crate::ast::AstForest;
use crate::config::GeneratorConfig;
use crate::emit::{render_declaration, render_file};
use crate::error::{Diagnostic, Diagnostics, WrenchResult};
use crate::fields::FieldReflector;
use crate::marker::{FriendMarker, MarkerRule};
use crate::model::ClassRecord;
use crate::naming::to_snake_case;
use crate::query::collect_classes;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Outcome of a completed run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Fully populated classes, in match order
    pub classes: Vec<ClassRecord>,

    /// Files written, in class order
    pub written: Vec<PathBuf>,

    /// Classes whose output file could not be written
    pub skipped: Vec<String>,

    /// Recoverable diagnostics from every stage
    pub diagnostics: Diagnostics,
}

/// Drives the generation pipeline for one configuration
pub struct Generator {
    config: GeneratorConfig,
    rule: Box<dyn MarkerRule>,
}

impl Generator {
    /// Generator using the friend-sentinel rule from `config.marker`
    pub fn new(config: GeneratorConfig) -> Self {
        let rule = Box::new(FriendMarker::new(config.marker.clone()));
        Self::with_rule(config, rule)
    }

    /// Generator with a custom opt-in rule
    pub fn with_rule(config: GeneratorConfig, rule: Box<dyn MarkerRule>) -> Self {
        Self { config, rule }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run every stage and write one file per class.
    ///
    /// Fails if the forest cannot be traversed or a class has more than one
    /// direct base; in both cases no file is written.
    pub fn run(&self, forest: &dyn AstForest, preview: &mut dyn Write) -> WrenchResult<RunReport> {
        let mut diagnostics = Diagnostics::new();

        let classes = self.collect(forest, &mut diagnostics)?;
        let classes = self.process(forest, classes, &mut diagnostics)?;
        let (written, skipped) = self.generate(&classes, preview, &mut diagnostics);

        info!(
            generated = written.len(),
            skipped = skipped.len(),
            diagnostics = diagnostics.len(),
            "Generation finished"
        );

        Ok(RunReport {
            classes,
            written,
            skipped,
            diagnostics,
        })
    }

    /// Stage 1: find every opted-in class
    pub fn collect(
        &self,
        forest: &dyn AstForest,
        diagnostics: &mut Diagnostics,
    ) -> WrenchResult<Vec<ClassRecord>> {
        collect_classes(forest, self.rule.as_ref(), diagnostics)
    }

    /// Stage 2: extract annotations and reflect base class and fields
    pub fn process(
        &self,
        forest: &dyn AstForest,
        classes: Vec<ClassRecord>,
        diagnostics: &mut Diagnostics,
    ) -> WrenchResult<Vec<ClassRecord>> {
        info!("Processing marked classes...");

        let extractor =
            AnnotationExtractor::new(forest, self.rule.as_ref(), &self.config.annotation_namespace);
        let reflector = FieldReflector::new(forest, &self.config.field_template);

        let mut processed = Vec::with_capacity(classes.len());
        for mut class in classes {
            info!(class = %class.name, "Processing class");

            class.annotations = extractor.extract(&class, diagnostics);
            class.base_class = reflector
                .reflect_base(&class, diagnostics)
                .inspect_err(|e| error!("{e}"))?;
            class.fields = reflector.reflect_fields(&class, diagnostics);

            processed.push(class);
        }

        Ok(processed)
    }

    /// Stage 3: render and write one file per class.
    ///
    /// A file that cannot be written is reported and skipped. Returns the
    /// written paths and the names of skipped classes.
    pub fn generate(
        &self,
        classes: &[ClassRecord],
        preview: &mut dyn Write,
        diagnostics: &mut Diagnostics,
    ) -> (Vec<PathBuf>, Vec<String>) {
        info!("Generating schema classes...");

        if self.config.create_output_dir {
            if let Err(e) = fs::create_dir_all(&self.config.output_dir) {
                diagnostics.report(Diagnostic::OutputDirectory {
                    path: self.config.output_dir.clone(),
                    message: e.to_string(),
                });
            }
        }

        let mut written = Vec::new();
        let mut skipped = Vec::new();

        for class in classes {
            let path = self.config.output_path(&to_snake_case(&class.name));
            info!(class = %class.name, path = %path.display(), "Generating class");

            if self.config.preview {
                if let Err(e) = preview.write_all(render_declaration(class).as_bytes()) {
                    warn!("Failed to write preview for '{}': {e}", class.name);
                }
            }

            match fs::write(&path, render_file(&self.config.tool_name, class)) {
                Ok(()) => written.push(path),
                Err(e) => {
                    diagnostics.report(Diagnostic::OutputFile {
                        path,
                        message: e.to_string(),
                    });
                    skipped.push(class.name.clone());
                }
            }
        }

        (written, skipped)
    }
}
