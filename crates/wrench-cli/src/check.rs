//! `wrench check` - reflect marked classes without writing anything

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;
use wrench_core::{AstDump, ClassRecord, Diagnostics, Generator, GeneratorConfig};

pub fn run(ast_path: &Path, config: GeneratorConfig) -> Result<()> {
    let dump = AstDump::from_file(ast_path)
        .with_context(|| format!("Failed to load AST dump {}", ast_path.display()))?;

    let generator = Generator::new(config);
    let mut diagnostics = Diagnostics::new();

    let classes = generator
        .collect(&dump, &mut diagnostics)
        .context("Failed to collect marked classes")?;
    let classes = generator
        .process(&dump, classes, &mut diagnostics)
        .context("Failed to reflect marked classes")?;

    println!("{}", render(&classes, &diagnostics)?);
    Ok(())
}

/// JSON document with every reflected class and diagnostic message
fn render(classes: &[ClassRecord], diagnostics: &Diagnostics) -> Result<String> {
    let messages: Vec<String> = diagnostics.entries().iter().map(ToString::to_string).collect();
    let document = json!({
        "classes": classes,
        "diagnostics": messages,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}
