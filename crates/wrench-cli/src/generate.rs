//! `wrench generate` - run the full pipeline and write schema files

use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use wrench_core::{AstDump, DiagnosticKind, Generator, GeneratorConfig, RunReport};

pub fn run(ast_path: &Path, config: GeneratorConfig) -> Result<()> {
    let dump = AstDump::from_file(ast_path)
        .with_context(|| format!("Failed to load AST dump {}", ast_path.display()))?;

    let generator = Generator::new(config);
    let stdout = io::stdout();
    let mut preview = stdout.lock();

    let report = generator
        .run(&dump, &mut preview)
        .context("Schema generation failed")?;

    // Preview owns stdout
    eprintln!("{}", summary(&report));
    Ok(())
}

fn summary(report: &RunReport) -> String {
    let mut out = format!("✓ Generated {} file(s)", report.written.len());
    for path in &report.written {
        out.push_str(&format!("\n  {}", path.display()));
    }
    for diagnostic in report.diagnostics.entries() {
        if diagnostic.kind() == DiagnosticKind::OutputDirectory {
            out.push_str(&format!("\n{diagnostic}"));
        }
    }
    if !report.skipped.is_empty() {
        out.push_str(&format!("\nSkipped: {}", report.skipped.join(", ")));
    }
    out.push_str(&format!("\nDiagnostics: {}", report.diagnostics.len()));
    out
}
