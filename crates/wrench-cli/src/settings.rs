//! Configuration loading and command-line overrides

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wrench_core::GeneratorConfig;
use wrench_core::config::CONFIG_FILE_NAME;

/// Values given on the command line, applied on top of the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub marker: Option<String>,
    pub no_preview: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.clone();
        }
        if let Some(marker) = &self.marker {
            config.marker = marker.clone();
        }
        if self.no_preview {
            config.preview = false;
        }
    }
}

/// Load the configuration, apply overrides and validate the result.
///
/// An explicit `path` must exist. Without one, `./wrench.toml` is used when
/// present and the defaults otherwise.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<GeneratorConfig> {
    load_from(path, Path::new(CONFIG_FILE_NAME), overrides)
}

fn load_from(path: Option<&Path>, default_path: &Path, overrides: &Overrides) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if default_path.exists() => GeneratorConfig::from_file(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()))?,
        None => GeneratorConfig::default(),
    };

    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}
