//! Generator configuration

use crate::error::{WrenchError, WrenchResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "wrench.toml";

/// wrench.toml configuration
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory generated files are written to
    pub output_dir: PathBuf,

    /// Extension of generated files, without the dot
    pub extension: String,

    /// Qualified name of the sentinel classes befriend to opt in
    pub marker: String,

    /// Namespace annotation records must live in
    pub annotation_namespace: String,

    /// Unqualified name of the field wrapper template
    pub field_template: String,

    /// Tool name written into generated-file banners
    pub tool_name: String,

    /// Print every rendered declaration to the preview stream
    pub preview: bool,

    /// Create `output_dir` if it does not exist
    pub create_output_dir: bool,

    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("src/objects"),
            extension: "tq".to_string(),
            marker: "tq::Torque".to_string(),
            annotation_namespace: "tq".to_string(),
            field_template: "Field".to_string(),
            tool_name: "wrench".to_string(),
            preview: true,
            create_output_dir: true,
            log_level: "info".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> WrenchResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            WrenchError::Config(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> WrenchResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> WrenchResult<()> {
        let output_dir = self.output_dir.to_string_lossy();
        if output_dir.is_empty() {
            return Err(WrenchError::Config("output_dir cannot be empty".into()));
        }
        if output_dir.len() > 1 && output_dir.ends_with('/') {
            return Err(WrenchError::Config(format!(
                "output_dir must not end with '/': {output_dir}"
            )));
        }

        if self.extension.is_empty() {
            return Err(WrenchError::Config("extension cannot be empty".into()));
        }
        if self.extension.contains(['.', '/']) {
            return Err(WrenchError::Config(format!(
                "extension must not contain '.' or '/': {}",
                self.extension
            )));
        }

        for (key, value) in [
            ("marker", &self.marker),
            ("annotation_namespace", &self.annotation_namespace),
            ("field_template", &self.field_template),
            ("tool_name", &self.tool_name),
        ] {
            if value.trim().is_empty() {
                return Err(WrenchError::Config(format!("{key} cannot be empty")));
            }
        }

        if !is_valid_log_level(&self.log_level) {
            return Err(WrenchError::Config(format!(
                "invalid log_level '{}' (expected trace, debug, info, warn, error or off)",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Output path for a class: `<output_dir>/<file_stem>.<extension>`
    pub fn output_path(&self, file_stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{file_stem}.{}", self.extension))
    }
}

/// Check if a log level string is valid
pub fn is_valid_log_level(level: &str) -> bool {
    matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    )
}
