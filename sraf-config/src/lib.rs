//! Shared configuration loader for the sraf tools.
//!
//! `defaults/sraf.default.toml` is embedded into every binary and documents every
//! key. Layers are applied in this order, later ones winning:
//!
//! 1. embedded defaults
//! 2. a TOML file (`--config`, or `./sraf.toml` when present)
//! 3. `SRAF_*` environment variables, `__` separating sections from keys
//!    (`SRAF_SCAN__MONTH_FILTER=exact-case`, `SRAF_BATCH__THREADS=4`)
//! 4. explicit overrides, typically command-line flags

use config::builder::DefaultState;
use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, FileSourceFile, ValueKind,
};
use serde::Deserialize;
use sraf_parser::MonthFilter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/sraf.default.toml");

const ENV_PREFIX: &str = "SRAF";

/// Settings for one `sraf` run, one field per TOML section
#[derive(Debug, Clone, Deserialize)]
pub struct SrafConfig {
    #[serde(default)]
    pub lexicon: LexiconConfig,
    pub scan: ScanConfig,
    pub batch: BatchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Knobs passed through to the scanner.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub month_filter: MonthFilter,
}

/// Controls how a directory of filings is processed.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of documents, 0 for no limit
    pub limit: usize,
    /// Worker threads, 0 for the rayon default
    pub threads: usize,
}

impl BatchConfig {
    pub fn limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub delimiter: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Builds a [`SrafConfig`], each added layer taking precedence over the ones
/// added before it
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded `sraf.default.toml`
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a file passed explicitly with `--config`; it must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), true));
        self
    }

    /// Layer the working directory's `sraf.toml` when there is one
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), false));
        self
    }

    /// Layer `SRAF_*` variables from the process environment.
    pub fn with_environment(mut self) -> Self {
        self.builder = self.builder.add_source(environment());
        self
    }

    /// Layer `SRAF_*` variables from an explicit map instead of the process
    /// environment.
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.builder = self.builder.add_source(environment().source(Some(vars)));
        self
    }

    /// Pin a dotted key such as `scan.month_filter`, above every file and
    /// environment layer
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Resolve the layers; unknown enum values such as a bad month filter fail here
    pub fn build(self) -> Result<SrafConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_file(path: &Path, required: bool) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Configuration with no file, environment or flag layered on top
pub fn load_defaults() -> Result<SrafConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.scan.month_filter, MonthFilter::IgnoreCase);
        assert_eq!(config.batch.limit(), None);
        assert_eq!(config.batch.threads, 0);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.delimiter, ',');
        assert!(config.lexicon.path.is_none());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("scan.month_filter", "exact-case")
            .expect("override to apply")
            .set_override("batch.limit", 3_i64)
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.scan.month_filter, MonthFilter::ExactCase);
        assert_eq!(config.batch.limit(), Some(3));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[lexicon]\npath = \"/data/lm.csv\"\n\n[output]\ndelimiter = \"|\""
        )
        .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.lexicon.path, Some(PathBuf::from("/data/lm.csv")));
        assert_eq!(config.output.delimiter, '|');
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/sraf.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.scan.month_filter, MonthFilter::IgnoreCase);
    }

    #[test]
    fn environment_layers_over_file_defaults() {
        let vars = HashMap::from([
            ("SRAF_SCAN__MONTH_FILTER".to_string(), "disabled".to_string()),
            ("SRAF_BATCH__THREADS".to_string(), "4".to_string()),
        ]);
        let config = Loader::new()
            .with_env_vars(vars)
            .build()
            .expect("config to build");
        assert_eq!(config.scan.month_filter, MonthFilter::Disabled);
        assert_eq!(config.batch.threads, 4);
    }

    #[test]
    fn overrides_win_over_environment() {
        let vars = HashMap::from([("SRAF_BATCH__LIMIT".to_string(), "7".to_string())]);
        let config = Loader::new()
            .with_env_vars(vars)
            .set_override("batch.limit", 2_i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.batch.limit(), Some(2));
    }

    #[test]
    fn unknown_month_filter_is_rejected() {
        let result = Loader::new()
            .set_override("scan.month_filter", "sometimes")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
