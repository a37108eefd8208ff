use crate::cli::Cli;
use crate::encoding::TextEncoding;
use crate::error::{Result as RowsiftResult, RowsiftError};
use crate::filter::ColumnSelector;
use crate::printer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration precedence (highest to lowest):
/// 1. Command-line arguments
/// 2. Environment variables (ROWSIFT_*)
/// 3. Config file (--config, ./.rowsift.toml, ~/.config/rowsift/config.toml, ~/.rowsift.toml)
/// 4. Built-in defaults

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub file: PathBuf,
    pub encoding: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("sales.csv"),
            encoding: "utf-8".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub column: i64,
    pub column_name: Option<String>,
    pub value: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            column: 2, // 0-based
            column_name: None,
            value: "Books".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Empty defers to RUST_LOG, then `info`
    pub level: String,
    /// Empty logs to stderr
    pub file: String,
}

/// Fully resolved inputs for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub file: PathBuf,
    pub encoding: TextEncoding,
    pub column: ColumnSelector,
    pub value: String,
    pub output_format: OutputFormat,
}

impl Config {
    /// Load from TOML file
    pub fn from_toml_file(path: &Path) -> RowsiftResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RowsiftError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        toml::from_str(&content).map_err(|e| {
            RowsiftError::Config(format!("Failed to parse TOML config {:?}: {}", path, e))
        })
    }

    /// Load the explicit file if given, else the first file found, else defaults.
    pub fn load(explicit: Option<&Path>) -> RowsiftResult<Self> {
        if let Some(path) = explicit {
            return Self::from_toml_file(path);
        }
        match Self::find_config_path() {
            Some(path) => Self::from_toml_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        let current_path = Path::new(".rowsift.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("rowsift/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".rowsift.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        None
    }

    /// Apply `ROWSIFT_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Vec<String> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Returns a warning for each value that
    /// could not be used; the logger is not up yet when this runs.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        if let Some(val) = lookup("ROWSIFT_FILE") {
            self.input.file = PathBuf::from(val);
        }
        if let Some(val) = lookup("ROWSIFT_ENCODING") {
            match val.parse::<TextEncoding>() {
                Ok(_) => self.input.encoding = val,
                Err(_) => warnings.push(format!("Ignoring ROWSIFT_ENCODING={val:?}: unsupported encoding")),
            }
        }
        if let Some(val) = lookup("ROWSIFT_COLUMN") {
            match val.trim().parse() {
                Ok(v) => {
                    self.filter.column = v;
                    self.filter.column_name = None;
                }
                Err(_) => warnings.push(format!("Ignoring ROWSIFT_COLUMN={val:?}: not an integer")),
            }
        }
        if let Some(val) = lookup("ROWSIFT_VALUE") {
            self.filter.value = val;
        }
        if let Some(val) = lookup("ROWSIFT_LOG_LEVEL") {
            match crate::logging::parse_level(&val) {
                Ok(_) => self.logging.level = val,
                Err(_) => warnings.push(format!("Ignoring ROWSIFT_LOG_LEVEL={val:?}: unknown level")),
            }
        }
        warnings
    }

    /// Command-line flags win over everything else.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(file) = &cli.file {
            self.input.file = file.clone();
        }
        if let Some(encoding) = &cli.encoding {
            self.input.encoding = encoding.clone();
        }
        if let Some(column) = cli.column {
            self.filter.column = column;
            self.filter.column_name = None;
        }
        if let Some(name) = &cli.column_name {
            self.filter.column_name = Some(name.clone());
        }
        if let Some(value) = &cli.value {
            self.filter.value = value.clone();
        }
        if let Some(format) = cli.output_format {
            self.output.format = format;
        }
        if let Some(log) = &cli.log {
            self.logging.file = log.to_string_lossy().into_owned();
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        if cli.quiet {
            self.logging.level = "error".to_string();
        }
    }

    pub fn run_options(&self) -> RowsiftResult<RunOptions> {
        let column = match &self.filter.column_name {
            Some(name) => ColumnSelector::Name(name.clone()),
            None => ColumnSelector::Index(self.filter.column),
        };
        Ok(RunOptions {
            file: self.input.file.clone(),
            encoding: self.input.encoding.parse()?,
            column,
            value: self.filter.value.clone(),
            output_format: self.output.format,
        })
    }
}
