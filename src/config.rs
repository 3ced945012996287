//! Runtime settings and target lists
//!
//! This module provides:
//! - `Settings`, read from an optional TOML file with built-in defaults
//! - Command-line overrides applied on top of the file
//! - Loading of the JSON target lists referenced by each group

use crate::cli::CliArgs;
use crate::domain::{TableFormat, Target, TargetGroup};
use crate::error::ConfigError;
use crate::source::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default spreadsheet document name
pub const DEFAULT_SPREADSHEET: &str = "Genesys Engage Release Notes";

/// Default service-account credential file
pub const DEFAULT_CREDENTIALS: &str = "credentials.json";

/// Default summary worksheet title
pub const DEFAULT_SUMMARY_SHEET: &str = "Summary";

/// Everything the pipeline needs to know before it starts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Spreadsheet document name
    pub spreadsheet: String,
    /// Service-account credential file
    pub credentials: PathBuf,
    /// Title of the summary worksheet
    pub summary_sheet: String,
    /// Target groups, processed in order
    pub groups: Vec<TargetGroup>,
    /// HTTP client settings
    pub http: HttpSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spreadsheet: DEFAULT_SPREADSHEET.to_string(),
            credentials: PathBuf::from(DEFAULT_CREDENTIALS),
            summary_sheet: DEFAULT_SUMMARY_SHEET.to_string(),
            groups: vec![
                TargetGroup::new("8.1", TableFormat::Bracketed, "81_targets.json"),
                TargetGroup::new("8.5+", TableFormat::TwoColumn, "85_targets.json"),
            ],
            http: HttpSettings::default(),
        }
    }
}

/// Page download settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries for transient failures
    pub max_retries: u32,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_retries: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpSettings {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no file is given.
    ///
    /// Relative paths inside the file resolve against the file's directory.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        let mut settings = Self::from_toml(&content, path)?;
        if let Some(base) = path.parent() {
            settings.resolve_paths(base);
        }
        debug!(path = %path.display(), groups = settings.groups.len(), "loaded settings");
        Ok(settings)
    }

    /// Parse settings content; `path` is used for error reporting
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))
    }

    /// Rebase relative credential and target paths onto `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.credentials.is_relative() {
            self.credentials = base.join(&self.credentials);
        }
        for group in &mut self.groups {
            if group.path.is_relative() {
                group.path = base.join(&group.path);
            }
        }
    }

    /// Apply command-line overrides
    pub fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(name) = &args.spreadsheet {
            self.spreadsheet = name.clone();
        }
        if let Some(path) = &args.credentials {
            self.credentials = path.clone();
        }
        if let Some(title) = &args.summary_sheet {
            self.summary_sheet = title.clone();
        }
    }

    /// Groups to process, restricted to `labels` when any are given
    pub fn select_groups(&self, labels: &[String]) -> Result<Vec<TargetGroup>, ConfigError> {
        if let Some(unknown) = labels
            .iter()
            .find(|label| !self.groups.iter().any(|g| &g.label == *label))
        {
            return Err(ConfigError::UnknownGroup {
                label: unknown.clone(),
            });
        }

        Ok(self
            .groups
            .iter()
            .filter(|g| labels.is_empty() || labels.contains(&g.label))
            .cloned()
            .collect())
    }
}

/// Read a JSON target list
pub fn load_targets(path: &Path) -> Result<Vec<Target>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::json_parse_error(path, e.to_string()))
}

/// Load the target list of every group
pub fn load_groups(groups: &[TargetGroup]) -> Result<Vec<(TargetGroup, Vec<Target>)>, ConfigError> {
    groups
        .iter()
        .map(|group| {
            let targets = load_targets(&group.path)?;
            debug!(group = %group.label, targets = targets.len(), "loaded target list");
            Ok((group.clone(), targets))
        })
        .collect()
}
