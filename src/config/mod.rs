pub mod cli;
pub mod directory;
pub mod toml_config;

use crate::config::toml_config::FileConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    require_at_least, require_http_url, require_output_file, require_placeholder,
    require_sheet_id, Validate,
};
use chrono::TimeDelta;
#[cfg(feature = "cli")]
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SHEET_ID: &str = "15Ak4VHCnr_4Stkzkz-_RhOgX-jCJMt0oq0GN9XXDaKo";
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://docs.google.com/spreadsheets/d/{key}/gviz/tq?tqx=out:csv";
pub const DEFAULT_OUTPUT_PATH: &str = "resources/users.csv";
pub const DEFAULT_LOOKUP_DELAY_MS: u64 = 1000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "roster-sync")]
#[command(about = "Rebuild the account roster CSV from the sign-up spreadsheet")]
pub struct CliConfig {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Output CSV path
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Drop accounts without a public post in this many weeks (0 disables)
    #[arg(short = 'w', long)]
    pub max_inactivity_weeks: Option<u32>,

    /// Spreadsheet id to export from
    #[arg(long)]
    pub sheet_id: Option<String>,

    /// Pause between directory lookups, in milliseconds
    #[arg(long)]
    pub lookup_delay_ms: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the config file, then command line flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path.display());
                Settings::from_file_config(FileConfig::from_file(path)?)
            }
            None => Settings::default(),
        };

        if let Some(outfile) = &self.outfile {
            settings.output_path = outfile.clone();
        }
        if let Some(weeks) = self.max_inactivity_weeks {
            settings.max_inactivity_weeks = Some(weeks);
        }
        if let Some(sheet_id) = &self.sheet_id {
            settings.sheet_id = sheet_id.clone();
        }
        if let Some(delay) = self.lookup_delay_ms {
            settings.lookup_delay_ms = delay;
        }

        Ok(settings)
    }
}

/// Resolved run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sheet_id: String,
    pub url_template: String,
    pub timeout_seconds: u64,
    pub output_path: PathBuf,
    pub max_inactivity_weeks: Option<u32>,
    pub lookup_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            max_inactivity_weeks: None,
            lookup_delay_ms: DEFAULT_LOOKUP_DELAY_MS,
        }
    }
}

impl Settings {
    pub fn from_file_config(file: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            sheet_id: file.source.sheet_id.unwrap_or(defaults.sheet_id),
            url_template: file.source.url_template.unwrap_or(defaults.url_template),
            timeout_seconds: file.source.timeout_seconds.unwrap_or(defaults.timeout_seconds),
            output_path: file.output.path.unwrap_or(defaults.output_path),
            max_inactivity_weeks: file.activity.max_inactivity_weeks,
            lookup_delay_ms: file.activity.lookup_delay_ms.unwrap_or(defaults.lookup_delay_ms),
        }
    }
}

impl ConfigProvider for Settings {
    fn sheet_url(&self) -> String {
        self.url_template.replace("{key}", &self.sheet_id)
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn max_inactivity(&self) -> Option<TimeDelta> {
        self.max_inactivity_weeks
            .filter(|weeks| *weeks > 0)
            .map(|weeks| TimeDelta::weeks(i64::from(weeks)))
    }

    fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        require_sheet_id("source.sheet_id", &self.sheet_id)?;
        require_placeholder("source.url_template", &self.url_template, "{key}")?;
        require_http_url("source.url_template", &self.sheet_url())?;
        require_at_least("source.timeout_seconds", self.timeout_seconds, 1)?;
        require_output_file("output.path", &self.output_path)
    }
}
