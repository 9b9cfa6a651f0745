use crate::utils::error::{Result, RosterError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder regex"));

/// Optional `--config` file. Every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub activity: ActivitySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    pub sheet_id: Option<String>,
    pub url_template: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivitySection {
    pub max_inactivity_weeks: Option<u32>,
    pub lookup_delay_ms: Option<u64>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay
    /// as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = FileConfig::from_toml_str(
            r#"
[source]
sheet_id = "abc123"
timeout_seconds = 10

[output]
path = "out/users.csv"

[activity]
max_inactivity_weeks = 8
lookup_delay_ms = 250
"#,
        )
        .unwrap();

        assert_eq!(config.source.sheet_id.as_deref(), Some("abc123"));
        assert_eq!(config.source.url_template, None);
        assert_eq!(config.source.timeout_seconds, Some(10));
        assert_eq!(config.output.path, Some(PathBuf::from("out/users.csv")));
        assert_eq!(config.activity.max_inactivity_weeks, Some(8));
        assert_eq!(config.activity.lookup_delay_ms, Some(250));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.source.sheet_id.is_none());
        assert!(config.activity.max_inactivity_weeks.is_none());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = FileConfig::from_toml_str("[output]\nformat = \"json\"\n").unwrap_err();
        assert!(matches!(err, RosterError::ConfigError { .. }));
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("ROSTER_SYNC_TEST_SHEET", "from-env");
        let config = FileConfig::from_toml_str(
            "[source]\nsheet_id = \"${ROSTER_SYNC_TEST_SHEET}\"\nurl_template = \"${ROSTER_SYNC_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(config.source.sheet_id.as_deref(), Some("from-env"));
        assert_eq!(
            config.source.url_template.as_deref(),
            Some("${ROSTER_SYNC_UNSET_VAR}")
        );
    }
}
