use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{require_http_url, require_secret, Validate};
use std::env;

pub const BASE_URL_VAR: &str = "MASTODON_API_BASE_URL";
pub const ACCESS_TOKEN_VAR: &str = "MASTODON_ACCESS_TOKEN";

/// Credentials for the directory API, passed explicitly to the client.
#[derive(Clone)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub access_token: String,
}

impl DirectoryConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Only called when the activity filter is enabled.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| RosterError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        Ok(Self {
            base_url: require(BASE_URL_VAR)?,
            access_token: require(ACCESS_TOKEN_VAR)?,
        })
    }
}

// The token never reaches the logs.
impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"***")
            .finish()
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        require_http_url(BASE_URL_VAR, &self.base_url)?;
        require_secret(ACCESS_TOKEN_VAR, &self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_lookup_reads_both_values() {
        let env = vars(&[
            (BASE_URL_VAR, "https://mastodon.social"),
            (ACCESS_TOKEN_VAR, "secret"),
        ]);
        let config = DirectoryConfig::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.base_url, "https://mastodon.social");
        assert_eq!(config.access_token, "secret");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let env = vars(&[(BASE_URL_VAR, "https://mastodon.social")]);
        match DirectoryConfig::from_lookup(|name| env.get(name).cloned()) {
            Err(RosterError::MissingConfigError { field }) => assert_eq!(field, ACCESS_TOKEN_VAR),
            other => panic!("expected MissingConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let env = vars(&[(BASE_URL_VAR, "  "), (ACCESS_TOKEN_VAR, "secret")]);
        assert!(DirectoryConfig::from_lookup(|name| env.get(name).cloned()).is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let config = DirectoryConfig::new("https://mastodon.social", "secret");
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = DirectoryConfig::new("mastodon.social", "secret");
        assert!(config.validate().is_err());
    }
}
