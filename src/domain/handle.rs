//! Fediverse handle parsing.
//!
//! A handle is accepted in one of two shapes, tried in order:
//!
//! 1. `https://{server}/@{user}`, a profile URL
//! 2. `{user}@{server}`, optionally with a leading `@`
//!
//! Whatever the input shape, a parsed [`Handle`] renders the canonical
//! account `@user@server` and the profile link `https://server/@user`.

use crate::utils::error::{Result, RosterError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Mastodon usernames: word characters, with `.` and `-` allowed inside.
const USER: &str = r"(?P<user>[A-Za-z0-9_](?:[A-Za-z0-9_.-]*[A-Za-z0-9_])?)";

/// Host name with an optional port.
const SERVER: &str = r"(?P<server>[A-Za-z0-9.-]+(?::\d+)?)";

static HANDLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"^https://{SERVER}/@{USER}$"),
        format!(r"^@?{USER}@{SERVER}$"),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid handle regex"))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    user: String,
    server: String,
}

impl Handle {
    pub fn parse(raw: &str) -> Result<Self> {
        let candidate = raw.trim();

        HANDLE_PATTERNS
            .iter()
            .find_map(|pattern| pattern.captures(candidate))
            .map(|caps| Self {
                user: caps["user"].to_string(),
                server: caps["server"].to_string(),
            })
            .ok_or_else(|| RosterError::MalformedHandle(raw.to_string()))
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// `@user@server`
    pub fn account(&self) -> String {
        format!("@{}@{}", self.user, self.server)
    }

    /// `user@server`, the form the directory lookup expects.
    pub fn acct(&self) -> String {
        format!("{}@{}", self.user, self.server)
    }

    pub fn link(&self) -> String {
        format!("https://{}/@{}", self.server, self.user)
    }
}

impl FromStr for Handle {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}@{}", self.user, self.server)
    }
}
