use crate::config::directory::DirectoryConfig;
use crate::domain::ports::{Activity, ActivityLookup};
use crate::utils::error::{Result, RosterError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// The subset of a Mastodon account entity the filter needs.
#[derive(Debug, Deserialize)]
struct AccountEntity {
    #[serde(default)]
    last_status_at: Option<String>,
}

/// Account lookup against a Mastodon-compatible server.
pub struct MastodonDirectory {
    client: Client,
    config: DirectoryConfig,
}

impl MastodonDirectory {
    pub fn new(config: DirectoryConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    fn lookup_url(&self) -> String {
        format!(
            "{}/api/v1/accounts/lookup",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ActivityLookup for MastodonDirectory {
    async fn lookup(&self, acct: &str) -> Result<Activity> {
        let resp = self
            .client
            .get(self.lookup_url())
            .query(&[("acct", acct)])
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            tracing::debug!(acct, status = status.as_u16(), "Account not found");
            return Ok(Activity::NotFound);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RosterError::DirectoryError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let entity: AccountEntity = serde_json::from_str(&body)?;

        match entity.last_status_at.as_deref() {
            None => Ok(Activity::NeverPosted),
            Some(raw) => parse_last_status_at(raw)
                .map(Activity::LastPost)
                .ok_or_else(|| RosterError::DirectoryError {
                    status: status.as_u16(),
                    message: format!("unrecognised last_status_at: {}", raw),
                }),
        }
    }
}

/// Mastodon reports `last_status_at` as a plain date; older servers send a
/// full timestamp.
fn parse_last_status_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
