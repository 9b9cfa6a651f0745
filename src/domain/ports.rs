use crate::domain::model::{Account, InputRow, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Spreadsheet export URL with the sheet id filled in.
    fn sheet_url(&self) -> String;
    fn output_path(&self) -> &Path;
    /// `None` disables the activity filter.
    fn max_inactivity(&self) -> Option<TimeDelta>;
    fn lookup_delay(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
}

/// What the directory knows about an account's recent activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    NotFound,
    NeverPosted,
    LastPost(DateTime<Utc>),
}

#[async_trait]
pub trait ActivityLookup: Send + Sync {
    /// Looks up an account by its `user@server` form.
    async fn lookup(&self, acct: &str) -> Result<Activity>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputRow>>;
    async fn transform(&self, rows: Vec<InputRow>) -> Result<TransformResult>;
    async fn load(&self, accounts: &[Account]) -> Result<String>;
}
