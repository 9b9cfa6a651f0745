use crate::adapters::directory::MastodonDirectory;
use crate::adapters::sheet::SheetClient;
use crate::core::activity::ActivityFilter;
use crate::domain::handle::Handle;
use crate::domain::model::{Account, InputRow, TransformResult, OUT_COLUMNS};
use crate::domain::ports::{ActivityLookup, ConfigProvider, Pipeline, Storage};
use crate::utils::error::{Result, RosterError};

/// Spreadsheet in, roster CSV out.
pub struct RosterPipeline<S: Storage, C: ConfigProvider, L: ActivityLookup = MastodonDirectory> {
    storage: S,
    config: C,
    sheet: SheetClient,
    filter: Option<ActivityFilter<L>>,
}

impl<S: Storage, C: ConfigProvider> RosterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let sheet = SheetClient::new(config.request_timeout())?;
        Ok(Self {
            storage,
            config,
            sheet,
            filter: None,
        })
    }
}

impl<S: Storage, C: ConfigProvider, L: ActivityLookup> RosterPipeline<S, C, L> {
    pub fn with_activity_filter<F: ActivityLookup>(
        self,
        filter: ActivityFilter<F>,
    ) -> RosterPipeline<S, C, F> {
        RosterPipeline {
            storage: self.storage,
            config: self.config,
            sheet: self.sheet,
            filter: Some(filter),
        }
    }
}

/// Serializes the roster with its header, even when no account survived.
pub fn render_roster(accounts: &[Account]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUT_COLUMNS)?;
    for account in accounts {
        writer.serialize(account)?;
    }

    writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, L: ActivityLookup> Pipeline for RosterPipeline<S, C, L> {
    async fn extract(&self) -> Result<Vec<InputRow>> {
        self.sheet.fetch(&self.config.sheet_url()).await
    }

    async fn transform(&self, rows: Vec<InputRow>) -> Result<TransformResult> {
        let mut result = TransformResult::default();
        let delay = self.config.lookup_delay();
        let mut lookups = 0usize;

        for (index, row) in rows.into_iter().enumerate() {
            // Sheet line numbers, counting the discarded header.
            let line = index + 2;

            let handle = match Handle::parse(&row.handle) {
                Ok(handle) => handle,
                Err(e) => {
                    tracing::warn!("Failed to parse row {}: {}", line, e);
                    result.malformed += 1;
                    continue;
                }
            };

            if let Some(filter) = &self.filter {
                if lookups > 0 && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                lookups += 1;

                if !filter.keep(&handle).await {
                    result.inactive += 1;
                    continue;
                }
            }

            tracing::debug!("Row {}: {}", line, handle);
            result.accounts.push(Account::new(&handle, &row.name));
        }

        Ok(result)
    }

    async fn load(&self, accounts: &[Account]) -> Result<String> {
        let output_path = self.config.output_path();
        let data = render_roster(accounts)?;

        tracing::debug!(
            "Writing {} accounts ({} bytes) to {}",
            accounts.len(),
            data.len(),
            output_path.display()
        );
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.display().to_string())
    }
}
