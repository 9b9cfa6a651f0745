use crate::domain::model::{InputRow, IN_COLUMNS};
use crate::utils::error::{Result, RosterError};
use reqwest::Client;
use std::time::Duration;

/// Fetches the roster spreadsheet as CSV.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<Vec<InputRow>> {
        tracing::debug!("Fetching roster sheet from: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Sheet response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RosterError::SourceError {
                status: status.as_u16(),
                message: body,
            });
        }

        let content = response.text().await?;
        parse_rows(&content)
    }
}

/// Parses the sheet export. The first line is the sheet's own header and is
/// discarded; columns are taken by position.
pub fn parse_rows(content: &str) -> Result<Vec<InputRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = reader.headers()?.len();
    if columns < IN_COLUMNS.len() {
        tracing::warn!(
            "Sheet has {} columns, expected {} ({}); missing ones are left empty",
            columns,
            IN_COLUMNS.len(),
            IN_COLUMNS.join(", ")
        );
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            tracing::debug!(
                "Skipping blank sheet row at line {:?}",
                record.position().map(|p| p.line())
            );
            continue;
        }
        rows.push(InputRow::from_fields(record.iter()));
    }

    Ok(rows)
}
