use crate::domain::handle::Handle;
use serde::Serialize;

/// Column order of the spreadsheet export.
pub const IN_COLUMNS: [&str; 5] = ["timestamp", "name", "masto", "twitter", "bio"];

/// Column order of the written roster.
pub const OUT_COLUMNS: [&str; 3] = ["account", "name", "link"];

/// One spreadsheet row, fields kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    pub timestamp: String,
    pub name: String,
    pub handle: String,
    pub alt_handle: String,
    pub bio: String,
}

impl InputRow {
    /// Builds a row from positional fields; missing trailing fields are empty.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter().map(str::to_string);
        let mut next = || fields.next().unwrap_or_default();
        Self {
            timestamp: next(),
            name: next(),
            handle: next(),
            alt_handle: next(),
            bio: next(),
        }
    }
}

/// A row of the output roster. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub account: String,
    pub name: String,
    pub link: String,
}

impl Account {
    pub fn new(handle: &Handle, name: &str) -> Self {
        let name = clean_display_name(name);
        let name = if name.is_empty() {
            tracing::debug!("Empty display name for {}, using user name", handle);
            handle.user().to_string()
        } else {
            name
        };

        Self {
            account: handle.account(),
            name,
            link: handle.link(),
        }
    }
}

/// Trims and folds line breaks so each account stays on one physical line.
fn clean_display_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub accounts: Vec<Account>,
    pub malformed: usize,
    pub inactive: usize,
}

impl TransformResult {
    pub fn dropped(&self) -> usize {
        self.malformed + self.inactive
    }
}
