use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed account: {0}")]
    MalformedHandle(String),

    #[error("Roster source returned status {status}: {message}")]
    SourceError { status: u16, message: String },

    #[error("Directory API returned status {status}: {message}")]
    DirectoryError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl RosterError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RosterError::ConfigError { .. }
                | RosterError::MissingConfigError { .. }
                | RosterError::InvalidConfigValueError { .. }
        )
    }

    /// Process exit status for a run that ends with this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else {
            1
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RosterError::ApiError(_) | RosterError::SourceError { .. } => {
                "Check network access and that the spreadsheet is shared publicly"
            }
            RosterError::CsvError(_) => "Check that the spreadsheet export is valid CSV",
            RosterError::IoError(_) => "Check that the output path is writable",
            RosterError::SerializationError(_) | RosterError::DirectoryError { .. } => {
                "Check MASTODON_API_BASE_URL points at a Mastodon-compatible server"
            }
            RosterError::MalformedHandle(_) => "Use the form @user@server or https://server/@user",
            RosterError::MissingConfigError { .. } => {
                "Set MASTODON_API_BASE_URL and MASTODON_ACCESS_TOKEN, or disable the activity filter"
            }
            RosterError::ConfigError { .. } | RosterError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
