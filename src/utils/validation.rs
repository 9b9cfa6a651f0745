//! Checks run on resolved settings before any network traffic. Every
//! failure is an `InvalidConfigValueError` naming the offending field.

use crate::utils::error::{Result, RosterError};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> RosterError {
    RosterError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// An absolute http(s) URL with a host.
pub fn require_http_url(field: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            value,
            format!("scheme must be http or https, not {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, value, "URL has no host"));
    }
    Ok(url)
}

/// Spreadsheet ids are spliced into a URL path, so only URL-safe id characters pass.
pub fn require_sheet_id(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(field, value, "sheet id is empty"));
    }
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(invalid(field, value, format!("unexpected character {:?}", c)));
    }
    Ok(())
}

pub fn require_placeholder(field: &str, template: &str, placeholder: &str) -> Result<()> {
    if !template.contains(placeholder) {
        return Err(invalid(
            field,
            template,
            format!("template has no {} placeholder", placeholder),
        ));
    }
    Ok(())
}

pub fn require_secret(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        // The value itself is never echoed back.
        return Err(invalid(field, "", "value is blank"));
    }
    Ok(())
}

pub fn require_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("must be at least {}", min)));
    }
    Ok(())
}

/// The roster is written as a single file, so the path must name one.
pub fn require_output_file(field: &str, path: &Path) -> Result<()> {
    let shown = path.display().to_string();
    if path.as_os_str().is_empty() {
        return Err(invalid(field, &shown, "path is empty"));
    }
    if path.to_string_lossy().contains('\0') {
        return Err(invalid(field, &shown, "path contains a NUL byte"));
    }
    if path.file_name().is_none() {
        return Err(invalid(field, &shown, "path does not name a file"));
    }
    if path.is_dir() {
        return Err(invalid(field, &shown, "path is an existing directory"));
    }
    Ok(())
}
