//! Request entry points.
//!
//! Both handlers parse the request body as JSON, read one configured cell
//! through a fresh [`SheetAccess`], and answer with plain text. Facade errors
//! are returned unchanged for the hosting platform to report.

use std::fmt;

use thiserror::Error;

use crate::facade::SheetAccess;
use crate::host::SpreadsheetService;

/// Which cell the entry points read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryConfig {
    /// Sheet holding the cell. Default: "Sheet1".
    pub sheet_name: String,
    /// Cell position in `A1` notation. Default: "A1".
    pub cell: String,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            cell: "A1".to_string(),
        }
    }
}

/// An incoming request; `contents` is the raw JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub contents: String,
}

impl Request {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

/// A plain-text response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOutput(String);

impl TextOutput {
    pub fn content(&self) -> &str {
        &self.0
    }

    pub fn into_content(self) -> String {
        self.0
    }
}

impl fmt::Display for TextOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Malformed request payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Sheet(#[from] crate::Error),
}

/// Parse the payload, then read the configured cell.
fn read_cell<S: SpreadsheetService>(
    spreadsheet: S,
    request: &Request,
    config: &EntryConfig,
) -> Result<String, HandlerError> {
    let data: serde_json::Value = serde_json::from_str(&request.contents)?;
    tracing::debug!(%data, "parsed request payload");

    let access = SheetAccess::new(spreadsheet);
    let value = access.cell_value(&config.sheet_name, &config.cell)?;
    tracing::debug!(sheet = %config.sheet_name, cell = %config.cell, value = %value, "read cell");
    Ok(value)
}

/// Echo the raw payload back, after reading the default cell.
pub fn do_post<S: SpreadsheetService>(
    spreadsheet: S,
    request: &Request,
) -> Result<TextOutput, HandlerError> {
    do_post_with(spreadsheet, request, &EntryConfig::default())
}

/// Like [`do_post`], reading the cell named by `config`.
pub fn do_post_with<S: SpreadsheetService>(
    spreadsheet: S,
    request: &Request,
    config: &EntryConfig,
) -> Result<TextOutput, HandlerError> {
    read_cell(spreadsheet, request, config)?;
    tracing::info!("post handled");
    Ok(TextOutput(format!("Received payload: {}", request.contents)))
}

/// Answer with the value of the default cell.
pub fn do_get<S: SpreadsheetService>(
    spreadsheet: S,
    request: &Request,
) -> Result<TextOutput, HandlerError> {
    do_get_with(spreadsheet, request, &EntryConfig::default())
}

/// Like [`do_get`], reading the cell named by `config`.
pub fn do_get_with<S: SpreadsheetService>(
    spreadsheet: S,
    request: &Request,
    config: &EntryConfig,
) -> Result<TextOutput, HandlerError> {
    let value = read_cell(spreadsheet, request, config)?;
    tracing::info!("get handled");
    Ok(TextOutput(format!("Received payload: {value}")))
}
