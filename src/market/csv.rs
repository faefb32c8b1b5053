//! Delimited-text market file loader.
//!
//! One offer per line as `name,rate,amount`. A leading header line and
//! blank lines are skipped; every other line must parse or the whole
//! load fails with the offending line number.

use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use super::MarketSource;
use crate::types::{LoanQuoteError, Offer};

/// Header line recognised and discarded by default.
pub const DEFAULT_HEADER: &str = "Lender,Rate,Available";

/// Field separator used by default.
pub const DEFAULT_DELIMITER: char = ',';

const COLUMNS: usize = 3;

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Layout of a market file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: char,
    /// Lines starting with this text are treated as the header.
    pub header: String,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse market text using the default layout.
pub fn parse(raw: &str) -> Result<Vec<Offer>, LoanQuoteError> {
    parse_with(raw, &CsvFormat::default())
}

/// Parse market text into offers, preserving line order.
pub fn parse_with(raw: &str, format: &CsvFormat) -> Result<Vec<Offer>, LoanQuoteError> {
    let mut offers = Vec::new();

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line == format.header {
            continue;
        }
        offers.push(parse_row(line, idx + 1, format.delimiter)?);
    }

    debug!(count = offers.len(), "Parsed market rows");
    Ok(offers)
}

fn parse_row(row: &str, line: usize, delimiter: char) -> Result<Offer, LoanQuoteError> {
    let format_error = |message: String| LoanQuoteError::Format { line, message };

    let columns: Vec<&str> = row.split(delimiter).map(str::trim).collect();
    let [name, rate, amount] = columns[..] else {
        return Err(format_error(format!(
            "expected {COLUMNS} columns, found {}",
            columns.len()
        )));
    };

    if name.is_empty() {
        return Err(format_error("lender name is empty".to_string()));
    }

    let rate = Decimal::from_str(rate)
        .map_err(|_| format_error(format!("rate '{rate}' is not a decimal number")))?;
    let amount = Decimal::from_str(amount)
        .map_err(|_| format_error(format!("amount '{amount}' is not a decimal number")))?;

    Offer::new(name, rate, amount).map_err(|e| format_error(e.to_string()))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse the market file at `path` using the default layout.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Offer>, LoanQuoteError> {
    load_with(path, &CsvFormat::default())
}

/// Read and parse the market file at `path`.
pub fn load_with(path: impl AsRef<Path>, format: &CsvFormat) -> Result<Vec<Offer>, LoanQuoteError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(LoanQuoteError::InvalidArgument(
            "market file path cannot be empty".to_string(),
        ));
    }

    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoanQuoteError::NotFound(path.display().to_string()),
        _ => LoanQuoteError::Io {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    let offers = parse_with(&raw, format)?;
    info!(path = %path.display(), lenders = offers.len(), "Market file loaded");
    Ok(offers)
}

// ---------------------------------------------------------------------------
// File-backed source
// ---------------------------------------------------------------------------

/// A market file on disk.
#[derive(Debug, Clone)]
pub struct CsvMarketFile {
    path: PathBuf,
    format: CsvFormat,
}

impl CsvMarketFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_format(path, CsvFormat::default())
    }

    pub fn with_format(path: impl Into<PathBuf>, format: CsvFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MarketSource for CsvMarketFile {
    fn offers(&self) -> Result<Vec<Offer>, LoanQuoteError> {
        load_with(&self.path, &self.format)
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
