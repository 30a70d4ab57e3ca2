//! Bulk product import from comma-separated text.
//!
//! [`parse_csv`] runs the whole pipeline: the input is split into lines, the
//! header is checked for every required column, and each non-blank data line
//! is tokenized, mapped and validated on its own. Only a missing header row,
//! a missing data row, or missing required columns abort the parse; every
//! other problem stays attached to the row that caused it.

mod header;
mod mapper;
mod sample;
mod tokenize;

use serde::Serialize;

pub use header::{missing_columns, resolve_header, Column, REQUIRED_COLUMNS};
pub use mapper::{map_row, MAX_CELL_BYTES};
pub use sample::{SAMPLE_CSV_CONTENT, SAMPLE_FILE_NAME};
pub use tokenize::tokenize_line;

use crate::error::RowError;
use crate::products::{Product, ProductDraft};
use crate::validate::{validate_product, RecordError};

pub const INSUFFICIENT_ROWS_MESSAGE: &str =
    "CSV file must contain at least a header row and one data row";

/// One data row after mapping and validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecord {
    #[serde(flatten)]
    pub product: ProductDraft,
    /// 1-based line number in the trimmed input; the header is line 1.
    pub row_number: usize,
    /// Empty exactly when the record is valid.
    pub errors: Vec<RecordError>,
}

impl ParsedRecord {
    /// Validate `product` and attach the outcome.
    #[must_use]
    pub fn from_draft(product: ProductDraft, row_number: usize) -> Self {
        let errors = validate_product(&product);
        Self {
            product,
            row_number,
            errors,
        }
    }

    /// A row that could not be mapped: empty fields and one synthetic error.
    #[must_use]
    pub fn malformed(row_number: usize, source: RowError) -> Self {
        Self {
            product: ProductDraft::default(),
            row_number,
            errors: vec![RecordError::Malformed {
                row: row_number,
                source,
            }],
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable error messages, in rule order.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Turn a record into a catalog entry. The caller supplies identity.
    #[must_use]
    pub fn into_product(self, id: uuid::Uuid, created_at: chrono::DateTime<chrono::Utc>) -> Product {
        self.product.into_product(id, created_at)
    }
}

/// Outcome of one [`parse_csv`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub valid_records: Vec<ParsedRecord>,
    pub invalid_records: Vec<ParsedRecord>,
    /// Non-blank data lines seen; excludes the header.
    pub total_rows: usize,
    /// Fatal problems. When non-empty nothing may be imported.
    pub global_errors: Vec<String>,
}

impl ParseResult {
    #[must_use]
    pub fn has_global_errors(&self) -> bool {
        !self.global_errors.is_empty()
    }

    /// `true` when there is at least one valid record and nothing fatal.
    #[must_use]
    pub fn is_importable(&self) -> bool {
        !self.has_global_errors() && !self.valid_records.is_empty()
    }

    fn aborted(message: String) -> Self {
        Self {
            global_errors: vec![message],
            ..Self::default()
        }
    }
}

/// Parse raw CSV text into validated product records.
///
/// Pure over its input: the same text always yields the same result, and no
/// identifiers or timestamps are generated here.
#[must_use]
pub fn parse_csv(content: &str) -> ParseResult {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.trim().split('\n').collect();

    if lines.len() < 2 {
        tracing::warn!(lines = lines.len(), "csv import rejected: no data rows");
        return ParseResult::aborted(INSUFFICIENT_ROWS_MESSAGE.to_string());
    }

    let header = resolve_header(&tokenize_line(lines[0]));
    let missing = missing_columns(&header);
    if !missing.is_empty() {
        let message = header::missing_columns_message(&missing);
        tracing::warn!(missing = missing.len(), "csv import rejected: {message}");
        return ParseResult::aborted(message);
    }

    let mut result = ParseResult::default();

    for (index, line) in lines.iter().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        result.total_rows += 1;
        let row_number = index + 1;

        let record = match map_row(&header, &tokenize_line(line), row_number) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(row = row_number, error = %err, "csv row could not be mapped");
                ParsedRecord::malformed(row_number, err)
            }
        };

        if record.is_valid() {
            result.valid_records.push(record);
        } else {
            result.invalid_records.push(record);
        }
    }

    tracing::debug!(
        total_rows = result.total_rows,
        valid = result.valid_records.len(),
        invalid = result.invalid_records.len(),
        "csv parse complete"
    );

    result
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
