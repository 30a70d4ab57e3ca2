//! Row mapping: tokenized cells plus the resolved header become a validated
//! [`ParsedRecord`]. Conversion problems fall back to empty or zero values and
//! are left for validation to report.

use std::sync::LazyLock;

use regex::Regex;

use super::header::Column;
use super::ParsedRecord;
use crate::error::RowError;
use crate::products::ProductDraft;

/// Largest single cell the mapper accepts, in bytes.
pub const MAX_CELL_BYTES: usize = 64 * 1024;

/// Leading decimal number, the way lenient float parsers read `"4.5 stars"`.
static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid leading float regex")
});

/// Map one data row using the resolved header and validate the result.
///
/// `row_number` is the 1-based line of the row in the trimmed input and is
/// carried onto the record unchanged. Cells missing from the end of a short row are treated as empty. Positions
/// whose header is unrecognized are skipped. When a header names the same
/// column twice, the later cell wins.
///
/// # Errors
///
/// Returns [`RowError::CellTooLarge`] if a mapped cell exceeds
/// [`MAX_CELL_BYTES`].
pub fn map_row(
    header: &[Option<Column>],
    values: &[String],
    row_number: usize,
) -> Result<ParsedRecord, RowError> {
    map_fields(header, values).map(|draft| ParsedRecord::from_draft(draft, row_number))
}

fn map_fields(header: &[Option<Column>], values: &[String]) -> Result<ProductDraft, RowError> {
    let mut draft = ProductDraft::default();

    for (index, column) in header.iter().enumerate() {
        let Some(column) = column else { continue };
        let value = values.get(index).map_or("", String::as_str);

        if value.len() > MAX_CELL_BYTES {
            return Err(RowError::CellTooLarge {
                column: column.to_string(),
                len: value.len(),
                limit: MAX_CELL_BYTES,
            });
        }

        match column {
            Column::Name => draft.name = unquote(value).trim().to_string(),
            Column::Description => draft.description = unquote(value).trim().to_string(),
            Column::Images => draft.images = split_list(value),
            Column::AffiliateUrl => draft.affiliate_url = unquote(value).trim().to_string(),
            Column::Rating => draft.rating = parse_rating(value),
            Column::Tags => draft.tags = split_list(value),
            Column::Category => draft.category = unquote(value).trim().to_string(),
        }
    }

    Ok(draft)
}

/// Strip at most one leading and one trailing `"`.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Split an inner comma-separated list, trimming entries and dropping blanks.
/// Order and duplicates are kept.
fn split_list(value: &str) -> Vec<String> {
    unquote(value)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the leading number of a rating cell, `0.0` when there is none.
fn parse_rating(value: &str) -> f64 {
    let value = unquote(value).trim();
    LEADING_FLOAT_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_import::header::{resolve_header, REQUIRED_COLUMNS};

    fn canonical_header() -> Vec<Option<Column>> {
        REQUIRED_COLUMNS.into_iter().map(Some).collect()
    }

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn maps_every_column() {
        let record = map_row(
            &canonical_header(),
            &cells(&[
                "Mug",
                "A nice ceramic mug for coffee",
                "https://x.com/a.jpg, https://x.com/b.jpg",
                "https://amazon.com/x",
                "4.5",
                "New,Hot",
                "Home",
            ]),
            2,
        )
        .unwrap();

        assert_eq!(record.row_number, 2);
        assert!(record.is_valid(), "{:?}", record.errors);
        let draft = record.product;
        assert_eq!(draft.name, "Mug");
        assert_eq!(draft.description, "A nice ceramic mug for coffee");
        assert_eq!(draft.images, vec!["https://x.com/a.jpg", "https://x.com/b.jpg"]);
        assert_eq!(draft.affiliate_url, "https://amazon.com/x");
        assert!((draft.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(draft.tags, vec!["New", "Hot"]);
        assert_eq!(draft.category, "Home");
    }

    #[test]
    fn short_row_leaves_trailing_fields_empty() {
        let record = map_row(&canonical_header(), &cells(&["Mug", "Nice mug"]), 3).unwrap();
        assert!(!record.is_valid());
        let draft = record.product;
        assert_eq!(draft.name, "Mug");
        assert!(draft.images.is_empty());
        assert!(draft.affiliate_url.is_empty());
        assert!(draft.rating.abs() < f64::EPSILON);
        assert!(draft.category.is_empty());
    }

    #[test]
    fn unknown_columns_are_skipped() {
        let header = resolve_header(&cells(&["sku", "name"]));
        let record = map_row(&header, &cells(&["SKU-1", "Mug"]), 2).unwrap();
        assert_eq!(record.product.name, "Mug");
    }

    #[test]
    fn list_cells_drop_blanks_and_keep_duplicates() {
        assert_eq!(split_list(" a , ,b,,a "), vec!["a", "b", "a"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn list_cells_strip_one_layer_of_quotes() {
        assert_eq!(split_list("\"a,b\""), vec!["a", "b"]);
        assert_eq!(split_list("\"\"a\"\""), vec!["\"a\""]);
    }

    #[test]
    fn unquote_strips_at_most_one_quote_each_side() {
        assert_eq!(unquote("\"Mug\""), "Mug");
        assert_eq!(unquote("\"\"Mug\"\""), "\"Mug\"");
        assert_eq!(unquote("\"Mug"), "Mug");
        assert_eq!(unquote("\""), "");
        assert_eq!(unquote("Mug"), "Mug");
    }

    #[test]
    fn rating_reads_leading_number() {
        assert!((parse_rating("4.5") - 4.5).abs() < f64::EPSILON);
        assert!((parse_rating("4.5 stars") - 4.5).abs() < f64::EPSILON);
        assert!((parse_rating("\"3\"") - 3.0).abs() < f64::EPSILON);
        assert!((parse_rating(".5") - 0.5).abs() < f64::EPSILON);
        assert!((parse_rating("5.") - 5.0).abs() < f64::EPSILON);
        assert!((parse_rating("-2") + 2.0).abs() < f64::EPSILON);
        assert!((parse_rating("1e0") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unparseable_rating_falls_back_to_zero() {
        for raw in ["", "abc", "four", "NaN", "inf", "stars 4"] {
            assert!(parse_rating(raw).abs() < f64::EPSILON, "{raw:?}");
        }
    }

    #[test]
    fn oversized_cell_is_a_row_error() {
        let huge = "x".repeat(MAX_CELL_BYTES + 1);
        let err = map_row(&canonical_header(), &cells(&["Mug", huge.as_str()]), 2).unwrap_err();
        assert_eq!(
            err,
            RowError::CellTooLarge {
                column: "description".to_string(),
                len: MAX_CELL_BYTES + 1,
                limit: MAX_CELL_BYTES,
            }
        );
    }

    #[test]
    fn oversized_cell_in_unknown_column_is_ignored() {
        let header = resolve_header(&cells(&["name", "notes"]));
        let huge = "x".repeat(MAX_CELL_BYTES + 1);
        let record = map_row(&header, &cells(&["Mug", huge.as_str()]), 2).unwrap();
        assert_eq!(record.product.name, "Mug");
    }
}
