//! The `import` command: file acquisition, parsing, reporting, and handing
//! valid records to the catalog store.

use std::fmt::Write as _;
use std::path::Path;

use buyloom_core::{parse_csv, AppConfig, ParseResult, Product};
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::JsonCatalog;

/// Reasons a file is refused before its content is parsed.
#[derive(Debug, Error)]
pub(crate) enum ImportFileError {
    #[error("{path} is not a CSV file; expected a .csv extension")]
    NotCsv { path: String },

    #[error("{path} is {size} bytes; the import limit is {limit} bytes")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Extension and size checks, independent of the filesystem.
pub(crate) fn check_import_file(path: &Path, size: u64, limit: u64) -> Result<(), ImportFileError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ImportFileError::NotCsv {
            path: path.display().to_string(),
        });
    }

    if size > limit {
        return Err(ImportFileError::TooLarge {
            path: path.display().to_string(),
            size,
            limit,
        });
    }

    Ok(())
}

/// Read an import file after checking its extension and size.
///
/// Content that is not UTF-8 is reported as [`ImportFileError::Io`].
pub(crate) fn read_import_file(path: &Path, limit: u64) -> Result<String, ImportFileError> {
    let io_err = |source| ImportFileError::Io {
        path: path.display().to_string(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    check_import_file(path, size, limit)?;
    std::fs::read_to_string(path).map_err(io_err)
}

/// Human-readable summary of a parse: fatal errors first, then counts, then
/// one block per rejected row.
pub(crate) fn render_report(result: &ParseResult) -> String {
    let mut out = String::new();

    if result.has_global_errors() {
        for err in &result.global_errors {
            let _ = writeln!(out, "error: {err}");
        }
        return out;
    }

    let _ = writeln!(
        out,
        "parsed {} rows: {} valid, {} invalid",
        result.total_rows,
        result.valid_records.len(),
        result.invalid_records.len()
    );

    for record in &result.invalid_records {
        let _ = writeln!(out, "row {}:", record.row_number);
        for err in &record.errors {
            let _ = writeln!(out, "  - {err}");
        }
    }

    out
}

/// Assign fresh identities to every valid record.
pub(crate) fn into_products(result: ParseResult) -> Vec<Product> {
    let created_at = Utc::now();
    result
        .valid_records
        .into_iter()
        .map(|record| record.into_product(Uuid::new_v4(), created_at))
        .collect()
}

/// Run the `import` command.
///
/// # Errors
///
/// Returns an error if the file is refused, the CSV has fatal errors, or the
/// catalog cannot be written. Rejected rows are reported, not treated as
/// failures.
pub(crate) fn run_import(
    config: &AppConfig,
    path: &Path,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let content = read_import_file(path, config.import_max_bytes)?;
    let result = parse_csv(&content);

    tracing::info!(
        path = %path.display(),
        total_rows = result.total_rows,
        valid = result.valid_records.len(),
        invalid = result.invalid_records.len(),
        "csv parsed"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result));
    }

    if result.has_global_errors() {
        anyhow::bail!(
            "import of {} aborted with {} fatal error(s)",
            path.display(),
            result.global_errors.len()
        );
    }

    if result.valid_records.is_empty() {
        tracing::warn!(path = %path.display(), "no valid products to import");
        return Ok(());
    }

    let count = result.valid_records.len();
    if dry_run {
        if !json {
            println!("dry-run: would import {count} products");
        }
        return Ok(());
    }

    let catalog = JsonCatalog::new(&config.catalog_path);
    let total = catalog.append(into_products(result))?;
    tracing::info!(
        imported = count,
        catalog_size = total,
        catalog = %catalog.path().display(),
        "products imported"
    );
    if !json {
        println!("imported {count} products into {}", catalog.path().display());
    }

    Ok(())
}
