//! CSV export of sweep results.
//!
//! One header row followed by one row per [`ScenarioResult`], in the order
//! given. Column names are the result's field names:
//!
//! ```csv
//! contribution_base,personal_contribution,employer_contribution,employer_extra_contribution,employee_extra_payment,annual_tax,bonus_tax,bonus_tax_method,monthly_cash,annual_contribution_income,annual_total_income,annual_taxable_income
//! ```
//!
//! Values are written unrounded so the file can feed charts or further
//! analysis.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use fund_core::ScenarioResult;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while exporting results.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes `results` as CSV to `writer` and returns the number of data rows.
pub fn write_results<W: Write>(
    writer: W,
    results: &[ScenarioResult],
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer.flush()?;

    Ok(results.len())
}

/// Creates (or truncates) the file at `path` and writes `results` to it.
pub fn export_to_file(
    path: &Path,
    results: &[ScenarioResult],
) -> Result<usize, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = write_results(file, results)?;
    info!(rows, path = %path.display(), "results exported");
    Ok(rows)
}
