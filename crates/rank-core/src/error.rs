// File: crates/rank-core/src/error.rs
// Summary: Typed error enums for export and query operations.

use thiserror::Error;

use crate::query::QueryKey;

/// Failures while producing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A derive accessor or formatter failed for the named column.
    #[error("column '{header}' failed to resolve")]
    Column {
        header: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("csv encoding failed")]
    Csv(#[from] csv::Error),

    #[error("spreadsheet encoding failed")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("export io failed")]
    Io(#[from] std::io::Error),
}

/// Failures while running a query through the cache.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The fetcher closure failed; any stale cached entry is left in place.
    #[error("fetch failed for query '{key}'")]
    Fetch {
        key: QueryKey,
        #[source]
        source: anyhow::Error,
    },
}
