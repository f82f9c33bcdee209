// File: crates/rank-core/src/column.rs
// Summary: Column descriptors: header, tagged accessor, optional formatter.
// Notes:
// - Accessors are a tagged variant (static field name vs. derive closure)
//   resolved through a single dispatch point.
// - Columns carry no persisted identity; callers build them fresh per
//   render/export, so everything here is cheap to clone.

use std::sync::Arc;

use crate::record::{Record, Scalar};

/// Fallible derive closure: computes a cell from the whole row.
pub type DeriveFn = Arc<dyn Fn(&Record) -> anyhow::Result<Scalar> + Send + Sync>;

/// Display formatter applied after accessor resolution.
pub type FormatFn = Arc<dyn Fn(&Scalar) -> String + Send + Sync>;

/// How a column obtains its cell value from a record.
#[derive(Clone)]
pub enum Accessor {
    /// Static field lookup; a missing field resolves to Null.
    Field(String),
    /// Derived value computed from the row.
    Derive(DeriveFn),
}

impl Accessor {
    /// The single dispatch point for cell resolution.
    pub fn resolve(&self, record: &Record) -> anyhow::Result<Scalar> {
        match self {
            Accessor::Field(name) => Ok(record.field(name)),
            Accessor::Derive(f) => f(record),
        }
    }
}

/// One table/export column.
#[derive(Clone)]
pub struct Column {
    pub header: String,
    pub accessor: Accessor,
    pub format: Option<FormatFn>,
}

impl Column {
    /// Column backed by a static field lookup.
    pub fn field(header: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            accessor: Accessor::Field(field_name.into()),
            format: None,
        }
    }

    /// Column backed by an infallible derive closure.
    pub fn derived(
        header: impl Into<String>,
        f: impl Fn(&Record) -> Scalar + Send + Sync + 'static,
    ) -> Self {
        Self::try_derived(header, move |record| Ok(f(record)))
    }

    /// Column backed by a fallible derive closure; failures surface as a
    /// typed error from the calling operation.
    pub fn try_derived(
        header: impl Into<String>,
        f: impl Fn(&Record) -> anyhow::Result<Scalar> + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: header.into(),
            accessor: Accessor::Derive(Arc::new(f)),
            format: None,
        }
    }

    pub fn with_format(mut self, f: impl Fn(&Scalar) -> String + Send + Sync + 'static) -> Self {
        self.format = Some(Arc::new(f));
        self
    }

    /// Resolve the raw cell for a record.
    pub fn cell(&self, record: &Record) -> anyhow::Result<Scalar> {
        self.accessor.resolve(record)
    }

    /// Resolve and coerce to the display string (formatter wins when set).
    pub fn display(&self, record: &Record) -> anyhow::Result<String> {
        let cell = self.cell(record)?;
        Ok(match &self.format {
            Some(f) => f(&cell),
            None => cell.display(),
        })
    }
}
