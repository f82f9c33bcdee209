// File: crates/rank-core/src/record.rs
// Summary: Scalar/Record model for REST payload rows, plus JSON ingestion.
// Notes:
// - Row shape is defined per page (keywords, pages, competitors, conflicts,
//   audits...), never globally; a Record is just a field -> scalar map.
// - Unknown fields resolve to Null rather than erroring, so column sets can
//   be reused across backend versions.

use std::collections::HashMap;

use serde_json::Value;

/// One cell value: the scalar subset of JSON plus a flat list.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Scalar>),
}

impl Scalar {
    /// Convert a JSON value. Objects are kept as their JSON text so a
    /// misshapen payload still round-trips into something displayable.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Scalar::Null, Scalar::Number),
            Value::String(s) => Scalar::Text(s.clone()),
            Value::Array(items) => Scalar::List(items.iter().map(Scalar::from_json).collect()),
            Value::Object(_) => Scalar::Text(value.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric view of the cell; only `Number` qualifies.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Display coercion used by tables and export: Null is empty, lists are
    /// comma-joined, integral numbers drop the trailing `.0`.
    pub fn display(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(v) => format_number(*v),
            Scalar::Text(s) => s.clone(),
            Scalar::List(items) => {
                let parts: Vec<String> = items.iter().map(Scalar::display).collect();
                parts.join(", ")
            }
        }
    }
}

fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Number(f64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Scalar {
    fn from(items: Vec<T>) -> Self {
        Scalar::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}

/// One row of a fetched collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Scalar>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.fields.get(name)
    }

    /// Field lookup where a missing field is simply Null.
    pub fn field(&self, name: &str) -> Scalar {
        self.fields.get(name).cloned().unwrap_or(Scalar::Null)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert one JSON value. Non-object values land under a `value` field
    /// so even a bare scalar row stays addressable.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let fields = map
                    .iter()
                    .map(|(k, v)| (k.clone(), Scalar::from_json(v)))
                    .collect();
                Self { fields }
            }
            other => Record::new().with("value", Scalar::from_json(other)),
        }
    }
}

/// Convert a REST response body into a record collection.
/// Arrays map element-wise; a single object becomes a one-row collection;
/// anything else is an empty collection.
pub fn records_from_json(value: &Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items.iter().map(Record::from_json).collect(),
        Value::Object(_) => vec![Record::from_json(value)],
        _ => Vec::new(),
    }
}
