use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use super::value::CellValue;

/// A record that can be shown as a table row.
///
/// Selection is tracked by identity, so every row must expose a stable identifier. Two rows
/// with equal ids are treated as the same row even if their other fields differ (the newer
/// value wins when the table refreshes its selection).
pub trait TableRow {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn row_id(&self) -> Self::Id;
}

/// A string-or-number row identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(n) => write!(f, "{n}"),
            RowKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Int(v as i64)
    }
}

impl From<u32> for RowKey {
    fn from(v: u32) -> Self {
        RowKey::Int(v as i64)
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Str(v.to_string())
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Str(v)
    }
}

/// A dynamic row: an identifier plus named fields.
///
/// Handy when the data has no Rust struct of its own (query results, fixtures, demos). Pair it
/// with [`super::Column::field`].
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: RowKey,
    fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(id: impl Into<RowKey>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn id(&self) -> &RowKey {
        &self.id
    }

    /// Missing fields read as [`CellValue::Empty`].
    pub fn get(&self, field: &str) -> CellValue {
        self.fields.get(field).cloned().unwrap_or_default()
    }
}

impl TableRow for Record {
    type Id = RowKey;

    fn row_id(&self) -> RowKey {
        self.id.clone()
    }
}
