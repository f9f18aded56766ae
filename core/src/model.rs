//! The store's nested read response: rows → families → columns → cells.
//!
//! Families are ordered by name, columns by qualifier, and cells by descending
//! timestamp, so the first cell of a column is always its latest version.

use std::fmt;

use bytes::Bytes;
use compact_str::CompactString;

/// Opaque row key, ordered lexicographically by bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowKey(Bytes);

impl RowKey {
    #[inline]
    pub fn new(key: impl Into<Bytes>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl fmt::Debug for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "RowKey({s:?})"),
            Err(_) => write!(f, "RowKey({:?})", self.0),
        }
    }
}

impl AsRef<[u8]> for RowKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for RowKey {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<&String> for RowKey {
    fn from(value: &String) -> Self {
        Self(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<Vec<u8>> for RowKey {
    fn from(value: Vec<u8>) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<&[u8]> for RowKey {
    fn from(value: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(value))
    }
}

/// A single timestamped version of a column value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub timestamp_micros: i64,
    pub value: Bytes,
    pub labels: Vec<CompactString>,
}

impl Cell {
    pub fn new(timestamp_micros: i64, value: impl Into<Bytes>) -> Self {
        Self {
            timestamp_micros,
            value: value.into(),
            labels: Vec::new(),
        }
    }
}

/// All versions stored under one qualifier, latest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub qualifier: Bytes,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(qualifier: impl Into<Bytes>, cells: Vec<Cell>) -> Self {
        Self {
            qualifier: qualifier.into(),
            cells,
        }
    }

    /// The most recent version, if the column has any.
    #[inline]
    pub fn latest(&self) -> Option<&Cell> {
        self.cells.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Family {
    pub name: CompactString,
    pub columns: Vec<Column>,
}

impl Family {
    pub fn new(name: impl Into<CompactString>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn column(&self, qualifier: impl AsRef<[u8]>) -> Option<&Column> {
        let qualifier = qualifier.as_ref();
        self.columns.iter().find(|c| c.qualifier == qualifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub key: RowKey,
    pub families: Vec<Family>,
}

impl Row {
    pub fn new(key: impl Into<RowKey>, families: Vec<Family>) -> Self {
        Self {
            key: key.into(),
            families,
        }
    }

    pub fn family(&self, name: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.name == name)
    }

    /// Total number of cells across every family and column.
    pub fn cell_count(&self) -> usize {
        self.families
            .iter()
            .flat_map(|f| &f.columns)
            .map(|c| c.cells.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keys_order_bytewise() {
        let mut keys = vec![
            RowKey::from("b"),
            RowKey::from(vec![0xff]),
            RowKey::from("a#2"),
            RowKey::from("a"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                RowKey::from("a"),
                RowKey::from("a#2"),
                RowKey::from("b"),
                RowKey::from(vec![0xff]),
            ]
        );
    }

    #[test]
    fn latest_is_first_cell() {
        let column = Column::new("q", vec![Cell::new(20, "new"), Cell::new(10, "old")]);
        assert_eq!(column.latest().map(|c| c.timestamp_micros), Some(20));
        assert!(Column::new("q", vec![]).latest().is_none());
    }

    #[test]
    fn cell_count_spans_families() {
        let row = Row::new(
            "r",
            vec![
                Family::new("a", vec![Column::new("x", vec![Cell::new(1, "1")])]),
                Family::new(
                    "b",
                    vec![Column::new("y", vec![Cell::new(2, "2"), Cell::new(1, "1")])],
                ),
            ],
        );
        assert_eq!(row.cell_count(), 3);
        assert!(row.family("b").and_then(|f| f.column("y")).is_some());
        assert!(row.family("c").is_none());
    }
}
