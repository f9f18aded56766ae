//! In-process [`ExecutionAdapter`] with store read semantics.
//!
//! Rows are kept sorted by key, families by name, qualifiers by bytes and
//! cells latest first. Filters are evaluated the way the store does: a chain
//! feeds each predicate the survivors of the previous one, regexes must match
//! the whole value, and rows left without cells are not returned.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use compact_str::CompactString;
use regex::bytes::Regex;
use thiserror::Error;

use crate::adapter::ExecutionAdapter;
use crate::filter::RowFilter;
use crate::model::{Cell, Column, Family, Row, RowKey};
use crate::range;
use crate::request::ReadRowsRequest;
use crate::selector::RowSet;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Invalid regex {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Regex is not valid UTF-8")]
    NonUtf8Regex,
}

type Columns = BTreeMap<Bytes, Vec<Cell>>;
type Families = BTreeMap<CompactString, Columns>;

#[derive(Debug, Default)]
pub struct MemoryAdapter {
    rows: BTreeMap<RowKey, Families>,
    reads: AtomicUsize,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `cell`, replacing any cell with the same timestamp.
    pub fn insert(
        &mut self,
        key: impl Into<RowKey>,
        family: &str,
        qualifier: impl Into<Bytes>,
        cell: Cell,
    ) {
        let cells = self
            .rows
            .entry(key.into())
            .or_default()
            .entry(CompactString::from(family))
            .or_default()
            .entry(qualifier.into())
            .or_default();
        match cells.binary_search_by(|c| cell.timestamp_micros.cmp(&c.timestamp_micros)) {
            Ok(i) => cells[i] = cell,
            Err(i) => cells.insert(i, cell),
        }
    }

    pub fn with_cell(
        mut self,
        key: impl Into<RowKey>,
        family: &str,
        qualifier: impl Into<Bytes>,
        timestamp_micros: i64,
        value: impl Into<Bytes>,
    ) -> Self {
        self.insert(key, family, qualifier, Cell::new(timestamp_micros, value));
        self
    }

    /// How many reads reached this adapter.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn selected(&self, rows: &RowSet) -> Vec<(&RowKey, &Families)> {
        match rows {
            RowSet::All => self.rows.iter().collect(),
            RowSet::Keys(keys) => {
                let mut keys: Vec<&RowKey> = keys.iter().collect();
                keys.sort();
                keys.dedup();
                keys.into_iter()
                    .filter_map(|k| self.rows.get_key_value(k))
                    .collect()
            }
            RowSet::Range(range) if is_empty_range(&range.start, &range.end) => Vec::new(),
            RowSet::Range(range) => self
                .rows
                .range((range.start.as_ref(), range.end.as_ref()))
                .collect(),
        }
    }
}

/// Ranges `BTreeMap::range` would reject.
fn is_empty_range(start: &Bound<RowKey>, end: &Bound<RowKey>) -> bool {
    match (start, end) {
        (Bound::Included(s), Bound::Included(e)) => s > e,
        (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) => {
            s >= e
        }
        _ => false,
    }
}

impl ExecutionAdapter for MemoryAdapter {
    type Error = MemoryError;

    fn read_rows(&self, request: &ReadRowsRequest) -> Result<Vec<Row>, MemoryError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let filter = request.filter.as_ref().map(Compiled::new).transpose()?;

        let mut out = Vec::new();
        for (key, families) in self.selected(&request.rows) {
            if request.rows_limit > 0 && out.len() as u64 >= request.rows_limit {
                break;
            }
            let mut cells = flatten(families);
            if let Some(filter) = &filter {
                cells = filter.apply(key, cells);
            }
            if !cells.is_empty() {
                out.push(nest(key.clone(), cells));
            }
        }
        Ok(out)
    }
}

struct FlatCell {
    family: CompactString,
    qualifier: Bytes,
    cell: Cell,
}

fn flatten(families: &Families) -> Vec<FlatCell> {
    let mut out = Vec::new();
    for (family, columns) in families {
        for (qualifier, cells) in columns {
            out.extend(cells.iter().map(|cell| FlatCell {
                family: family.clone(),
                qualifier: qualifier.clone(),
                cell: cell.clone(),
            }));
        }
    }
    out
}

fn nest(key: RowKey, cells: Vec<FlatCell>) -> Row {
    let mut families: Vec<Family> = Vec::new();
    for FlatCell {
        family,
        qualifier,
        cell,
    } in cells
    {
        if families.last().is_none_or(|f| f.name != family) {
            families.push(Family::new(family, Vec::new()));
        }
        let Some(fam) = families.last_mut() else {
            continue;
        };
        if fam.columns.last().is_none_or(|c| c.qualifier != qualifier) {
            fam.columns.push(Column::new(qualifier, Vec::new()));
        }
        if let Some(column) = fam.columns.last_mut() {
            column.cells.push(cell);
        }
    }
    Row::new(key, families)
}

/// A request filter with its regexes compiled once.
enum Compiled {
    Pass,
    Block,
    RowKey(Regex),
    Family(Regex),
    Qualifier(Regex),
    ColumnRange {
        family: Option<CompactString>,
        start: Bound<Bytes>,
        end: Bound<Bytes>,
    },
    Timestamp {
        start: Option<i64>,
        end: Option<i64>,
    },
    Value(Regex),
    ValueRange {
        start: Bound<Bytes>,
        end: Bound<Bytes>,
    },
    PerColumn(u32),
    PerRowLimit(u32),
    PerRowOffset(u32),
    Strip,
    Chain(Vec<Compiled>),
}

fn full_match(pattern: &[u8]) -> Result<Regex, MemoryError> {
    let pattern = std::str::from_utf8(pattern).map_err(|_| MemoryError::NonUtf8Regex)?;
    Regex::new(&format!("(?s-u)^(?:{pattern})$")).map_err(|source| MemoryError::InvalidRegex {
        pattern: pattern.to_owned(),
        source,
    })
}

impl Compiled {
    fn new(filter: &RowFilter) -> Result<Self, MemoryError> {
        Ok(match filter {
            RowFilter::PassAll => Self::Pass,
            RowFilter::BlockAll => Self::Block,
            RowFilter::RowKeyRegex(p) => Self::RowKey(full_match(p)?),
            RowFilter::FamilyNameRegex(p) => Self::Family(full_match(p.as_bytes())?),
            RowFilter::ColumnQualifierRegex(p) => Self::Qualifier(full_match(p)?),
            RowFilter::ColumnRange { family, start, end } => Self::ColumnRange {
                family: family.clone(),
                start: start.clone(),
                end: end.clone(),
            },
            RowFilter::TimestampRange {
                start_micros,
                end_micros,
            } => Self::Timestamp {
                start: *start_micros,
                end: *end_micros,
            },
            RowFilter::ValueRegex(p) => Self::Value(full_match(p)?),
            RowFilter::ValueRange { start, end } => Self::ValueRange {
                start: start.clone(),
                end: end.clone(),
            },
            RowFilter::CellsPerColumnLimit(n) => Self::PerColumn(*n),
            RowFilter::CellsPerRowLimit(n) => Self::PerRowLimit(*n),
            RowFilter::CellsPerRowOffset(n) => Self::PerRowOffset(*n),
            RowFilter::StripValue => Self::Strip,
            RowFilter::Chain(filters) => {
                Self::Chain(filters.iter().map(Self::new).collect::<Result<_, _>>()?)
            }
        })
    }

    fn apply(&self, key: &RowKey, mut cells: Vec<FlatCell>) -> Vec<FlatCell> {
        match self {
            Self::Pass => cells,
            Self::Block => Vec::new(),
            Self::RowKey(re) => {
                if re.is_match(key.as_bytes()) {
                    cells
                } else {
                    Vec::new()
                }
            }
            Self::Family(re) => {
                cells.retain(|c| re.is_match(c.family.as_bytes()));
                cells
            }
            Self::Qualifier(re) => {
                cells.retain(|c| re.is_match(&c.qualifier));
                cells
            }
            Self::ColumnRange { family, start, end } => {
                cells.retain(|c| {
                    family.as_ref().is_none_or(|f| *f == c.family)
                        && range::contains(start, end, &c.qualifier)
                });
                cells
            }
            Self::Timestamp { start, end } => {
                cells.retain(|c| {
                    let ts = c.cell.timestamp_micros;
                    start.is_none_or(|s| ts >= s) && end.is_none_or(|e| ts < e)
                });
                cells
            }
            Self::Value(re) => {
                cells.retain(|c| re.is_match(&c.cell.value));
                cells
            }
            Self::ValueRange { start, end } => {
                cells.retain(|c| range::contains(start, end, &c.cell.value));
                cells
            }
            Self::PerColumn(n) => {
                let mut out = Vec::with_capacity(cells.len());
                let mut prev: Option<(CompactString, Bytes)> = None;
                let mut seen = 0u32;
                for c in cells {
                    let same = prev
                        .as_ref()
                        .is_some_and(|(f, q)| *f == c.family && *q == c.qualifier);
                    if !same {
                        prev = Some((c.family.clone(), c.qualifier.clone()));
                        seen = 0;
                    }
                    seen += 1;
                    if seen <= *n {
                        out.push(c);
                    }
                }
                out
            }
            Self::PerRowLimit(n) => {
                cells.truncate(*n as usize);
                cells
            }
            Self::PerRowOffset(n) => cells.into_iter().skip(*n as usize).collect(),
            Self::Strip => {
                for c in &mut cells {
                    c.cell.value = Bytes::new();
                }
                cells
            }
            Self::Chain(filters) => filters
                .iter()
                .fold(cells, |cells, filter| filter.apply(key, cells)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Field, FilterChain, cells_per_column_limit, exact_match};
    use crate::selector::RowSelector;

    fn store() -> MemoryAdapter {
        MemoryAdapter::new()
            .with_cell("a", "cf", "x", 1, "a-x-1")
            .with_cell("a", "cf", "x", 3, "a-x-3")
            .with_cell("a", "cf", "y", 2, "a-y-2")
            .with_cell("a", "meta", "x", 1, "a-meta")
            .with_cell("b", "cf", "x", 5, "b-x-5")
            .with_cell("c", "meta", "z", 1, "c-meta")
    }

    fn request(selector: RowSelector, filters: &[RowFilter]) -> ReadRowsRequest {
        let chain: FilterChain = filters.iter().cloned().collect();
        ReadRowsRequest::new("t", None, selector, &chain)
    }

    #[test]
    fn cells_are_latest_first() {
        let rows = store().read_rows(&request(RowSelector::new(), &[])).unwrap();
        let cells = &rows[0].families[0].columns[0].cells;
        assert_eq!(
            cells.iter().map(|c| c.timestamp_micros).collect::<Vec<_>>(),
            [3, 1]
        );
    }

    #[test]
    fn keys_are_returned_sorted_and_deduplicated() {
        let mut selector = RowSelector::new();
        selector.add_keys(["c", "a", "c", "missing"]).unwrap();
        let rows = store().read_rows(&request(selector, &[])).unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, [RowKey::from("a"), RowKey::from("c")]);
    }

    #[test]
    fn family_filter_drops_rows_without_cells() {
        let rows = store()
            .read_rows(&request(RowSelector::new(), &[exact_match(Field::Family, "meta")]))
            .unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, [RowKey::from("a"), RowKey::from("c")]);
        assert!(rows.iter().all(|r| r.families.len() == 1));
    }

    #[test]
    fn cells_per_column_limit_keeps_latest_of_each_column() {
        let rows = store()
            .read_rows(&request(RowSelector::new(), &[cells_per_column_limit(1)]))
            .unwrap();
        for row in &rows {
            for family in &row.families {
                assert!(family.columns.iter().all(|c| c.cells.len() == 1));
            }
        }
        assert_eq!(rows[0].families[0].columns[0].cells[0].timestamp_micros, 3);
    }

    #[test]
    fn rows_limit_caps_returned_rows() {
        let mut selector = RowSelector::new();
        selector.limit(2);
        let rows = store().read_rows(&request(selector, &[])).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn invalid_regex_is_reported() {
        let err = store()
            .read_rows(&request(
                RowSelector::new(),
                &[RowFilter::ColumnQualifierRegex(Bytes::from_static(b"("))],
            ))
            .unwrap_err();
        assert!(matches!(err, MemoryError::InvalidRegex { .. }));
    }

    #[test]
    fn reads_are_counted() {
        let store = store();
        store.read_rows(&request(RowSelector::new(), &[])).unwrap();
        store.read_rows(&request(RowSelector::new(), &[])).unwrap();
        assert_eq!(store.read_count(), 2);
    }
}
