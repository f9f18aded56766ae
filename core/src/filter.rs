//! Filter predicates and the ordered chain that combines them.
//!
//! A chain is applied sequentially by the store: each predicate only sees the
//! cells that survived the previous ones. Order is therefore part of the
//! meaning, and [`FilterChain`] never reorders or deduplicates.

use std::ops::Bound;

use bytes::Bytes;
use compact_str::CompactString;
use smallvec::SmallVec;

use crate::error::{ReadError, Result};
use crate::escape::{escape_alternation, escape_literal};
use crate::range::RangeSpec;

/// One server-side predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RowFilter {
    PassAll,
    /// Matches nothing; used for empty alternations.
    BlockAll,
    RowKeyRegex(Bytes),
    FamilyNameRegex(CompactString),
    ColumnQualifierRegex(Bytes),
    /// Qualifier range, scoped to one family when known.
    ColumnRange {
        family: Option<CompactString>,
        start: Bound<Bytes>,
        end: Bound<Bytes>,
    },
    /// Start inclusive, end exclusive, in microseconds.
    TimestampRange {
        start_micros: Option<i64>,
        end_micros: Option<i64>,
    },
    ValueRegex(Bytes),
    ValueRange {
        start: Bound<Bytes>,
        end: Bound<Bytes>,
    },
    CellsPerColumnLimit(u32),
    CellsPerRowLimit(u32),
    CellsPerRowOffset(u32),
    StripValue,
    Chain(Vec<RowFilter>),
}

/// The part of a cell a predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RowKey,
    Family,
    Qualifier,
    Value,
}

/// Filter matching only the exact `literal`.
pub fn exact_match(field: Field, literal: impl AsRef<[u8]>) -> RowFilter {
    regex_filter(field, &escape_literal(literal.as_ref()))
}

/// Filter matching any one of `literals`.
///
/// An empty set fails closed: the result is [`RowFilter::BlockAll`], never a
/// filter that lets everything through.
pub fn exact_match_any<I, L>(field: Field, literals: I) -> RowFilter
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    match escape_alternation(literals) {
        Some(pattern) => regex_filter(field, &pattern),
        None => RowFilter::BlockAll,
    }
}

/// Filter using `pattern` verbatim. The store requires a full match.
pub fn regex_filter(field: Field, pattern: &str) -> RowFilter {
    match field {
        Field::RowKey => RowFilter::RowKeyRegex(Bytes::copy_from_slice(pattern.as_bytes())),
        Field::Family => RowFilter::FamilyNameRegex(CompactString::from(pattern)),
        Field::Qualifier => {
            RowFilter::ColumnQualifierRegex(Bytes::copy_from_slice(pattern.as_bytes()))
        }
        Field::Value => RowFilter::ValueRegex(Bytes::copy_from_slice(pattern.as_bytes())),
    }
}

/// Range filter over qualifiers or values.
///
/// Row keys are ranged through the row selector and families have no ordering
/// predicate, so both are rejected here.
pub fn range_filter(field: Field, range: RangeSpec) -> Result<RowFilter> {
    match field {
        Field::Qualifier => qualifier_range(None, range),
        Field::Value => {
            let (start, end) = range.into_bounds()?;
            Ok(RowFilter::ValueRange { start, end })
        }
        Field::RowKey | Field::Family => Err(ReadError::InvalidRangeSpec(
            "range filters apply to qualifiers and values only",
        )),
    }
}

/// Qualifier range, optionally scoped to `family`.
pub fn qualifier_range(family: Option<&str>, range: RangeSpec) -> Result<RowFilter> {
    let (start, end) = range.into_bounds()?;
    Ok(RowFilter::ColumnRange {
        family: family.map(CompactString::from),
        start,
        end,
    })
}

/// Cells with `start <= timestamp < end`. At least one edge is required.
pub fn timestamp_range(start_micros: Option<i64>, end_micros: Option<i64>) -> Result<RowFilter> {
    match (start_micros, end_micros) {
        (None, None) => Err(ReadError::InvalidRangeSpec(
            "timestamp range requires at least one bound",
        )),
        (Some(start), Some(end)) if start >= end => Err(ReadError::InvalidRangeSpec(
            "timestamp range start must precede its end",
        )),
        _ => Ok(RowFilter::TimestampRange {
            start_micros,
            end_micros,
        }),
    }
}

/// Keep only the `n` most recent cells of every column.
#[inline]
pub const fn cells_per_column_limit(n: u32) -> RowFilter {
    RowFilter::CellsPerColumnLimit(n)
}

/// Ordered, sequentially applied predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    filters: SmallVec<[RowFilter; 4]>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, filter: RowFilter) {
        self.filters.push(filter);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RowFilter> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[RowFilter] {
        &self.filters
    }

    /// Collapses the chain into the single filter sent to the store.
    pub fn to_filter(&self) -> Option<RowFilter> {
        match self.filters.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            many => Some(RowFilter::Chain(many.to_vec())),
        }
    }
}

impl FromIterator<RowFilter> for FilterChain {
    fn from_iter<T: IntoIterator<Item = RowFilter>>(iter: T) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a RowFilter;
    type IntoIter = std::slice::Iter<'a, RowFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
