use std::ops::Bound;

use crate::error::{ReadError, Result};
use crate::model::RowKey;
use crate::range::RangeSpec;

/// Contiguous span of row keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRange {
    pub start: Bound<RowKey>,
    pub end: Bound<RowKey>,
}

impl RowRange {
    pub fn contains(&self, key: &RowKey) -> bool {
        let above = match &self.start {
            Bound::Included(s) => key >= s,
            Bound::Excluded(s) => key > s,
            Bound::Unbounded => true,
        };
        let below = match &self.end {
            Bound::Included(e) => key <= e,
            Bound::Excluded(e) => key < e,
            Bound::Unbounded => true,
        };
        above && below
    }
}

/// Which rows a read touches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowSet {
    /// No selection: the whole table.
    #[default]
    All,
    /// Explicit keys in insertion order. Duplicates are allowed and redundant.
    Keys(Vec<RowKey>),
    Range(RowRange),
}

impl RowSet {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Keys(_) => "keys",
            Self::Range(_) => "range",
        }
    }

    /// An explicit key set with no keys selects no rows.
    pub fn is_empty_keys(&self) -> bool {
        matches!(self, Self::Keys(keys) if keys.is_empty())
    }
}

/// Accumulates the row selection and row limit of one read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelector {
    rows: RowSet,
    limit: u64,
}

impl RowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector for exactly `keys`. An empty set selects no rows.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<RowKey>,
    {
        Self {
            rows: RowSet::Keys(keys.into_iter().map(Into::into).collect()),
            limit: 0,
        }
    }

    /// Appends `keys` to the explicit key set.
    ///
    /// On a selector with no row selection yet, this switches it to an
    /// explicit key set even when `keys` is empty. The selection then reads
    /// no rows, and a later key range is rejected like after any other keys.
    pub fn add_keys<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<RowKey>,
    {
        match &mut self.rows {
            RowSet::Range(_) => {
                return Err(ReadError::InvalidSelectorState(
                    "cannot add row keys to a selector that already has a key range",
                ));
            }
            RowSet::Keys(existing) => existing.extend(keys.into_iter().map(Into::into)),
            rows @ RowSet::All => *rows = RowSet::Keys(keys.into_iter().map(Into::into).collect()),
        }
        Ok(())
    }

    /// Sets a `[start, end)` scan. Either edge may be absent, not both.
    pub fn add_key_range(
        &mut self,
        start_inclusive: Option<RowKey>,
        end_exclusive: Option<RowKey>,
    ) -> Result<()> {
        let start = start_inclusive.map_or(Bound::Unbounded, Bound::Included);
        let end = end_exclusive.map_or(Bound::Unbounded, Bound::Excluded);
        if matches!((&start, &end), (Bound::Unbounded, Bound::Unbounded)) {
            return Err(ReadError::InvalidRangeSpec(
                "row range requires at least one bound",
            ));
        }
        self.set_range(RowRange { start, end })
    }

    /// Sets a scan whose edges are independently open or closed.
    pub fn add_row_range(&mut self, range: RangeSpec) -> Result<()> {
        let (start, end) = range.into_bounds()?;
        self.set_range(RowRange {
            start: start.map(RowKey::from),
            end: end.map(RowKey::from),
        })
    }

    fn set_range(&mut self, range: RowRange) -> Result<()> {
        if let RowSet::Keys(_) = self.rows {
            return Err(ReadError::InvalidSelectorState(
                "cannot add a key range to a selector that already has row keys",
            ));
        }
        self.rows = RowSet::Range(range);
        Ok(())
    }

    /// Caps the number of rows returned; `0` leaves the store default.
    #[inline]
    pub fn limit(&mut self, n: u64) {
        self.limit = n;
    }

    #[inline]
    pub fn rows(&self) -> &RowSet {
        &self.rows
    }

    #[inline]
    pub fn rows_limit(&self) -> u64 {
        self.limit
    }

    pub fn into_parts(self) -> (RowSet, u64) {
        (self.rows, self.limit)
    }
}
