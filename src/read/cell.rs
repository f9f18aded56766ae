use widecol_core::filter::{
    cells_per_column_limit, range_filter, regex_filter, timestamp_range, Field, RowFilter,
};
use widecol_core::range::RangeSpec;

use super::column::ColumnTier;
use super::Read;
use crate::error::Result;
use crate::projection::AllCells;

impl<'c, A, C: ColumnTier> Read<'c, A, AllCells<C>> {
    /// Keeps the `n` most recent versions of every column.
    ///
    /// As with row limits, `0` means no limit and adds no predicate.
    ///
    /// ```
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let read = client.read("users")?.row("u1").family("f").column("q").cells().limit(2);
    /// assert_eq!(read.filters().len(), 3);
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    ///
    /// The latest cell is already limited to one version:
    ///
    /// ```compile_fail,E0599
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let read = client.read("users")?.row("u1").family("f").column("q").latest_cell().limit(2);
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    pub fn limit(self, n: u32) -> Self {
        if n == 0 {
            return self;
        }
        self.narrow(cells_per_column_limit(n))
    }

    /// Keeps cells written in `[start, end)`, in microseconds; `None` leaves
    /// that side open.
    pub fn timestamp_range(
        self,
        start_micros: Option<i64>,
        end_micros: Option<i64>,
    ) -> Result<Self> {
        let filter = timestamp_range(start_micros, end_micros)?;
        Ok(self.narrow(filter))
    }

    /// Keeps cells written at or after `start_micros`.
    pub fn start_timestamp_micros(self, start_micros: i64) -> Self {
        self.narrow(RowFilter::TimestampRange {
            start_micros: Some(start_micros),
            end_micros: None,
        })
    }

    /// Keeps cells written before `end_micros`.
    pub fn end_timestamp_micros(self, end_micros: i64) -> Self {
        self.narrow(RowFilter::TimestampRange {
            start_micros: None,
            end_micros: Some(end_micros),
        })
    }

    /// Keeps cells whose whole value matches `pattern`.
    pub fn value_regex(self, pattern: &str) -> Self {
        self.narrow(regex_filter(Field::Value, pattern))
    }

    pub fn value_range(self, range: RangeSpec) -> Result<Self> {
        let filter = range_filter(Field::Value, range)?;
        Ok(self.narrow(filter))
    }
}
