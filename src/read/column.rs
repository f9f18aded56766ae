use std::ops::Bound;

use bytes::Bytes;
use widecol_core::filter::{cells_per_column_limit, qualifier_range, RowFilter};
use widecol_core::range::RangeSpec;

use super::family::FamilyTier;
use super::sealed::Sealed;
use super::Read;
use crate::error::Result;
use crate::projection::{AllCells, LatestCell, ManyColumns, OneColumn};

/// Read states narrowed to one or many columns.
pub trait ColumnTier: Sealed {}

impl<F: FamilyTier> Sealed for OneColumn<F> {}
impl<F: FamilyTier> Sealed for ManyColumns<F> {}
impl<F: FamilyTier> ColumnTier for OneColumn<F> {}
impl<F: FamilyTier> ColumnTier for ManyColumns<F> {}

impl<'c, A, C: ColumnTier> Read<'c, A, C> {
    /// Keeps the most recent cell of every selected column.
    ///
    /// Over several rows or columns this is one cell per (row, column), not a
    /// single latest cell overall.
    pub fn latest_cell(self) -> Read<'c, A, LatestCell<C>> {
        self.narrow(cells_per_column_limit(1))
    }

    /// Keeps every cell version.
    pub fn cells(self) -> Read<'c, A, AllCells<C>> {
        self.into_state()
    }
}

/// Qualifier ranges. Each bound is its own predicate, scoped to the family
/// chosen with `family(name)` when there is one, so chaining a start and an
/// end keeps the columns between them.
impl<'c, A, F: FamilyTier> Read<'c, A, ManyColumns<F>> {
    /// Keeps the columns whose qualifier is at or after `qualifier`.
    pub fn start_qualifier_closed(self, qualifier: impl Into<Bytes>) -> Self {
        self.qualifier_bounds(Bound::Included(qualifier.into()), Bound::Unbounded)
    }

    /// Keeps the columns whose qualifier sorts strictly after `qualifier`.
    pub fn start_qualifier_open(self, qualifier: impl Into<Bytes>) -> Self {
        self.qualifier_bounds(Bound::Excluded(qualifier.into()), Bound::Unbounded)
    }

    /// Keeps the columns whose qualifier is at or before `qualifier`.
    pub fn end_qualifier_closed(self, qualifier: impl Into<Bytes>) -> Self {
        self.qualifier_bounds(Bound::Unbounded, Bound::Included(qualifier.into()))
    }

    /// Keeps the columns whose qualifier sorts strictly before `qualifier`.
    pub fn end_qualifier_open(self, qualifier: impl Into<Bytes>) -> Self {
        self.qualifier_bounds(Bound::Unbounded, Bound::Excluded(qualifier.into()))
    }

    /// Keeps the columns whose qualifier lies inside `range`.
    ///
    /// The range is scoped to the family chosen with `family(name)`, if any.
    ///
    /// ```
    /// # use widecol::{Client, ClientConfig, MemoryAdapter, RangeSpec};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let read = client
    ///     .read("users")?
    ///     .row("u1")
    ///     .family("profile")
    ///     .columns()
    ///     .qualifier_range(RangeSpec::new().start_closed("a"))?;
    /// assert_eq!(read.filters().len(), 2);
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    ///
    /// A single column has no qualifier range:
    ///
    /// ```compile_fail,E0599
    /// # use widecol::{Client, ClientConfig, MemoryAdapter, RangeSpec};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let read = client
    ///     .read("users")?
    ///     .row("u1")
    ///     .family("profile")
    ///     .column("email")
    ///     .qualifier_range(RangeSpec::new().start_closed("a"))?;
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    ///
    /// ```compile_fail,E0599
    /// # use widecol::{Client, ClientConfig, MemoryAdapter, RangeSpec};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let read = client
    ///     .read("users")?
    ///     .row("u1")
    ///     .family("profile")
    ///     .column("email")
    ///     .start_qualifier_closed("a");
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    pub fn qualifier_range(self, range: RangeSpec) -> Result<Self> {
        let filter = qualifier_range(self.family.as_deref(), range)?;
        Ok(self.narrow(filter))
    }

    fn qualifier_bounds(self, start: Bound<Bytes>, end: Bound<Bytes>) -> Self {
        let family = self.family.clone();
        self.narrow(RowFilter::ColumnRange { family, start, end })
    }
}
