//! Cardinality-typed read builders.
//!
//! A read is one generic [`Read`] value whose `State` parameter records every
//! narrowing made so far. The state decides which narrowing methods exist and
//! what [`execute`](Read::execute) returns:
//!
//! ```text
//! row(k)                         -> Option<Row>
//!   .family(f)                   -> Option<Family>
//!     .column(q)                 -> Option<Column>
//!       .latest_cell()           -> Option<Cell>
//!       .cells()                 -> Vec<Cell>
//!     .columns()                 -> Vec<Column>
//!   .families()                  -> Vec<Family>
//!     .columns()                 -> Vec<Family>
//! rows_with_keys(ks) / rows()    -> Vec<Row>   (every narrowing keeps the rows)
//! ```
//!
//! Each narrowing consumes the builder and appends exactly one predicate to
//! its filter chain, in call order. Builders are plain values: do not share
//! one across threads while it is being narrowed; clone it instead.

use std::marker::PhantomData;

use compact_str::CompactString;
use widecol_core::adapter::ExecutionAdapter;
use widecol_core::filter::{FilterChain, RowFilter};
use widecol_core::request::ReadRowsRequest;
use widecol_core::selector::RowSelector;

use crate::client::TableRead;
use crate::error::{ReadError, Result};
use crate::projection::{
    AllCells, Flatten, LatestCell, ManyColumns, ManyFamilies, MultiRow, Nested, OneColumn,
    OneFamily, Projection, SingleRow, Step,
};

mod cell;
mod column;
mod family;
mod row;

pub use column::ColumnTier;
pub use family::FamilyTier;
pub use row::RowTier;

mod sealed {
    pub trait Sealed {}
}

/// A read under construction.
///
/// `State` is one of the marker types from [`crate::projection`].
#[derive(Debug)]
pub struct Read<'c, A, State> {
    pub(crate) table: TableRead<'c, A>,
    pub(crate) selector: RowSelector,
    pub(crate) filters: FilterChain,
    /// Family selected by `family(name)`, used to scope qualifier ranges.
    pub(crate) family: Option<CompactString>,
    pub(crate) state: PhantomData<fn() -> State>,
}

impl<A, State> Clone for Read<'_, A, State> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            selector: self.selector.clone(),
            filters: self.filters.clone(),
            family: self.family.clone(),
            state: PhantomData,
        }
    }
}

pub type RowRead<'c, A> = Read<'c, A, SingleRow>;
pub type RowsRead<'c, A> = Read<'c, A, MultiRow>;
pub type FamilyWithinRowRead<'c, A> = Read<'c, A, OneFamily<SingleRow>>;
pub type FamiliesWithinRowRead<'c, A> = Read<'c, A, ManyFamilies<SingleRow>>;
pub type FamilyWithinRowsRead<'c, A> = Read<'c, A, OneFamily<MultiRow>>;
pub type FamiliesWithinRowsRead<'c, A> = Read<'c, A, ManyFamilies<MultiRow>>;
pub type ColumnWithinFamilyRead<'c, A> = Read<'c, A, OneColumn<OneFamily<SingleRow>>>;
pub type ColumnsWithinFamilyRead<'c, A> = Read<'c, A, ManyColumns<OneFamily<SingleRow>>>;
pub type ColumnsWithinFamiliesRead<'c, A> = Read<'c, A, ManyColumns<ManyFamilies<SingleRow>>>;
pub type CellWithinColumnRead<'c, A> = Read<'c, A, LatestCell<OneColumn<OneFamily<SingleRow>>>>;
pub type CellsWithinColumnRead<'c, A> = Read<'c, A, AllCells<OneColumn<OneFamily<SingleRow>>>>;

impl<'c, A, State> Read<'c, A, State> {
    /// Moves the accumulated request into a new state.
    pub(crate) fn into_state<Next>(self) -> Read<'c, A, Next> {
        Read {
            table: self.table,
            selector: self.selector,
            filters: self.filters,
            family: self.family,
            state: PhantomData,
        }
    }

    /// Appends `filter` and moves to `Next`.
    pub(crate) fn narrow<Next>(mut self, filter: RowFilter) -> Read<'c, A, Next> {
        self.filters.push(filter);
        self.into_state()
    }

    #[inline]
    pub fn table(&self) -> &TableRead<'c, A> {
        &self.table
    }

    /// Predicates accumulated so far, in the order they will be applied.
    #[inline]
    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    #[inline]
    pub fn selector(&self) -> &RowSelector {
        &self.selector
    }

    /// The request this read would send.
    pub fn request(&self) -> ReadRowsRequest {
        let config = self.table.client().config();
        ReadRowsRequest::new(
            self.table.name().full_name(),
            config.app_profile_id.clone(),
            self.selector.clone(),
            &self.filters,
        )
    }

    /// Replaces every list of parents in the result with their children,
    /// e.g. `Vec<Row>` becomes `Vec<Family>` in row-then-family order.
    ///
    /// ```
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let families: Vec<widecol::Family> =
    ///     client.read("users")?.rows().family("f").flatten().execute()?;
    /// assert!(families.is_empty());
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    ///
    /// A single row has no list to flatten:
    ///
    /// ```compile_fail,E0271
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let family = client.read("users")?.row("u1").family("f").flatten();
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    pub fn flatten<T>(self) -> Read<'c, A, Flatten<State>>
    where
        State: Projection<Output = Vec<T>>,
        T: Nested,
    {
        self.into_state()
    }
}

impl<'c, A, State> Read<'c, A, State>
where
    A: ExecutionAdapter,
    State: Projection,
{
    /// Steps the response will go through after execution.
    pub fn projection(&self) -> Vec<Step> {
        State::steps()
    }

    /// Sends the request and projects the response to this read's result type.
    ///
    /// Adapter errors are returned as [`ReadError::ExecutionFailure`] with the
    /// request attached; nothing is retried here.
    pub fn execute(&self) -> Result<State::Output> {
        widecol_profile_scope!("execute");
        let request = self.request();
        if request.rows.is_empty_keys() {
            widecol_trace_skip!(request, "empty key set");
            return Ok(State::project(Vec::new()));
        }

        widecol_trace_read!(request);
        let rows = match self.table.client().adapter().read_rows(&request) {
            Ok(rows) => rows,
            Err(source) => {
                let err = ReadError::execution(&request, source);
                widecol_trace_failure!(request, err);
                return Err(err);
            }
        };

        widecol_profile_scope!("project");
        Ok(State::project(rows))
    }
}
