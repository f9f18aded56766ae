//! Request and response model for reads against a wide-column store.
//!
//! This crate holds the pieces the typed read builders in `widecol` are made
//! of: the nested row model, row selectors, filter predicates and the
//! [`ExecutionAdapter`] boundary to the store client.

pub mod adapter;
pub mod error;
pub mod escape;
pub mod filter;
pub mod memory;
pub mod model;
pub mod range;
pub mod request;
pub mod selector;

pub use adapter::ExecutionAdapter;
pub use error::{AdapterError, ReadError, Result};
pub use filter::{Field, FilterChain, RowFilter};
pub use memory::{MemoryAdapter, MemoryError};
pub use model::{Cell, Column, Family, Row, RowKey};
pub use range::RangeSpec;
pub use request::ReadRowsRequest;
pub use selector::{RowRange, RowSelector, RowSet};
