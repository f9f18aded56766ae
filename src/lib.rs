//! # widecol
//!
//! Cardinality-typed reads for wide-column stores.
//!
//! A read starts at a row (or many rows) and is narrowed to families, columns
//! and cells. Every narrowing is recorded in the builder's type, so the result
//! of [`execute`](Read::execute) has exactly the shape that was asked for:
//! one email cell is an `Option<Cell>`, all columns of a family are a
//! `Vec<Column>`.
//!
//! ## Quick Start
//!
//! ```rust
//! use widecol::{Cell, Client, ClientConfig, MemoryAdapter};
//!
//! # fn main() -> widecol::Result<()> {
//! let store = MemoryAdapter::new()
//!     .with_cell("user#1", "profile", "email", 10, "old@example.com")
//!     .with_cell("user#1", "profile", "email", 20, "ada@example.com")
//!     .with_cell("user#1", "profile", "name", 20, "Ada");
//! let client = Client::new(ClientConfig::new("my-project", "my-instance"), store);
//!
//! let email: Option<Cell> = client
//!     .read("users")?
//!     .row("user#1")
//!     .family("profile")
//!     .column("email")
//!     .latest_cell()
//!     .execute()?;
//! assert_eq!(email.map(|c| c.value), Some("ada@example.com".into()));
//!
//! let columns = client.read("users")?.row("user#1").family("profile").columns().execute()?;
//! assert_eq!(columns.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! | Feature     | Enables                                          |
//! |-------------|--------------------------------------------------|
//! | `tracing`   | `tracing` events around every adapter call       |
//! | `profiling` | puffin scopes for execution and projection       |
//! | `serde`     | `Serialize`/`Deserialize` for the row model      |

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod trace;

pub mod client;
pub mod config;
pub mod projection;
pub mod read;

// =============================================================================
// Root-level exports
// =============================================================================

pub use widecol_core::{adapter, error, escape, filter, memory, model, range, request, selector};

pub use widecol_core::{
    AdapterError, Cell, Column, ExecutionAdapter, Family, Field, FilterChain, MemoryAdapter,
    MemoryError, RangeSpec, ReadError, ReadRowsRequest, Result, Row, RowFilter, RowKey,
    RowRange, RowSelector, RowSet,
};

pub use client::{Client, TableName, TableRead};
pub use config::{ClientConfig, ConfigError};
pub use projection::{Projection, Step};
pub use read::{
    CellWithinColumnRead, CellsWithinColumnRead, ColumnTier, ColumnWithinFamilyRead,
    ColumnsWithinFamiliesRead, ColumnsWithinFamilyRead, FamiliesWithinRowRead,
    FamiliesWithinRowsRead, FamilyTier, FamilyWithinRowRead, FamilyWithinRowsRead, Read,
    RowRead, RowTier, RowsRead,
};
