use std::fmt;
use std::marker::PhantomData;

use widecol_core::filter::FilterChain;
use widecol_core::selector::RowSelector;

use crate::config::ClientConfig;
use crate::error::{ReadError, Result};
use crate::projection::{MultiRow, SingleRow};
use crate::read::{Read, RowRead, RowsRead};
use crate::RowKey;

/// Fully qualified table identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    project: String,
    instance: String,
    table: String,
}

impl TableName {
    /// Validates `table` against the store's id rules: up to 50 characters of
    /// `[-_.a-zA-Z0-9]`, not starting with `-` or `.`.
    pub fn new(project: &str, instance: &str, table: &str) -> Result<Self> {
        let valid = !table.is_empty()
            && table.len() <= 50
            && !table.starts_with(['-', '.'])
            && table
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
        if !valid {
            return Err(ReadError::InvalidTableName(table.to_owned()));
        }
        Ok(Self {
            project: project.to_owned(),
            instance: instance.to_owned(),
            table: table.to_owned(),
        })
    }

    #[inline]
    pub fn table_id(&self) -> &str {
        &self.table
    }

    /// `projects/{project}/instances/{instance}/tables/{table}`
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/instances/{}/tables/{}",
            self.project, self.instance, self.table
        )
    }
}

/// Entry point for reads: a configured instance plus the adapter that talks to it.
#[derive(Debug)]
pub struct Client<A> {
    config: ClientConfig,
    adapter: A,
}

impl<A> Client<A> {
    pub fn new(config: ClientConfig, adapter: A) -> Self {
        Self { config, adapter }
    }

    #[inline]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[inline]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Starts a read against `table`.
    pub fn read(&self, table: &str) -> Result<TableRead<'_, A>> {
        let name = TableName::new(&self.config.project_id, &self.config.instance_id, table)?;
        Ok(TableRead { client: self, name })
    }
}

/// Reads scoped to one table.
///
/// Builders borrow the client, not this value, so a `TableRead` can be a
/// temporary: `client.read("users")?.row("u1")` is fine to keep around.
#[derive(Debug)]
pub struct TableRead<'c, A> {
    client: &'c Client<A>,
    name: TableName,
}

impl<A> Clone for TableRead<'_, A> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            name: self.name.clone(),
        }
    }
}

impl<'c, A> TableRead<'c, A> {
    #[inline]
    pub fn name(&self) -> &TableName {
        &self.name
    }

    #[inline]
    pub fn client(&self) -> &'c Client<A> {
        self.client
    }

    /// Reads the row stored under `key`, as binary or string.
    pub fn row(&self, key: impl Into<RowKey>) -> RowRead<'c, A> {
        let mut selector = RowSelector::from_keys([key.into()]);
        selector.limit(1);
        self.start::<SingleRow>(selector)
    }

    /// Starts an unrestricted multi-row read; narrow it with
    /// [`add_keys`](Read::add_keys), [`add_key_range`](Read::add_key_range)
    /// or [`limit`](Read::limit).
    pub fn rows(&self) -> RowsRead<'c, A> {
        self.start::<MultiRow>(RowSelector::new())
    }

    /// Reads every row stored under one of `keys`.
    ///
    /// An empty `keys` reads nothing; it never turns into a table scan.
    pub fn rows_with_keys<I, K>(&self, keys: I) -> RowsRead<'c, A>
    where
        I: IntoIterator<Item = K>,
        K: Into<RowKey>,
    {
        let keys: Vec<RowKey> = keys.into_iter().map(Into::into).collect();
        let limit = keys.len() as u64;
        let mut selector = RowSelector::from_keys(keys);
        selector.limit(limit);
        self.start::<MultiRow>(selector)
    }

    fn start<S>(&self, selector: RowSelector) -> Read<'c, A, S> {
        Read {
            table: self.clone(),
            selector,
            filters: FilterChain::new(),
            family: None,
            state: PhantomData,
        }
    }
}
