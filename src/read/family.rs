use widecol_core::filter::{exact_match, exact_match_any, regex_filter, Field};

use super::row::RowTier;
use super::sealed::Sealed;
use super::Read;
use crate::projection::{ManyColumns, ManyFamilies, OneColumn, OneFamily};

/// Read states narrowed to one or many families.
pub trait FamilyTier: Sealed {}

impl<R: RowTier> Sealed for OneFamily<R> {}
impl<R: RowTier> Sealed for ManyFamilies<R> {}
impl<R: RowTier> FamilyTier for OneFamily<R> {}
impl<R: RowTier> FamilyTier for ManyFamilies<R> {}

impl<'c, A, R: RowTier> Read<'c, A, OneFamily<R>> {
    /// Narrows to the column stored under `qualifier`.
    ///
    /// Only a single family has a single column:
    ///
    /// ```
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let email = client
    ///     .read("users")?
    ///     .row("u1")
    ///     .family("profile")
    ///     .column("email")
    ///     .latest_cell();
    /// assert_eq!(email.filters().len(), 3);
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    ///
    /// ```compile_fail,E0599
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let email = client
    ///     .read("users")?
    ///     .row("u1")
    ///     .families()
    ///     .column("email")
    ///     .latest_cell();
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    pub fn column(self, qualifier: impl AsRef<[u8]>) -> Read<'c, A, OneColumn<OneFamily<R>>> {
        self.narrow(exact_match(Field::Qualifier, qualifier))
    }
}

impl<'c, A, F: FamilyTier> Read<'c, A, F> {
    /// Keeps every column.
    pub fn columns(self) -> Read<'c, A, ManyColumns<F>> {
        self.into_state()
    }

    /// Keeps the columns whose whole qualifier matches `pattern`.
    pub fn column_regex(self, pattern: &str) -> Read<'c, A, ManyColumns<F>> {
        self.narrow(regex_filter(Field::Qualifier, pattern))
    }

    /// Keeps exactly the columns in `qualifiers`.
    ///
    /// An empty list selects nothing:
    ///
    /// ```
    /// # use widecol::{Client, ClientConfig, MemoryAdapter, RowFilter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let read = client
    ///     .read("t")?
    ///     .row("x")
    ///     .family("f")
    ///     .columns_named(Vec::<&str>::new());
    /// assert_eq!(read.filters().as_slice().last(), Some(&RowFilter::BlockAll));
    /// assert!(read.execute()?.is_empty());
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    pub fn columns_named<I, Q>(self, qualifiers: I) -> Read<'c, A, ManyColumns<F>>
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<[u8]>,
    {
        self.narrow(exact_match_any(Field::Qualifier, qualifiers))
    }
}
