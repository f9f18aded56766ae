use widecol_core::filter::{exact_match, exact_match_any, regex_filter, Field};
use widecol_core::range::RangeSpec;

use super::sealed::Sealed;
use super::Read;
use crate::error::Result;
use crate::projection::{ManyFamilies, MultiRow, OneFamily, SingleRow};
use crate::RowKey;

/// Read states that still select whole rows.
pub trait RowTier: Sealed {}

impl Sealed for SingleRow {}
impl Sealed for MultiRow {}
impl RowTier for SingleRow {}
impl RowTier for MultiRow {}

impl<'c, A, R: RowTier> Read<'c, A, R> {
    /// Narrows to the family called `name`.
    ///
    /// ```
    /// # use widecol::{Client, ClientConfig, MemoryAdapter};
    /// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
    /// let profile = client.read("users")?.row("u1").family("profile").execute()?;
    /// assert!(profile.is_none());
    /// # Ok::<(), widecol::ReadError>(())
    /// ```
    pub fn family(self, name: &str) -> Read<'c, A, OneFamily<R>> {
        let mut next = self.narrow::<OneFamily<R>>(exact_match(Field::Family, name));
        next.family = Some(name.into());
        next
    }

    /// Keeps every family.
    pub fn families(self) -> Read<'c, A, ManyFamilies<R>> {
        self.into_state()
    }

    /// Keeps the families whose whole name matches `pattern`.
    pub fn family_regex(self, pattern: &str) -> Read<'c, A, ManyFamilies<R>> {
        self.narrow(regex_filter(Field::Family, pattern))
    }

    /// Keeps the families named in `names`; none at all when `names` is empty.
    pub fn families_named<I, N>(self, names: I) -> Read<'c, A, ManyFamilies<R>>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let filter = exact_match_any(
            Field::Family,
            names
                .into_iter()
                .map(|name| name.as_ref().as_bytes().to_vec()),
        );
        self.narrow(filter)
    }
}

/// Row selection beyond the first key. A single-row read has none of these:
///
/// ```
/// # use widecol::{Client, ClientConfig, MemoryAdapter};
/// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
/// let read = client.read("users")?.rows().add_keys(["u2"])?.limit(2).key_regex("u.*");
/// assert_eq!(read.selector().rows_limit(), 2);
/// # Ok::<(), widecol::ReadError>(())
/// ```
///
/// ```compile_fail,E0599
/// # use widecol::{Client, ClientConfig, MemoryAdapter};
/// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
/// let read = client.read("users")?.row("u1").add_keys(["u2"])?;
/// # Ok::<(), widecol::ReadError>(())
/// ```
///
/// ```compile_fail,E0599
/// # use widecol::{Client, ClientConfig, MemoryAdapter};
/// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
/// let read = client.read("users")?.row("u1").limit(2);
/// # Ok::<(), widecol::ReadError>(())
/// ```
///
/// ```compile_fail,E0599
/// # use widecol::{Client, ClientConfig, MemoryAdapter};
/// let client = Client::new(ClientConfig::new("p", "i"), MemoryAdapter::new());
/// let read = client.read("users")?.row("u1").key_regex("u.*");
/// # Ok::<(), widecol::ReadError>(())
/// ```
impl<'c, A> Read<'c, A, MultiRow> {
    /// Adds explicit keys to the selection.
    ///
    /// Fails with [`ReadError::InvalidSelectorState`](crate::ReadError) when a
    /// key range was already chosen. The row limit is left as it is, so keys
    /// added after [`rows_with_keys`](crate::TableRead::rows_with_keys) need a
    /// matching [`limit`](Self::limit).
    ///
    /// On a plain [`rows`](crate::TableRead::rows) scan an empty `keys` still
    /// replaces the scan with an empty key set, which reads nothing and
    /// rejects a later [`add_key_range`](Self::add_key_range).
    pub fn add_keys<I, K>(mut self, keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: Into<RowKey>,
    {
        self.selector.add_keys(keys)?;
        Ok(self)
    }

    /// Selects `[start, end)`; `None` leaves that side open.
    pub fn add_key_range(mut self, start: Option<RowKey>, end: Option<RowKey>) -> Result<Self> {
        self.selector.add_key_range(start, end)?;
        Ok(self)
    }

    /// Selects the keys inside `range`.
    pub fn add_row_range(mut self, range: RangeSpec) -> Result<Self> {
        self.selector.add_row_range(range)?;
        Ok(self)
    }

    /// Returns at most `limit` rows; `0` means no limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.selector.limit(limit);
        self
    }

    /// Keeps the rows whose whole key matches `pattern`.
    pub fn key_regex(self, pattern: &str) -> Self {
        self.narrow(regex_filter(Field::RowKey, pattern))
    }
}
