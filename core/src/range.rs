use std::ops::Bound;

use bytes::Bytes;

use crate::error::{ReadError, Result};

/// A byte range whose two edges are each independently open, closed, or absent.
///
/// Setting both the open and the closed variant of one edge, or leaving both
/// edges empty, is rejected by [`RangeSpec::into_bounds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSpec {
    start_closed: Option<Bytes>,
    start_open: Option<Bytes>,
    end_closed: Option<Bytes>,
    end_open: Option<Bytes>,
}

impl RangeSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_closed(mut self, start: impl Into<Bytes>) -> Self {
        self.start_closed = Some(start.into());
        self
    }

    pub fn start_open(mut self, start: impl Into<Bytes>) -> Self {
        self.start_open = Some(start.into());
        self
    }

    pub fn end_closed(mut self, end: impl Into<Bytes>) -> Self {
        self.end_closed = Some(end.into());
        self
    }

    pub fn end_open(mut self, end: impl Into<Bytes>) -> Self {
        self.end_open = Some(end.into());
        self
    }

    /// Validates the edges and converts them to `std::ops::Bound`s.
    pub fn into_bounds(self) -> Result<(Bound<Bytes>, Bound<Bytes>)> {
        let start = edge(
            self.start_closed,
            self.start_open,
            "start edge is both open and closed",
        )?;
        let end = edge(
            self.end_closed,
            self.end_open,
            "end edge is both open and closed",
        )?;
        if matches!((&start, &end), (Bound::Unbounded, Bound::Unbounded)) {
            return Err(ReadError::InvalidRangeSpec(
                "range requires at least one bound",
            ));
        }
        Ok((start, end))
    }
}

fn edge(
    closed: Option<Bytes>,
    open: Option<Bytes>,
    conflict: &'static str,
) -> Result<Bound<Bytes>> {
    match (closed, open) {
        (Some(_), Some(_)) => Err(ReadError::InvalidRangeSpec(conflict)),
        (Some(v), None) => Ok(Bound::Included(v)),
        (None, Some(v)) => Ok(Bound::Excluded(v)),
        (None, None) => Ok(Bound::Unbounded),
    }
}

/// Whether `value` lies between `start` and `end`.
pub fn contains(start: &Bound<Bytes>, end: &Bound<Bytes>, value: &[u8]) -> bool {
    let above = match start {
        Bound::Included(s) => value >= &s[..],
        Bound::Excluded(s) => value > &s[..],
        Bound::Unbounded => true,
    };
    let below = match end {
        Bound::Included(e) => value <= &e[..],
        Bound::Excluded(e) => value < &e[..],
        Bound::Unbounded => true,
    };
    above && below
}
