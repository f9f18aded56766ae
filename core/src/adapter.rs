use std::sync::Arc;

use crate::error::AdapterError;
use crate::model::Row;
use crate::request::ReadRowsRequest;

/// The store client boundary.
///
/// Implementations translate a [`ReadRowsRequest`] into whatever transport
/// they own and return the complete, nested response. Retries, deadlines and
/// authentication all live on this side of the boundary; the read builders
/// forward any error unchanged.
pub trait ExecutionAdapter {
    type Error: Into<AdapterError>;

    /// Runs the read and blocks until every row has been received.
    fn read_rows(&self, request: &ReadRowsRequest) -> Result<Vec<Row>, Self::Error>;
}

impl<A: ExecutionAdapter + ?Sized> ExecutionAdapter for &A {
    type Error = A::Error;

    fn read_rows(&self, request: &ReadRowsRequest) -> Result<Vec<Row>, Self::Error> {
        (**self).read_rows(request)
    }
}

impl<A: ExecutionAdapter + ?Sized> ExecutionAdapter for Box<A> {
    type Error = A::Error;

    fn read_rows(&self, request: &ReadRowsRequest) -> Result<Vec<Row>, Self::Error> {
        (**self).read_rows(request)
    }
}

impl<A: ExecutionAdapter + ?Sized> ExecutionAdapter for Arc<A> {
    type Error = A::Error;

    fn read_rows(&self, request: &ReadRowsRequest) -> Result<Vec<Row>, Self::Error> {
        (**self).read_rows(request)
    }
}
