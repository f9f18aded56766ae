use thiserror::Error;

use crate::request::ReadRowsRequest;

/// Boxed error reported by an [`ExecutionAdapter`](crate::adapter::ExecutionAdapter).
pub type AdapterError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ReadError {
    /// Explicit row keys and a key range were mixed on the same selector
    #[error("Invalid row selector: {0}")]
    InvalidSelectorState(&'static str),

    /// A range had no bound, or both an open and a closed bound on one edge
    #[error("Invalid range: {0}")]
    InvalidRangeSpec(&'static str),

    /// Table id the store would reject
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// The execution adapter failed; the request is attached for diagnostics
    #[error("Read from {table} failed: {source}")]
    ExecutionFailure {
        table: String,
        request: Box<ReadRowsRequest>,
        #[source]
        source: AdapterError,
    },
}

impl ReadError {
    /// Wraps an adapter failure together with the request that triggered it.
    pub fn execution(request: &ReadRowsRequest, source: impl Into<AdapterError>) -> Self {
        Self::ExecutionFailure {
            table: request.table_name.clone(),
            request: Box::new(request.clone()),
            source: source.into(),
        }
    }

    /// The request attached to an execution failure, if any.
    pub fn request(&self) -> Option<&ReadRowsRequest> {
        match self {
            Self::ExecutionFailure { request, .. } => Some(request),
            _ => None,
        }
    }
}

/// Result type for read construction and execution
pub type Result<T> = std::result::Result<T, ReadError>;
