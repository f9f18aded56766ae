//! Tracing and profiling hooks for read execution.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate and the
//! `profiling` feature for puffin scopes. Both macros no-op when their feature
//! is disabled, avoiding `#[cfg]` boilerplate at every call site.

/// Emit a debug-level event describing the request about to reach the adapter.
///
/// ```ignore
/// widecol_trace_read!(&request);
/// ```
macro_rules! widecol_trace_read {
    ($request:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            table = %$request.table_name,
            rows = $request.rows.kind(),
            filters = $request.filter_count(),
            limit = $request.rows_limit,
            "widecol.read"
        );
    };
}

/// Emit a warn-level event for an adapter failure.
macro_rules! widecol_trace_failure {
    ($request:expr, $error:expr) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(table = %$request.table_name, error = %$error, "widecol.read.failed");
    };
}

/// Emit a debug-level event for reads answered without touching the adapter.
macro_rules! widecol_trace_skip {
    ($request:expr, $reason:literal) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(table = %$request.table_name, reason = $reason, "widecol.read.skipped");
    };
}

/// Puffin scope, compiled out without the `profiling` feature.
macro_rules! widecol_profile_scope {
    ($operation:literal) => {
        #[cfg(feature = "profiling")]
        puffin::profile_scope!("widecol", $operation);
    };
}
