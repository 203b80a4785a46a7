//! Per-request trace id, scoped to the handling task.
//!
//! `RequestTrace` opens the scope; error rendering and security logging read
//! it back without threading the request through every call.

use std::future::Future;

use tokio::task_local;

const UNSET: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the request being served, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNSET.to_string())
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
