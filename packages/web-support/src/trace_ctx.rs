//! Task-local trace id for the request currently being handled.
//!
//! `RequestTrace` opens the scope; error rendering reads from it so every
//! error body carries the same id as the `x-trace-id` response header.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

/// Returns "unknown" outside of a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
