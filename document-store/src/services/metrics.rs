use metrics::{counter, histogram};
use std::time::Duration;

/// Record one store operation; `outcome` is `"success"` or `"failure"`.
pub fn record_operation(operation: &'static str, outcome: &'static str, elapsed: Duration) {
    counter!(
        "document_store_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "document_store_operation_duration_seconds",
        "operation" => operation
    )
    .record(elapsed.as_secs_f64());
}
