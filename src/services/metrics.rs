use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    pub static ref FOCUS_MODE_OPERATIONS: CounterVec = register_counter_vec!(
        "focus_api_focus_mode_operations_total",
        "Focus mode requests by operation and outcome",
        &["operation", "status"]
    ).unwrap();
}

/// Count one handled focus mode request. `status` is `ok`, `rejected`
/// (client error) or `error` (store failure).
pub fn record(operation: &str, status: &str) {
    FOCUS_MODE_OPERATIONS.with_label_values(&[operation, status]).inc();
}
