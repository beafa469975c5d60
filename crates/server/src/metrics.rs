use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static ITEM_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "items_requests_total",
        "Item requests handled, by operation",
        &["op"]
    )
    .expect("register items_requests_total")
});

pub static ITEM_STORE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "items_store_errors_total",
        "Record store failures surfaced as 5xx"
    )
    .expect("register items_store_errors_total")
});

pub fn record(op: &str) {
    ITEM_REQUESTS_TOTAL.with_label_values(&[op]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    // register before gathering
    Lazy::force(&ITEM_REQUESTS_TOTAL);
    Lazy::force(&ITEM_STORE_ERRORS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
