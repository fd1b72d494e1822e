use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter, Encoder, Histogram, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "loan_console_backend_requests_total",
        "Total requests sent to the backend"
    )
    .expect("register backend_requests_total")
});

pub static FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "loan_console_backend_failures_total",
        "Total backend requests that ended in an error"
    )
    .expect("register backend_failures_total")
});

pub static SESSION_EXPIRED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "loan_console_session_expired_total",
        "Total reads rejected as unauthorized"
    )
    .expect("register session_expired_total")
});

pub static REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "loan_console_backend_request_duration_seconds",
        "Backend request duration in seconds",
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register backend_request_duration")
});

/// Render every console metric in the Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    Lazy::force(&REQUESTS_TOTAL);
    Lazy::force(&FAILURES_TOTAL);
    Lazy::force(&SESSION_EXPIRED_TOTAL);
    Lazy::force(&REQUEST_DURATION);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
