use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all assistant metrics
const PREFIX: &str = "pezzottify_assistant";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Dialogue Metrics
    pub static ref DIALOGUE_TURNS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_dialogue_turns_total"), "Dialogue turns by outcome"),
        &["outcome"]
    ).expect("Failed to create dialogue_turns_total metric");

    pub static ref CLASSIFIER_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_classifier_duration_seconds"),
            "Intent classification latency in seconds"
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])
    ).expect("Failed to create classifier_duration_seconds metric");

    pub static ref CHAT_ACTIVE_SESSIONS: Gauge = Gauge::new(
        format!("{PREFIX}_chat_active_sessions"),
        "Number of open chat sessions"
    ).expect("Failed to create chat_active_sessions metric");

    // Catalog Metrics
    pub static ref CATALOG_SONGS_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_songs_total"),
        "Number of songs in the catalogue"
    ).expect("Failed to create catalog_songs_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(DIALOGUE_TURNS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CLASSIFIER_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CHAT_ACTIVE_SESSIONS.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_SONGS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

pub fn set_catalog_songs(count: usize) {
    CATALOG_SONGS_TOTAL.set(count as f64);
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

pub fn record_dialogue_turn(outcome: &str) {
    DIALOGUE_TURNS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_classifier_latency(duration: Duration) {
    CLASSIFIER_DURATION_SECONDS.observe(duration.as_secs_f64());
}

pub fn set_active_sessions(count: usize) {
    CHAT_ACTIVE_SESSIONS.set(count as f64);
}

/// Collapses ids in paths so that label cardinality stays bounded.
pub fn categorize_endpoint(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
