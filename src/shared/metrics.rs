//! Prometheus metrics registry
//!
//! Core monitoring for the auction service.
//!
//! ## Metric types
//! - **Counter**: requests per operation, bids, buy-nows, comments, errors
//! - **Histogram**: request latency per operation
//! - **Gauge**: table row counts, open auctions
//!
//! ## Usage example
//! ```rust,ignore
//! use bidhouse::shared::metrics::METRICS;
//!
//! METRICS.requests_total.with_label_values(&["view_item"]).inc();
//!
//! let timer = METRICS
//!     .request_duration
//!     .with_label_values(&["place_bid"])
//!     .start_timer();
//! // ... handle the request ...
//! drop(timer);
//! ```

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram_vec, CounterVec, Encoder,
    GaugeVec, HistogramVec, TextEncoder,
};

lazy_static! {
    /// Global metrics instance.
    pub static ref METRICS: Metrics = Metrics::new();
}

/// Auction service core metrics.
pub struct Metrics {
    /// Requests received, by operation name.
    pub requests_total: CounterVec,

    /// Request latency in seconds, by operation name.
    pub request_duration: HistogramVec,

    /// Bids, by outcome (accepted/rejected).
    pub bids_total: CounterVec,

    /// Buy-now purchases, by outcome.
    pub buy_nows_total: CounterVec,

    /// Comments stored, by outcome.
    pub comments_total: CounterVec,

    /// User registrations, by outcome.
    pub users_registered_total: CounterVec,

    /// Item registrations, by outcome.
    pub items_registered_total: CounterVec,

    /// Authentication attempts, by outcome (success/failure).
    pub auth_total: CounterVec,

    /// Errors, by error type.
    pub errors_total: CounterVec,

    /// Current row counts, by table.
    pub table_rows: GaugeVec,

    /// Auctions currently open.
    pub open_auctions: GaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests_total: register_counter_vec!(
                "bidhouse_requests_total",
                "Total number of API requests received",
                &["operation"]
            )
            .unwrap(),

            request_duration: register_histogram_vec!(
                "bidhouse_request_duration_seconds",
                "API request duration in seconds",
                &["operation"],
                vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]
            )
            .unwrap(),

            bids_total: register_counter_vec!(
                "bidhouse_bids_total",
                "Total number of bids processed",
                &["status"]
            )
            .unwrap(),

            buy_nows_total: register_counter_vec!(
                "bidhouse_buy_nows_total",
                "Total number of buy-now purchases processed",
                &["status"]
            )
            .unwrap(),

            comments_total: register_counter_vec!(
                "bidhouse_comments_total",
                "Total number of comments processed",
                &["status"]
            )
            .unwrap(),

            users_registered_total: register_counter_vec!(
                "bidhouse_users_registered_total",
                "Total number of user registrations processed",
                &["status"]
            )
            .unwrap(),

            items_registered_total: register_counter_vec!(
                "bidhouse_items_registered_total",
                "Total number of item registrations processed",
                &["status"]
            )
            .unwrap(),

            auth_total: register_counter_vec!(
                "bidhouse_auth_total",
                "Total number of authentication attempts",
                &["status"]
            )
            .unwrap(),

            errors_total: register_counter_vec!(
                "bidhouse_errors_total",
                "Total number of errors",
                &["error_type"]
            )
            .unwrap(),

            table_rows: register_gauge_vec!(
                "bidhouse_table_rows",
                "Current number of rows per table",
                &["table"]
            )
            .unwrap(),

            open_auctions: register_gauge_vec!(
                "bidhouse_open_auctions",
                "Number of auctions currently open",
                &["category"]
            )
            .unwrap(),
        }
    }

    /// Exports all registered metrics in the Prometheus text format.
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = vec![];
        encoder.encode(&metric_families, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
