use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// One HTTP call as observed by a simulated user.
#[derive(Clone, Debug)]
pub struct Metrics {
    /// Request label, usually the request path.
    pub name: Arc<str>,
    pub response_time: Duration,
    /// `0` when no response was received.
    pub status_code: u16,
    pub timed_out: bool,
    pub transport_error: bool,
}

impl Metrics {
    #[must_use]
    pub fn response(name: Arc<str>, start: Instant, status_code: u16) -> Self {
        Self {
            name,
            response_time: start.elapsed(),
            status_code,
            timed_out: false,
            transport_error: false,
        }
    }

    #[must_use]
    pub fn failure(name: Arc<str>, start: Instant, timed_out: bool) -> Self {
        Self {
            name,
            response_time: start.elapsed(),
            status_code: 0,
            timed_out,
            transport_error: !timed_out,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub duration: Duration,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub error_requests: u64,
    pub timeout_requests: u64,
    pub transport_errors: u64,
    pub non_expected_status: u64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub avg_latency_ms: u64,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
    pub status_counts: BTreeMap<u16, u64>,
    pub request_counts: BTreeMap<String, u64>,
}

#[derive(Debug)]
pub struct MetricsReport {
    pub summary: MetricsSummary,
}
