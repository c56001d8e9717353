use std::collections::BTreeMap;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Duration, Instant},
};

use super::{LatencyHistogram, Metrics, MetricsReport, MetricsSummary};

/// Running totals for one load run.
pub struct MetricsAggregator {
    expected_status_code: u16,
    total_requests: u64,
    successful_requests: u64,
    timeout_requests: u64,
    transport_errors: u64,
    latency_sum_ms: u128,
    min_latency_ms: u64,
    max_latency_ms: u64,
    histogram: Option<LatencyHistogram>,
    status_counts: BTreeMap<u16, u64>,
    request_counts: BTreeMap<String, u64>,
}

impl MetricsAggregator {
    #[must_use]
    pub fn new(expected_status_code: u16) -> Self {
        let histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                tracing::warn!("Failed to initialize latency histogram: {}", err);
                None
            }
        };

        Self {
            expected_status_code,
            total_requests: 0,
            successful_requests: 0,
            timeout_requests: 0,
            transport_errors: 0,
            latency_sum_ms: 0,
            min_latency_ms: u64::MAX,
            max_latency_ms: 0,
            histogram,
            status_counts: BTreeMap::new(),
            request_counts: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, msg: &Metrics) {
        let latency_ms = u64::try_from(msg.response_time.as_millis()).unwrap_or(u64::MAX);

        self.total_requests = self.total_requests.saturating_add(1);
        self.latency_sum_ms = self.latency_sum_ms.saturating_add(u128::from(latency_ms));
        self.min_latency_ms = self.min_latency_ms.min(latency_ms);
        self.max_latency_ms = self.max_latency_ms.max(latency_ms);

        if msg.timed_out {
            self.timeout_requests = self.timeout_requests.saturating_add(1);
        } else if msg.transport_error {
            self.transport_errors = self.transport_errors.saturating_add(1);
        } else {
            let count = self.status_counts.entry(msg.status_code).or_insert(0);
            *count = count.saturating_add(1);
            if msg.status_code == self.expected_status_code {
                self.successful_requests = self.successful_requests.saturating_add(1);
            }
        }

        let count = self.request_counts.entry(msg.name.to_string()).or_insert(0);
        *count = count.saturating_add(1);

        if let Some(histogram) = self.histogram.as_mut()
            && let Err(err) = histogram.record(latency_ms)
        {
            tracing::debug!("Dropping latency sample: {}", err);
        }
    }

    #[must_use]
    pub fn summary(&self, duration: Duration) -> MetricsSummary {
        let has_requests = self.total_requests > 0;
        let avg_latency_ms = self
            .latency_sum_ms
            .checked_div(u128::from(self.total_requests))
            .map_or(0, |avg| u64::try_from(avg).unwrap_or(u64::MAX));
        let (p50_latency_ms, p90_latency_ms, p99_latency_ms) = self
            .histogram
            .as_ref()
            .map_or((0, 0, 0), LatencyHistogram::percentiles);
        let error_requests = self
            .total_requests
            .saturating_sub(self.successful_requests);
        let non_expected_status = error_requests
            .saturating_sub(self.timeout_requests)
            .saturating_sub(self.transport_errors);

        MetricsSummary {
            duration,
            total_requests: self.total_requests,
            successful_requests: self.successful_requests,
            error_requests,
            timeout_requests: self.timeout_requests,
            transport_errors: self.transport_errors,
            non_expected_status,
            min_latency_ms: if has_requests { self.min_latency_ms } else { 0 },
            max_latency_ms: self.max_latency_ms,
            avg_latency_ms,
            p50_latency_ms,
            p90_latency_ms,
            p99_latency_ms,
            status_counts: self.status_counts.clone(),
            request_counts: self.request_counts.clone(),
        }
    }
}

/// Spawns the task that folds every sample into the run summary.
///
/// The task ends once every `Metrics` sender has been dropped, which happens
/// after all simulated users have stopped.
#[must_use]
pub fn setup_metrics_collector(
    expected_status_code: u16,
    run_start: Instant,
    mut metrics_rx: mpsc::Receiver<Metrics>,
) -> JoinHandle<MetricsReport> {
    tokio::spawn(async move {
        let mut aggregator = MetricsAggregator::new(expected_status_code);

        while let Some(msg) = metrics_rx.recv().await {
            tracing::trace!(
                "{} -> {} in {}ms",
                msg.name,
                msg.status_code,
                msg.response_time.as_millis()
            );
            aggregator.record(&msg);
        }

        MetricsReport {
            summary: aggregator.summary(run_start.elapsed()),
        }
    })
}
